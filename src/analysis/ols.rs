//! Ordinary least squares model fitting
//!
//! Models are explicit [`ModelSpec`] values naming the response and an
//! ordered list of predictor columns; there is no formula language. Column
//! names are resolved against the observation schema before any numeric
//! work, the design matrix is decomposed by SVD for a rank check and the
//! coefficient solve, and inference statistics come from the usual
//! normal-equation identities with Student's t / Fisher-Snedecor / chi-square
//! distributions supplying p-values and critical values.

use crate::analysis::constants::CONFIDENCE_LEVEL;
use crate::common::ObservationTable;
use nalgebra::{DMatrix, DVector};
use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, StudentsT};
use thiserror::Error;

/// Errors that can occur during model fitting
#[derive(Error, Debug)]
pub enum OlsError {
    #[error("Unknown column in model specification: {0}")]
    UnknownColumn(String),

    #[error("Not enough observations: {observations} rows cannot identify {parameters} parameters")]
    InsufficientObservations {
        observations: usize,
        parameters: usize,
    },

    #[error("Design matrix is rank deficient: rank {rank} with {parameters} parameters (constant or collinear predictor)")]
    RankDeficient { rank: usize, parameters: usize },

    #[error("Numerical failure during fit: {0}")]
    Numerical(String),
}

type Result<T> = core::result::Result<T, OlsError>;

/// An ordinary least squares model: response and ordered predictor columns
///
/// The intercept is implicit; it is always the first column of the design
/// matrix and the first row of the coefficient table.
#[derive(Debug, Clone)]
pub struct ModelSpec {
    /// Display name used as the report header for this model
    pub name: String,
    /// Column name of the dependent variable
    pub response: String,
    /// Column names of the predictors, in design-matrix order
    pub predictors: Vec<String>,
}

impl ModelSpec {
    /// Creates a model specification from column names
    pub fn new(name: &str, response: &str, predictors: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            response: response.to_string(),
            predictors: predictors.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// One fitted coefficient with its inference statistics
#[derive(Debug, Clone)]
pub struct Coefficient {
    /// Term name ("Intercept" or the predictor column name)
    pub term: String,
    pub estimate: f64,
    pub std_error: f64,
    pub t_value: f64,
    /// Two-sided p-value against the zero-coefficient null
    pub p_value: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
}

/// A fitted ordinary least squares model with its summary statistics
#[derive(Debug, Clone)]
pub struct OlsFit {
    /// Display name of the fitted model
    pub model: String,
    /// Column name of the dependent variable
    pub response: String,
    /// Intercept first, then predictors in specification order
    pub coefficients: Vec<Coefficient>,
    pub observations: usize,
    pub residual_df: usize,
    pub r_squared: f64,
    pub adj_r_squared: f64,
    /// Square root of the residual variance estimate
    pub residual_std_error: f64,
    /// F statistic against the intercept-only model
    pub f_statistic: f64,
    pub f_pvalue: f64,
    pub log_likelihood: f64,
    pub aic: f64,
    pub bic: f64,
    pub durbin_watson: f64,
    pub jarque_bera: f64,
    pub jarque_bera_pvalue: f64,
    pub skewness: f64,
    pub excess_kurtosis: f64,
    /// Ratio of the largest to smallest singular value of the design matrix
    pub condition_number: f64,
    pub fitted: Vec<f64>,
    pub residuals: Vec<f64>,
}

/// Fits an ordinary least squares model on the given observations
///
/// Builds the n x (k+1) design matrix (intercept first), checks its rank via
/// singular values, solves for the coefficients, and derives the full set of
/// summary statistics. No regularization is applied.
///
/// # Arguments
/// * `spec` - The model to fit
/// * `table` - Observations providing the response and predictor columns
///
/// # Returns
/// * `Ok(OlsFit)` - The fitted model and its summary statistics
/// * `Err(OlsError)` - If a column is unknown, the data cannot identify the
///   parameters, or a numerical step failed
pub fn fit(spec: &ModelSpec, table: &ObservationTable) -> Result<OlsFit> {
    let n = table.len();
    let parameters = spec.predictors.len() + 1;
    if n <= parameters {
        return Err(OlsError::InsufficientObservations {
            observations: n,
            parameters,
        });
    }

    // Column names resolve against the observation schema while the design
    // matrix is assembled; an unknown name fails before any numeric work
    let rows = table.rows();
    let y_values: Vec<f64> = rows
        .iter()
        .map(|row| row.numeric_value(&spec.response))
        .collect::<Option<_>>()
        .ok_or_else(|| OlsError::UnknownColumn(spec.response.clone()))?;

    let mut predictor_columns: Vec<Vec<f64>> = Vec::with_capacity(spec.predictors.len());
    for name in &spec.predictors {
        let column: Vec<f64> = rows
            .iter()
            .map(|row| row.numeric_value(name))
            .collect::<Option<_>>()
            .ok_or_else(|| OlsError::UnknownColumn(name.clone()))?;
        predictor_columns.push(column);
    }

    let x = DMatrix::from_fn(n, parameters, |i, j| {
        if j == 0 {
            1.0
        } else {
            predictor_columns[j - 1][i]
        }
    });
    let y = DVector::from_vec(y_values);

    // Rank check and conditioning from the singular values
    let svd = x.clone().svd(true, true);
    let max_sv = svd.singular_values.max();
    let tolerance = f64::EPSILON * n.max(parameters) as f64 * max_sv;
    let rank = svd
        .singular_values
        .iter()
        .filter(|&&sv| sv > tolerance)
        .count();
    if rank < parameters {
        return Err(OlsError::RankDeficient { rank, parameters });
    }
    let min_sv = svd
        .singular_values
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);
    let condition_number = max_sv / min_sv;

    let beta = svd
        .solve(&y, tolerance)
        .map_err(|e| OlsError::Numerical(e.to_string()))?;

    let fitted = &x * &beta;
    let residuals = &y - &fitted;
    let rss = residuals.norm_squared();
    let y_mean = y.mean();
    let tss: f64 = y.iter().map(|value| (value - y_mean).powi(2)).sum();

    let residual_df = n - parameters;
    let sigma_squared = rss / residual_df as f64;

    // Standard errors from the diagonal of sigma^2 (X'X)^-1
    let xtx_inverse = (x.transpose() * &x).try_inverse().ok_or_else(|| {
        OlsError::Numerical("normal equations matrix is not invertible".to_string())
    })?;

    let t_dist = StudentsT::new(0.0, 1.0, residual_df as f64)
        .map_err(|e| OlsError::Numerical(e.to_string()))?;
    let alpha = 1.0 - CONFIDENCE_LEVEL;
    let t_critical = t_dist.inverse_cdf(1.0 - alpha / 2.0);

    let mut coefficients = Vec::with_capacity(parameters);
    for j in 0..parameters {
        let term = if j == 0 {
            "Intercept".to_string()
        } else {
            spec.predictors[j - 1].clone()
        };
        let estimate = beta[j];
        let std_error = (sigma_squared * xtx_inverse[(j, j)]).sqrt();
        let t_value = estimate / std_error;
        let p_value = 2.0 * (1.0 - t_dist.cdf(t_value.abs()));
        let margin = t_critical * std_error;
        coefficients.push(Coefficient {
            term,
            estimate,
            std_error,
            t_value,
            p_value,
            ci_lower: estimate - margin,
            ci_upper: estimate + margin,
        });
    }

    let k = spec.predictors.len();
    let r_squared = if tss > 0.0 { 1.0 - rss / tss } else { f64::NAN };
    let adj_r_squared = 1.0 - (1.0 - r_squared) * (n - 1) as f64 / residual_df as f64;

    let f_statistic = ((tss - rss) / k as f64) / (rss / residual_df as f64);
    let f_pvalue = if f_statistic.is_finite() {
        let f_dist = FisherSnedecor::new(k as f64, residual_df as f64)
            .map_err(|e| OlsError::Numerical(e.to_string()))?;
        1.0 - f_dist.cdf(f_statistic)
    } else {
        f64::NAN
    };

    // Gaussian log-likelihood at the maximum likelihood variance estimate
    let log_likelihood =
        -0.5 * n as f64 * ((2.0 * std::f64::consts::PI).ln() + (rss / n as f64).ln() + 1.0);
    let aic = -2.0 * log_likelihood + 2.0 * parameters as f64;
    let bic = -2.0 * log_likelihood + (n as f64).ln() * parameters as f64;

    let residual_values: Vec<f64> = residuals.iter().copied().collect();
    let durbin_watson = durbin_watson(&residual_values);
    let (skewness, excess_kurtosis) = sample_shape(&residual_values);
    let jarque_bera =
        n as f64 / 6.0 * (skewness.powi(2) + excess_kurtosis.powi(2) / 4.0);
    let jarque_bera_pvalue = if jarque_bera.is_finite() {
        let chi_dist =
            ChiSquared::new(2.0).map_err(|e| OlsError::Numerical(e.to_string()))?;
        1.0 - chi_dist.cdf(jarque_bera)
    } else {
        f64::NAN
    };

    Ok(OlsFit {
        model: spec.name.clone(),
        response: spec.response.clone(),
        coefficients,
        observations: n,
        residual_df,
        r_squared,
        adj_r_squared,
        residual_std_error: sigma_squared.sqrt(),
        f_statistic,
        f_pvalue,
        log_likelihood,
        aic,
        bic,
        durbin_watson,
        jarque_bera,
        jarque_bera_pvalue,
        skewness,
        excess_kurtosis,
        condition_number,
        fitted: fitted.iter().copied().collect(),
        residuals: residual_values,
    })
}

/// Durbin-Watson statistic for first-order residual autocorrelation
fn durbin_watson(residuals: &[f64]) -> f64 {
    let rss: f64 = residuals.iter().map(|e| e * e).sum();
    if rss == 0.0 {
        return f64::NAN;
    }
    let successive_diff_sq: f64 = residuals
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).powi(2))
        .sum();
    successive_diff_sq / rss
}

/// Sample skewness and excess kurtosis from the central moments
fn sample_shape(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let m2 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    if m2 == 0.0 {
        return (f64::NAN, f64::NAN);
    }
    let m3 = values.iter().map(|v| (v - mean).powi(3)).sum::<f64>() / n;
    let m4 = values.iter().map(|v| (v - mean).powi(4)).sum::<f64>() / n;

    (m3 / m2.powf(1.5), m4 / (m2 * m2) - 3.0)
}
