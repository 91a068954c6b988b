//! Regression analysis of runtime factors against deployment designs
//!
//! This module defines the two models fitted over the benchmark data and
//! renders their summaries into the text report printed by the
//! runtime-regression binary.

use crate::analysis::constants::BASELINE_DATABASE;
use crate::analysis::ols::{fit, ModelSpec, OlsError, OlsFit};
use crate::common::tables::format_table;
use crate::common::ObservationTable;
use tabled::Tabled;
use thiserror::Error;

/// Errors that can occur during regression analysis
#[derive(Error, Debug)]
pub enum RegressionError {
    #[error("Model fit error: {0}")]
    ModelFit(#[from] OlsError),
}

type Result<T> = core::result::Result<T, RegressionError>;

/// The draft model: runtime factor against the raw deployment measurements
///
/// MultiNodeCount and TotalNetworkDistance were planned with more variation
/// than the collected batches ended up exploring; MultiNodeCount is always 3
/// when not 0 and only two batches cross data centers, so these predictors
/// carry high multicollinearity in this dataset.
pub fn draft_model() -> ModelSpec {
    ModelSpec::new(
        "RuntimeFactor -- Draft Version",
        "RuntimeFactor",
        &["Workers", "IsMultiDC", "MultiNodeCount", "TotalNetworkDistance"],
    )
}

/// The published model: runtime factor against the 0/1 deployment dummies
pub fn published_model() -> ModelSpec {
    ModelSpec::new(
        "RuntimeFactorAllDummy -- Published Version",
        "RuntimeFactor",
        &["Workers", "IsMultiNode", "IsMultiDC", "IsMultiContinent"],
    )
}

/// Generate the full regression report over both models
///
/// Discards the baseline system's runs, fits the draft and published models
/// on the remaining subset, and renders one summary section per model: the
/// model header, fit statistics, the coefficient table, and residual
/// diagnostics.
///
/// # Arguments
/// * `table` - The loaded benchmark observations
///
/// # Returns
/// * `Ok(String)` - The complete report, ready to print
/// * `Err(RegressionError)` - If either model fit failed
pub fn generate_regression_report(table: &ObservationTable) -> Result<String> {
    // Runtime factors are measured relative to the baseline system, so its
    // own runs are discarded before fitting
    let subset = table.exclude_database(BASELINE_DATABASE);

    let mut report = String::new();
    for spec in [draft_model(), published_model()] {
        let fitted = fit(&spec, &subset)?;
        report.push_str(&format_model_report(&fitted));
        report.push('\n');
    }

    Ok(report)
}

/// One row of the coefficient table
#[derive(Tabled)]
struct CoefficientRow {
    #[tabled(rename = "Term")]
    term: String,
    #[tabled(rename = "Estimate")]
    estimate: String,
    #[tabled(rename = "Std Error")]
    std_error: String,
    #[tabled(rename = "t value")]
    t_value: String,
    #[tabled(rename = "Pr(>|t|)")]
    p_value: String,
    #[tabled(rename = "95% CI Low")]
    ci_lower: String,
    #[tabled(rename = "95% CI High")]
    ci_upper: String,
}

/// Renders one model's header, fit statistics, coefficients and diagnostics
fn format_model_report(fitted: &OlsFit) -> String {
    let statistics = format!(
        "Dep. Variable: {}   Observations: {}   Residual df: {}\n\
         R-squared: {:.4}   Adjusted R-squared: {:.4}\n\
         F-statistic: {:.4} (p = {:.4})   Residual std error: {:.4}\n\
         Log-likelihood: {:.4}   AIC: {:.4}   BIC: {:.4}",
        fitted.response,
        fitted.observations,
        fitted.residual_df,
        fitted.r_squared,
        fitted.adj_r_squared,
        fitted.f_statistic,
        fitted.f_pvalue,
        fitted.residual_std_error,
        fitted.log_likelihood,
        fitted.aic,
        fitted.bic
    );

    let rows: Vec<CoefficientRow> = fitted
        .coefficients
        .iter()
        .map(|coefficient| CoefficientRow {
            term: coefficient.term.clone(),
            estimate: format!("{:.6}", coefficient.estimate),
            std_error: format!("{:.6}", coefficient.std_error),
            t_value: format!("{:.3}", coefficient.t_value),
            p_value: format!("{:.4}", coefficient.p_value),
            ci_lower: format!("{:.6}", coefficient.ci_lower),
            ci_upper: format!("{:.6}", coefficient.ci_upper),
        })
        .collect();
    let coefficient_table = format_table(&rows, None);

    let diagnostics = format!(
        "Durbin-Watson: {:.4}   Jarque-Bera: {:.4} (p = {:.4})\n\
         Skewness: {:.4}   Excess kurtosis: {:.4}   Condition number: {:.1}",
        fitted.durbin_watson,
        fitted.jarque_bera,
        fitted.jarque_bera_pvalue,
        fitted.skewness,
        fitted.excess_kurtosis,
        fitted.condition_number
    );

    format!(
        "{}\n{}\n{}\n\n{}\n\n{}\n",
        fitted.model,
        "=".repeat(fitted.model.len()),
        statistics,
        coefficient_table,
        diagnostics
    )
}
