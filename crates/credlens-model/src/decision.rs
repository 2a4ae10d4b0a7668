//! The decision engine: risk score and loan decision for one customer.

use crate::context::AppContext;
use credlens_core::error::{CredlensError, Result};
use credlens_core::types::{Attribution, CustomerId, Decision};

/// Predict whether the loan shall be granted for a given customer.
///
/// The risk score is the classifier ensemble's mean probability of denial;
/// the loan is granted iff that score is strictly below the configured
/// threshold. An unknown customer id is an error, never a default.
pub fn predict_decision(ctx: &AppContext, customer_id: CustomerId) -> Result<Decision> {
    let row = ctx
        .customers
        .row(customer_id)
        .ok_or_else(|| CredlensError::customer_not_found(customer_id))?;
    let risk = ctx.classifiers.risk(&row.values);
    Ok(Decision::from_risk(risk, ctx.config.threshold))
}

/// Aggregated Shapley attribution for a given customer.
///
/// Callers that need both the attribution and derived views (waterfall,
/// top tables) compute it once and pass it along explicitly.
pub fn explain_customer(ctx: &AppContext, customer_id: CustomerId) -> Result<Attribution> {
    let row = ctx
        .customers
        .row(customer_id)
        .ok_or_else(|| CredlensError::customer_not_found(customer_id))?;
    ctx.explainers
        .aggregate(&row.values, ctx.customers.feature_count())
}
