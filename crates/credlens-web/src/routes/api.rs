//! REST API endpoints for the dashboard.

use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use credlens_core::error::CredlensError;
use credlens_core::types::CustomerId;
use credlens_explain::{build_scatter, build_waterfall, top_tables};
use credlens_viz::{panel_figure, scatter_figure, top_table_views, waterfall_figure, Figure, TableView};
use serde::{Deserialize, Serialize};

/// Error wrapper mapping domain errors onto HTTP statuses.
pub struct ApiError(CredlensError);

impl From<CredlensError> for ApiError {
    fn from(e: CredlensError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CredlensError::Customer(_) | CredlensError::Criteria(_) => StatusCode::NOT_FOUND,
            CredlensError::Config(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!(error = %self.0, status = %status, "request failed");
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Dashboard parameters for the front-end.
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub threshold: f64,
    pub top_min: usize,
    pub top_max: usize,
    pub top_step: usize,
    pub top_default: usize,
    pub customer_count: usize,
}

/// Get dashboard configuration.
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    let ctx = state.context();
    Json(ConfigResponse {
        threshold: ctx.config.threshold,
        top_min: ctx.config.top.min,
        top_max: ctx.config.top.max,
        top_step: ctx.config.top.step,
        top_default: ctx.config.top.default,
        customer_count: ctx.customers.len(),
    })
}

/// A dropdown option.
#[derive(Debug, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// Get customer selector options.
pub async fn get_customers(State(state): State<AppState>) -> Json<Vec<SelectOption>> {
    let options = state
        .context()
        .customers
        .ids()
        .map(|id| SelectOption {
            label: id.to_string(),
            value: id.to_string(),
        })
        .collect();
    Json(options)
}

/// Risk score and decision for one customer.
#[derive(Debug, Serialize)]
pub struct DecisionResponse {
    pub risk: f64,
    pub granted: bool,
    pub threshold: f64,
}

/// Get risk score and decision.
pub async fn get_decision(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<DecisionResponse> {
    let decision = state.decision(CustomerId(id))?;
    Ok(Json(DecisionResponse {
        risk: decision.risk,
        granted: decision.granted,
        threshold: state.context().config.threshold,
    }))
}

/// Get the panel histogram figure with the customer's bin highlighted.
pub async fn get_panel(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Figure> {
    let ctx = state.context();
    let decision = state.decision(CustomerId(id))?;
    let highlight = ctx.panel.bin_for(decision.risk);
    Ok(Json(panel_figure(&ctx.panel, ctx.config.threshold, highlight)))
}

/// Top-N query parameter.
#[derive(Debug, Deserialize)]
pub struct TopQuery {
    #[serde(default = "default_top")]
    pub top: usize,
}

fn default_top() -> usize {
    15
}

/// Get the waterfall figure for one customer.
pub async fn get_waterfall(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<TopQuery>,
) -> ApiResult<Figure> {
    let ctx = state.context();
    let n = ctx.config.clamp_top(query.top);
    let attribution = state.attribution(CustomerId(id))?;
    let spec = build_waterfall(
        &ctx.customers.feature_names,
        &attribution.contributions,
        attribution.base_value,
        n,
    );
    Ok(Json(waterfall_figure(&spec, n)))
}

/// Both ranked top-N tables.
#[derive(Debug, Serialize)]
pub struct TopTablesResponse {
    pub customer: TableView,
    pub overall: TableView,
}

/// Get the customer-specific and population-wide top-N tables.
pub async fn get_top(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<TopQuery>,
) -> ApiResult<TopTablesResponse> {
    let ctx = state.context();
    let n = ctx.config.clamp_top(query.top);
    let customer_id = CustomerId(id);
    let row = ctx
        .customers
        .row(customer_id)
        .ok_or_else(|| CredlensError::customer_not_found(customer_id))?;
    let attribution = state.attribution(customer_id)?;
    let tables = top_tables(
        &ctx.customers.feature_names,
        &row.values,
        &attribution.contributions,
        &ctx.mean_abs,
        n,
    )?;
    let (customer, overall) = top_table_views(&tables, n);
    Ok(Json(TopTablesResponse { customer, overall }))
}

/// Get criteria selector options.
pub async fn get_criteria(State(state): State<AppState>) -> Json<Vec<SelectOption>> {
    let options = state
        .context()
        .criteria
        .entries()
        .iter()
        .map(|e| SelectOption {
            label: e.name.clone(),
            value: e.name.clone(),
        })
        .collect();
    Json(options)
}

/// One criteria's description, the customer's position on it, and the
/// partial-dependence scatter.
#[derive(Debug, Serialize)]
pub struct CriterionResponse {
    pub name: String,
    pub description: String,
    /// The selected customer's raw value, when a customer is selected.
    pub value: Option<f64>,
    /// The selected customer's signed contribution, when selected.
    pub impact: Option<f64>,
    pub scatter: Figure,
}

fn criterion_response(
    state: &AppState,
    name: &str,
    customer: Option<CustomerId>,
) -> Result<CriterionResponse, ApiError> {
    let ctx = state.context();
    let description = ctx
        .criteria
        .describe(name)
        .ok_or_else(|| CredlensError::unknown_criteria(name))?
        .to_string();

    let selected = match customer {
        Some(id) => {
            let row = ctx
                .customers
                .row(id)
                .ok_or_else(|| CredlensError::customer_not_found(id))?;
            Some((row.clone(), state.attribution(id)?))
        }
        None => None,
    };

    let scatter = build_scatter(
        &ctx.customers,
        &ctx.shap_panel,
        &ctx.value_labels,
        name,
        ctx.config.threshold,
        selected.as_ref().map(|(row, a)| (row, a)),
    )?;

    let (value, impact) = match (&selected, ctx.customers.feature_index(name)) {
        (Some((row, attribution)), Some(i)) => {
            (Some(row.values[i]), Some(attribution.contributions[i]))
        }
        _ => (None, None),
    };

    Ok(CriterionResponse {
        name: name.to_string(),
        description,
        value,
        impact,
        scatter: scatter_figure(&scatter, ctx.config.threshold),
    })
}

/// Get criteria details without a selected customer.
pub async fn get_criterion(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<CriterionResponse> {
    Ok(Json(criterion_response(&state, &name, None)?))
}

/// Get criteria details for a selected customer.
pub async fn get_customer_criterion(
    State(state): State<AppState>,
    Path((id, name)): Path<(i64, String)>,
) -> ApiResult<CriterionResponse> {
    Ok(Json(criterion_response(&state, &name, Some(CustomerId(id)))?))
}
