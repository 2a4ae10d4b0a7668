//! Partial-dependence scatter data: how a feature's attribution moves with
//! its value across the reference population.

use credlens_core::error::{CredlensError, Result};
use credlens_core::types::{Attribution, AxisValue, CustomerRecord, CustomerTable, ShapPanel, ValueLabels};
use serde::Serialize;

/// One reference customer's point.
#[derive(Debug, Clone, Serialize)]
pub struct ScatterPoint {
    /// Feature value, relabeled for categorical features.
    pub value: AxisValue,
    /// Signed attribution of this feature for this customer.
    pub impact: f64,
    /// Estimated risk, clipped to [0, threshold] for color-scale
    /// stability: anything above the threshold shows as the threshold.
    pub risk: f64,
}

/// The selected customer's own position on the plot.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerMarker {
    pub value: AxisValue,
    pub impact: f64,
}

/// Scatter data for one feature.
#[derive(Debug, Clone, Serialize)]
pub struct ScatterData {
    pub feature: String,
    pub points: Vec<ScatterPoint>,
    pub customer: Option<CustomerMarker>,
}

/// Build partial-dependence points for `feature`.
///
/// Each reference-panel attribution row is joined to the customer table by
/// id; rows without a matching customer are dropped. When a selected
/// customer is supplied, their (value, attribution) point is overlaid.
pub fn build_scatter(
    customers: &CustomerTable,
    shap_panel: &ShapPanel,
    labels: &ValueLabels,
    feature: &str,
    threshold: f64,
    selected: Option<(&CustomerRecord, &Attribution)>,
) -> Result<ScatterData> {
    let value_idx = customers
        .feature_index(feature)
        .ok_or_else(|| CredlensError::unknown_criteria(feature))?;
    let shap_idx = shap_panel
        .feature_index(feature)
        .ok_or_else(|| CredlensError::unknown_criteria(feature))?;

    let mut points = Vec::new();
    for row in &shap_panel.rows {
        let Some(record) = customers.row(row.id) else {
            continue;
        };
        points.push(ScatterPoint {
            value: labels.relabel(feature, record.values[value_idx]),
            impact: row.contributions[shap_idx],
            risk: row.est_risk.clamp(0.0, threshold),
        });
    }

    let customer = selected.map(|(record, attribution)| CustomerMarker {
        value: labels.relabel(feature, record.values[value_idx]),
        impact: attribution.contributions[value_idx],
    });

    Ok(ScatterData {
        feature: feature.to_string(),
        points,
        customer,
    })
}
