//! Waterfall construction: from base value to final risk score.

use crate::top::{others_bucket, top_indices_by_abs, OthersBucket};
use serde::Serialize;

/// One bar of the waterfall.
#[derive(Debug, Clone, Serialize)]
pub struct WaterfallBar {
    pub label: String,
    pub value: f64,
}

/// The full waterfall for one (customer, N) pair.
///
/// Bars start with the aggregated "others" bucket, then the top-N features
/// ascending by absolute contribution, so the largest-magnitude bar is
/// drawn last. `base_value + Σ bar values` reproduces the aggregated risk
/// score within floating-point tolerance.
#[derive(Debug, Clone, Serialize)]
pub struct WaterfallSpec {
    pub bars: Vec<WaterfallBar>,
    /// Score attributable to no feature information.
    pub base_value: f64,
    /// Cumulative end position: base value plus every bar.
    pub final_value: f64,
    /// The decision threshold on the contribution scale (always 0).
    pub threshold_position: f64,
    pub others: OthersBucket,
}

/// Build the waterfall for one customer.
///
/// The "others" bar is kept even when empty (N at or beyond the feature
/// count), with value 0 and count 0.
pub fn build_waterfall(
    feature_names: &[String],
    contributions: &[f64],
    base_value: f64,
    n: usize,
) -> WaterfallSpec {
    let top = top_indices_by_abs(contributions, n);
    let others = others_bucket(contributions, &top);

    let mut bars = Vec::with_capacity(top.len() + 1);
    bars.push(WaterfallBar {
        label: format!("others (n={})", others.count),
        value: others.sum,
    });
    // Ascending by |contribution|: reverse of the descending top ranking.
    for &i in top.iter().rev() {
        bars.push(WaterfallBar {
            label: feature_names[i].clone(),
            value: contributions[i],
        });
    }

    let final_value = base_value + bars.iter().map(|b| b.value).sum::<f64>();

    WaterfallSpec {
        bars,
        base_value,
        final_value,
        threshold_position: 0.0,
        others,
    }
}
