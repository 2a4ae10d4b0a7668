//! Top-contributor selection.
//!
//! Ranks a customer's per-feature contributions by absolute magnitude and
//! builds the two ranked tables shown on the dashboard: the customer's own
//! top N, and the population-wide top N (by precomputed mean absolute
//! attribution) annotated with the customer's values.

use credlens_core::error::{CredlensError, Result};
use credlens_core::types::MeanAbsTable;
use serde::Serialize;

/// Feature names longer than this are truncated for table display.
const NAME_DISPLAY_LIMIT: usize = 30;

/// One row of the customer-specific top table.
#[derive(Debug, Clone, Serialize)]
pub struct ContributionRow {
    pub name: String,
    /// The customer's raw feature value.
    pub value: f64,
    /// The customer's signed contribution for this feature.
    pub impact: f64,
}

/// One row of the population-wide top table.
#[derive(Debug, Clone, Serialize)]
pub struct OverallRow {
    pub name: String,
    /// Mean absolute contribution across the reference population.
    pub mean_impact: f64,
    pub value: f64,
    pub impact: f64,
}

/// Contributions folded out of the top-N set.
///
/// `sum` is their signed total, `count` how many features were folded in.
/// When N covers every feature the bucket is empty: sum 0, count 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OthersBucket {
    pub sum: f64,
    pub count: usize,
}

/// Both ranked tables for one (customer, N) pair.
#[derive(Debug, Clone, Serialize)]
pub struct TopTables {
    pub customer: Vec<ContributionRow>,
    pub overall: Vec<OverallRow>,
}

/// Indices of the `n` largest contributions by absolute value, in
/// descending order. The sort is stable: ties keep the original feature
/// order.
pub fn top_indices_by_abs(contributions: &[f64], n: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..contributions.len()).collect();
    indices.sort_by(|&a, &b| {
        contributions[b]
            .abs()
            .partial_cmp(&contributions[a].abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    indices.truncate(n);
    indices
}

/// Fold every contribution outside `top` into a single bucket.
pub fn others_bucket(contributions: &[f64], top: &[usize]) -> OthersBucket {
    let mut in_top = vec![false; contributions.len()];
    for &i in top {
        in_top[i] = true;
    }
    let mut sum = 0.0;
    let mut count = 0;
    for (i, &c) in contributions.iter().enumerate() {
        if !in_top[i] {
            sum += c;
            count += 1;
        }
    }
    OthersBucket { sum, count }
}

fn display_name(name: &str) -> String {
    name.chars().take(NAME_DISPLAY_LIMIT).collect()
}

/// Build both top-N tables.
///
/// `values` and `contributions` are indexed by `feature_names`' order. An
/// entry of the mean-attribution ranking that names a feature absent from
/// the table is a malformed-selection error, not silently skipped.
pub fn top_tables(
    feature_names: &[String],
    values: &[f64],
    contributions: &[f64],
    mean_abs: &MeanAbsTable,
    n: usize,
) -> Result<TopTables> {
    let customer = top_indices_by_abs(contributions, n)
        .into_iter()
        .map(|i| ContributionRow {
            name: display_name(&feature_names[i]),
            value: values[i],
            impact: contributions[i],
        })
        .collect();

    let mut overall = Vec::new();
    for entry in mean_abs.top(n) {
        let i = feature_names
            .iter()
            .position(|f| *f == entry.name)
            .ok_or_else(|| CredlensError::unknown_criteria(&entry.name))?;
        overall.push(OverallRow {
            name: display_name(&entry.name),
            mean_impact: entry.mean_abs,
            value: values[i],
            impact: contributions[i],
        });
    }

    Ok(TopTables { customer, overall })
}
