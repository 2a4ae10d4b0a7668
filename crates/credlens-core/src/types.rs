//! Shared types used across all credlens crates.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Unique identifier for a customer (the loan applicant's record key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub i64);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One customer's feature values, in the table's column order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: CustomerId,
    pub values: Vec<f64>,
}

/// The customer feature table, loaded once and immutable for the process
/// lifetime.
///
/// `feature_names` is the single source of truth for feature ordering:
/// every contribution vector produced downstream is indexed by position
/// against this list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerTable {
    pub feature_names: Vec<String>,
    records: Vec<CustomerRecord>,
    #[serde(skip)]
    index: HashMap<CustomerId, usize>,
}

impl CustomerTable {
    pub fn new(feature_names: Vec<String>, records: Vec<CustomerRecord>) -> Self {
        let index = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id, i))
            .collect();
        Self {
            feature_names,
            records,
            index,
        }
    }

    /// Keep only the first `cap` customers (dashboard sample cap).
    pub fn truncate(&mut self, cap: usize) {
        if self.records.len() > cap {
            self.records.truncate(cap);
            self.index.retain(|_, i| *i < cap);
        }
    }

    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up one customer's record. Unknown ids return `None`; callers
    /// surface that as an error rather than substituting a default row.
    pub fn row(&self, id: CustomerId) -> Option<&CustomerRecord> {
        self.index.get(&id).map(|&i| &self.records[i])
    }

    /// Position of a feature in the shared column order.
    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.feature_names.iter().position(|f| f == name)
    }

    pub fn ids(&self) -> impl Iterator<Item = CustomerId> + '_ {
        self.records.iter().map(|r| r.id)
    }

    pub fn records(&self) -> &[CustomerRecord] {
        &self.records
    }
}

/// One entry of the criteria-description catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriteriaEntry {
    pub name: String,
    pub description: String,
}

/// Static mapping from feature name to human-readable description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CriteriaCatalog {
    entries: Vec<CriteriaEntry>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl CriteriaCatalog {
    pub fn new(entries: Vec<CriteriaEntry>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.clone(), i))
            .collect();
        Self { entries, index }
    }

    pub fn describe(&self, name: &str) -> Option<&str> {
        self.index
            .get(name)
            .map(|&i| self.entries[i].description.as_str())
    }

    pub fn entries(&self) -> &[CriteriaEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Precomputed histogram of estimated risk over the reference panel.
///
/// Heights are normalized to percentages (they sum to 100); `edges` holds
/// the left edge of each bin on the risk scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelHistogram {
    pub heights: Vec<f64>,
    pub edges: Vec<f64>,
}

/// The panel bin a given risk value falls into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelBin {
    pub index: usize,
    pub edge: f64,
    pub height: f64,
}

impl PanelHistogram {
    /// Normalize raw bin counts to percentages.
    pub fn from_raw(heights: Vec<f64>, edges: Vec<f64>) -> Self {
        let total: f64 = heights.iter().sum();
        let heights = if total > 0.0 {
            heights.iter().map(|h| 100.0 * h / total).collect()
        } else {
            heights
        };
        Self { heights, edges }
    }

    /// Bin containing `risk`: the last edge at or below it.
    pub fn bin_for(&self, risk: f64) -> Option<PanelBin> {
        if self.heights.is_empty() {
            return None;
        }
        let index = self
            .edges
            .iter()
            .rposition(|&edge| edge <= risk)?
            .min(self.heights.len().saturating_sub(1));
        Some(PanelBin {
            index,
            edge: self.edges[index],
            height: self.heights[index],
        })
    }
}

/// One feature's mean absolute attribution over the reference panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeanAbsEntry {
    pub name: String,
    pub mean_abs: f64,
}

/// Population-wide attribution ranking, precomputed and static.
///
/// Entries are held sorted by descending mean absolute attribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeanAbsTable {
    entries: Vec<MeanAbsEntry>,
}

impl MeanAbsTable {
    pub fn new(mut entries: Vec<MeanAbsEntry>) -> Self {
        entries.sort_by(|a, b| {
            b.mean_abs
                .partial_cmp(&a.mean_abs)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self { entries }
    }

    /// The `n` features with largest mean absolute attribution.
    pub fn top(&self, n: usize) -> &[MeanAbsEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One reference customer's attributions plus their estimated risk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapRow {
    pub id: CustomerId,
    pub contributions: Vec<f64>,
    pub est_risk: f64,
}

/// Per-customer attribution values for the reference panel, used by the
/// partial-dependence scatter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapPanel {
    pub feature_names: Vec<String>,
    pub rows: Vec<ShapRow>,
}

impl ShapPanel {
    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.feature_names.iter().position(|f| f == name)
    }
}

/// A value on a chart axis: numeric, or a categorical label after
/// relabeling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    Number(f64),
    Label(String),
}

/// Fixed correspondence from encoded categorical values to display labels.
///
/// Unmapped features and unmapped values pass through unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValueLabels {
    entries: HashMap<String, Vec<(f64, String)>>,
}

impl ValueLabels {
    pub fn new(entries: HashMap<String, Vec<(f64, String)>>) -> Self {
        Self { entries }
    }

    /// The correspondence table shipped with the dashboard.
    pub fn builtin() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            "NAME_CONTRACT_TYPE".to_string(),
            vec![
                (0.0, "Cash loans".to_string()),
                (1.0, "Revolving loans".to_string()),
            ],
        );
        entries.insert(
            "CODE_GENDER".to_string(),
            vec![(0.0, "F".to_string()), (1.0, "M".to_string())],
        );
        Self { entries }
    }

    /// Relabel one value of one feature for display.
    pub fn relabel(&self, feature: &str, value: f64) -> AxisValue {
        if let Some(pairs) = self.entries.get(feature) {
            for (encoded, label) in pairs {
                if (encoded - value).abs() < f64::EPSILON {
                    return AxisValue::Label(label.clone());
                }
            }
        }
        AxisValue::Number(value)
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.entries.contains_key(feature)
    }
}

/// The loan decision derived from an aggregated risk score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Aggregated probability that the loan should be denied, in [0, 1].
    pub risk: f64,
    /// Granted iff risk is strictly below the threshold.
    pub granted: bool,
}

impl Decision {
    pub fn from_risk(risk: f64, threshold: f64) -> Self {
        Self {
            risk,
            granted: risk < threshold,
        }
    }
}

/// Aggregated feature attribution for one customer.
///
/// `contributions` is indexed by the customer table's column order;
/// `base_value` is the ensemble-average expected score with no feature
/// information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    pub contributions: Vec<f64>,
    pub base_value: f64,
}

impl Attribution {
    /// Sum of all contributions.
    pub fn total(&self) -> f64 {
        self.contributions.iter().sum()
    }

    /// Base value plus total contribution; reproduces the aggregated risk
    /// score up to floating-point rounding.
    pub fn reconstructed_score(&self) -> f64 {
        self.base_value + self.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CustomerTable {
        CustomerTable::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![
                CustomerRecord {
                    id: CustomerId(100),
                    values: vec![1.0, 2.0, 3.0],
                },
                CustomerRecord {
                    id: CustomerId(101),
                    values: vec![4.0, 5.0, 6.0],
                },
            ],
        )
    }

    #[test]
    fn row_lookup_by_id() {
        let t = table();
        assert_eq!(t.row(CustomerId(101)).unwrap().values[0], 4.0);
        assert!(t.row(CustomerId(999)).is_none());
    }

    #[test]
    fn truncate_drops_later_rows_and_index_entries() {
        let mut t = table();
        t.truncate(1);
        assert_eq!(t.len(), 1);
        assert!(t.row(CustomerId(100)).is_some());
        assert!(t.row(CustomerId(101)).is_none());
    }

    #[test]
    fn feature_index_follows_column_order() {
        let t = table();
        assert_eq!(t.feature_index("b"), Some(1));
        assert_eq!(t.feature_index("z"), None);
    }

    #[test]
    fn histogram_normalizes_to_percent() {
        let h = PanelHistogram::from_raw(vec![1.0, 3.0], vec![0.0, 0.5]);
        assert!((h.heights[0] - 25.0).abs() < 1e-12);
        assert!((h.heights[1] - 75.0).abs() < 1e-12);
    }

    #[test]
    fn bin_lookup_takes_last_edge_at_or_below() {
        let h = PanelHistogram::from_raw(vec![1.0, 1.0, 1.0], vec![0.0, 0.1, 0.2]);
        assert_eq!(h.bin_for(0.15).unwrap().index, 1);
        assert_eq!(h.bin_for(0.1).unwrap().index, 1);
        assert_eq!(h.bin_for(0.9).unwrap().index, 2);
        assert!(h.bin_for(-0.1).is_none());
    }

    #[test]
    fn mean_abs_table_is_sorted_descending() {
        let t = MeanAbsTable::new(vec![
            MeanAbsEntry {
                name: "low".into(),
                mean_abs: 0.01,
            },
            MeanAbsEntry {
                name: "high".into(),
                mean_abs: 0.5,
            },
        ]);
        assert_eq!(t.top(1)[0].name, "high");
        assert_eq!(t.top(10).len(), 2);
    }

    #[test]
    fn relabel_maps_known_values_only() {
        let labels = ValueLabels::builtin();
        assert_eq!(
            labels.relabel("CODE_GENDER", 1.0),
            AxisValue::Label("M".into())
        );
        assert_eq!(
            labels.relabel("CODE_GENDER", 7.0),
            AxisValue::Number(7.0)
        );
        assert_eq!(labels.relabel("AMT_CREDIT", 2.5), AxisValue::Number(2.5));
    }

    #[test]
    fn decision_boundary_denies_at_threshold() {
        assert!(Decision::from_risk(0.29, 0.3).granted);
        assert!(!Decision::from_risk(0.3, 0.3).granted);
        assert!(!Decision::from_risk(0.31, 0.3).granted);
    }

    #[test]
    fn attribution_reconstruction() {
        let a = Attribution {
            contributions: vec![0.05, -0.1, 0.0],
            base_value: 0.25,
        };
        assert!((a.reconstructed_score() - 0.20).abs() < 1e-12);
    }
}
