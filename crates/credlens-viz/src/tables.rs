//! Ranked-table views for the "most important criteria" section.

use credlens_explain::TopTables;
use serde::Serialize;

/// A table ready for front-end rendering: title, column headers, and rows
/// of display strings.
#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn round3(v: f64) -> String {
    format!("{:.3}", v)
}

/// Render both top-N tables: the customer-specific ranking and the
/// population-wide ranking annotated with the customer's values.
pub fn top_table_views(tables: &TopTables, n_top: usize) -> (TableView, TableView) {
    let customer = TableView {
        title: format!("Top {} criteria - Customer", n_top),
        columns: vec!["Criteria".into(), "Values".into(), "Impact".into()],
        rows: tables
            .customer
            .iter()
            .map(|r| vec![r.name.clone(), round3(r.value), round3(r.impact)])
            .collect(),
    };

    let overall = TableView {
        title: format!("Top {} criteria - Overall", n_top),
        columns: vec![
            "Criteria".into(),
            "Mean impact".into(),
            "Values".into(),
            "Impact".into(),
        ],
        rows: tables
            .overall
            .iter()
            .map(|r| {
                vec![
                    r.name.clone(),
                    round3(r.mean_impact),
                    round3(r.value),
                    round3(r.impact),
                ]
            })
            .collect(),
    };

    (customer, overall)
}
