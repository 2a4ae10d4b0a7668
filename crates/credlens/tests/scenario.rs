//! End-to-end scenario over a synthetic three-feature artifact directory.

use credlens::prelude::*;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

fn write_gz(dir: &Path, name: &str, content: &str) {
    let file = File::create(dir.join(name)).unwrap();
    let mut enc = GzEncoder::new(file, Compression::default());
    enc.write_all(content.as_bytes()).unwrap();
    enc.finish().unwrap();
}

/// One customer with features [2, 3, 1]; a single classifier whose denial
/// probability is a constant 0.2 (zero weights, intercept ln(0.2/0.8));
/// a single explainer contributing [0.05, -0.1, 0.0] with base value 0.25.
fn scenario_dir() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();

    write_gz(
        dir,
        "customers_values.csv.gz",
        "SK_ID_CURR,f_one,f_two,f_three\n1,2.0,3.0,1.0\n",
    );
    write_gz(
        dir,
        "criteria_descriptions.csv.gz",
        "Row,Description\nf_one,First criteria\nf_two,Second criteria\nf_three,Third criteria\n",
    );
    let intercept = (0.2f64 / 0.8).ln();
    std::fs::write(
        dir.join("classifiers.json"),
        format!(
            r#"[{{"weights":[0.0,0.0,0.0],"intercept":{}}}]"#,
            intercept
        ),
    )
    .unwrap();
    std::fs::write(
        dir.join("explainers.json"),
        r#"[{"weights":[0.05,-0.1,0.0],"feature_means":[1.0,2.0,0.0],"expected_value":0.25}]"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("panel_hist.json"),
        r#"{"heights":[20.0,50.0,20.0,10.0],"edges":[0.0,0.1,0.2,0.3]}"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("mean_abs_shap.json"),
        r#"{"f_one":0.04,"f_two":0.2,"f_three":0.01}"#,
    )
    .unwrap();
    write_gz(
        dir,
        "shap_values.csv.gz",
        "SK_ID_CURR,f_one,f_two,f_three,est_risk\n1,0.05,-0.1,0.0,0.2\n",
    );

    tmp
}

#[test]
fn decision_waterfall_and_tables_agree() {
    let tmp = scenario_dir();
    let ctx = AppContext::load(tmp.path(), DashboardConfig::default()).unwrap();
    let id = CustomerId(1);

    // Constant classifier: risk 0.2, below the 0.3 threshold.
    let decision = predict_decision(&ctx, id).unwrap();
    assert!((decision.risk - 0.2).abs() < 1e-9);
    assert!(decision.granted);

    // Attribution reconstructs the risk score.
    let attribution = explain_customer(&ctx, id).unwrap();
    assert!((attribution.reconstructed_score() - 0.2).abs() < 1e-6);

    // Waterfall ends at base + total contribution = 0.20.
    let spec = build_waterfall(
        &ctx.customers.feature_names,
        &attribution.contributions,
        attribution.base_value,
        2,
    );
    assert!((spec.final_value - 0.2).abs() < 1e-9);
    assert_eq!(spec.others.count, 1);

    // Ranked tables: f_two dominates for the customer, and leads the
    // population ranking too.
    let row = ctx.customers.row(id).unwrap();
    let tables = top_tables(
        &ctx.customers.feature_names,
        &row.values,
        &attribution.contributions,
        &ctx.mean_abs,
        2,
    )
    .unwrap();
    assert_eq!(tables.customer[0].name, "f_two");
    assert_eq!(tables.overall[0].name, "f_two");

    // Panel figure highlights the 0.2 bin.
    let bin = ctx.panel.bin_for(decision.risk).unwrap();
    assert!((bin.edge - 0.2).abs() < 1e-12);
    let figure = panel_figure(&ctx.panel, ctx.config.threshold, Some(bin));
    assert_eq!(figure.layout.shapes.len(), 2);

    // Scatter clamps panel risk into [0, threshold].
    let scatter = build_scatter(
        &ctx.customers,
        &ctx.shap_panel,
        &ValueLabels::builtin(),
        "f_two",
        ctx.config.threshold,
        Some((row, &attribution)),
    )
    .unwrap();
    assert_eq!(scatter.points.len(), 1);
    assert!(scatter.points[0].risk <= ctx.config.threshold);
    let json = serde_json::to_value(scatter_figure(&scatter, ctx.config.threshold)).unwrap();
    assert_eq!(json["data"][0]["type"], "scatter");
}
