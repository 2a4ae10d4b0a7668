//! Artifact loading and the immutable application context.
//!
//! Every input the dashboard needs is read here, once, at startup. A
//! missing or malformed artifact aborts startup; nothing is defaulted.
//! After `AppContext::load` returns, the context is never mutated.

use crate::classifier::{Classifier, ClassifierEnsemble, LogisticScorer};
use crate::explainer::{Explainer, ExplainerEnsemble, LinearExplainer};
use credlens_core::config::DashboardConfig;
use credlens_core::error::{CredlensError, Result};
use credlens_core::types::{
    CriteriaCatalog, CriteriaEntry, CustomerId, CustomerRecord, CustomerTable, MeanAbsEntry,
    MeanAbsTable, PanelHistogram, ShapPanel, ShapRow, ValueLabels,
};
use flate2::read::GzDecoder;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Artifact file names inside the data directory.
pub const CUSTOMERS_FILE: &str = "customers_values.csv.gz";
pub const CRITERIA_FILE: &str = "criteria_descriptions.csv.gz";
pub const CLASSIFIERS_FILE: &str = "classifiers.json";
pub const EXPLAINERS_FILE: &str = "explainers.json";
pub const PANEL_FILE: &str = "panel_hist.json";
pub const MEAN_ABS_FILE: &str = "mean_abs_shap.json";
pub const SHAP_PANEL_FILE: &str = "shap_values.csv.gz";

/// Column carrying the customer id in the feature table.
const ID_COLUMN: &str = "SK_ID_CURR";

/// Bookkeeping columns that are not model features.
const DROPPED_COLUMNS: &[&str] = &["TARGET", "SK_ID_BUREAU", "SK_ID_PREV", "index", "source"];

/// Risk column of the reference-panel attribution table.
const EST_RISK_COLUMN: &str = "est_risk";

/// Everything the dashboard knows, loaded once and shared read-only.
#[derive(Debug)]
pub struct AppContext {
    pub config: DashboardConfig,
    pub customers: CustomerTable,
    pub criteria: CriteriaCatalog,
    pub classifiers: ClassifierEnsemble,
    pub explainers: ExplainerEnsemble,
    pub panel: PanelHistogram,
    pub mean_abs: MeanAbsTable,
    pub shap_panel: ShapPanel,
    pub value_labels: ValueLabels,
}

impl AppContext {
    /// Load every artifact from `data_dir`.
    pub fn load(data_dir: impl AsRef<Path>, config: DashboardConfig) -> Result<Self> {
        config.validate()?;
        let dir = data_dir.as_ref();

        let mut customers = load_customers(&dir.join(CUSTOMERS_FILE))?;
        if let Some(cap) = config.sample_cap {
            customers.truncate(cap);
        }

        let criteria = load_criteria(&dir.join(CRITERIA_FILE))?;
        let classifiers = load_classifiers(&dir.join(CLASSIFIERS_FILE), customers.feature_count())?;
        let explainers = load_explainers(
            &dir.join(EXPLAINERS_FILE),
            customers.feature_count(),
            classifiers.len(),
        )?;
        let panel = load_panel(&dir.join(PANEL_FILE))?;
        let mean_abs = load_mean_abs(&dir.join(MEAN_ABS_FILE))?;
        let shap_panel = load_shap_panel(&dir.join(SHAP_PANEL_FILE))?;

        Ok(Self {
            config,
            customers,
            criteria,
            classifiers,
            explainers,
            panel,
            mean_abs,
            shap_panel,
            value_labels: ValueLabels::builtin(),
        })
    }
}

fn require(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CredlensError::artifact_missing(path.display().to_string()));
    }
    Ok(())
}

fn gzip_csv_reader(path: &Path) -> Result<csv::Reader<GzDecoder<File>>> {
    require(path)?;
    let file = File::open(path).map_err(|e| {
        CredlensError::artifact_unreadable(path.display().to_string(), e.to_string())
    })?;
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(GzDecoder::new(file)))
}

fn invalid(path: &Path, reason: impl Into<String>) -> CredlensError {
    CredlensError::artifact_invalid(path.display().to_string(), reason)
}

fn parse_field(path: &Path, row: usize, name: &str, raw: &str) -> Result<f64> {
    raw.trim().parse::<f64>().map_err(|_| {
        invalid(
            path,
            format!("row {}: column {} is not numeric: {:?}", row, name, raw),
        )
    })
}

/// Load the customer feature table from a gzip-compressed CSV.
///
/// The `SK_ID_CURR` column keys the rows; bookkeeping columns are dropped;
/// every remaining column is a numeric feature. Column order defines the
/// feature ordering used by all downstream consumers.
fn load_customers(path: &Path) -> Result<CustomerTable> {
    let mut reader = gzip_csv_reader(path)?;
    let headers = reader
        .headers()
        .map_err(|e| invalid(path, e.to_string()))?
        .clone();

    let id_col = headers
        .iter()
        .position(|h| h == ID_COLUMN)
        .ok_or_else(|| invalid(path, format!("missing {} column", ID_COLUMN)))?;

    let mut feature_cols = Vec::new();
    let mut feature_names = Vec::new();
    for (i, name) in headers.iter().enumerate() {
        if i == id_col || name.is_empty() || DROPPED_COLUMNS.contains(&name) {
            continue;
        }
        feature_cols.push(i);
        feature_names.push(name.to_string());
    }
    if feature_names.is_empty() {
        return Err(invalid(path, "no feature columns"));
    }

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|e| invalid(path, e.to_string()))?;
        let id = record
            .get(id_col)
            .and_then(|s| s.trim().parse::<i64>().ok())
            .ok_or_else(|| invalid(path, format!("row {}: bad customer id", row)))?;
        let mut values = Vec::with_capacity(feature_cols.len());
        for (&col, name) in feature_cols.iter().zip(&feature_names) {
            let raw = record
                .get(col)
                .ok_or_else(|| invalid(path, format!("row {}: short record", row)))?;
            values.push(parse_field(path, row, name, raw)?);
        }
        records.push(CustomerRecord {
            id: CustomerId(id),
            values,
        });
    }

    Ok(CustomerTable::new(feature_names, records))
}

/// Load the criteria-description catalog from a gzip-compressed CSV with
/// `Row` and `Description` columns. The id and target rows are not
/// criteria and are skipped.
fn load_criteria(path: &Path) -> Result<CriteriaCatalog> {
    let mut reader = gzip_csv_reader(path)?;
    let headers = reader
        .headers()
        .map_err(|e| invalid(path, e.to_string()))?
        .clone();

    let name_col = headers
        .iter()
        .position(|h| h == "Row")
        .ok_or_else(|| invalid(path, "missing Row column"))?;
    let descr_col = headers
        .iter()
        .position(|h| h == "Description")
        .ok_or_else(|| invalid(path, "missing Description column"))?;

    let mut entries = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| invalid(path, e.to_string()))?;
        let name = record.get(name_col).unwrap_or_default().trim();
        if name.is_empty() || name == ID_COLUMN || name == "TARGET" {
            continue;
        }
        entries.push(CriteriaEntry {
            name: name.to_string(),
            description: record.get(descr_col).unwrap_or_default().trim().to_string(),
        });
    }

    Ok(CriteriaCatalog::new(entries))
}

fn load_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    require(path)?;
    let file = File::open(path).map_err(|e| {
        CredlensError::artifact_unreadable(path.display().to_string(), e.to_string())
    })?;
    serde_json::from_reader(file).map_err(|e| invalid(path, e.to_string()))
}

/// Load the serialized classifier list and wrap it as an ensemble.
fn load_classifiers(path: &Path, feature_count: usize) -> Result<ClassifierEnsemble> {
    let scorers: Vec<LogisticScorer> = load_json(path)?;
    for (i, scorer) in scorers.iter().enumerate() {
        if scorer.weights.len() != feature_count {
            return Err(invalid(
                path,
                format!(
                    "classifier {} expects {} features, table has {}",
                    i,
                    scorer.weights.len(),
                    feature_count
                ),
            ));
        }
    }
    if scorers.is_empty() {
        return Err(invalid(path, "empty classifier list"));
    }
    ClassifierEnsemble::new(
        scorers
            .into_iter()
            .map(|s| Box::new(s) as Box<dyn Classifier>)
            .collect(),
    )
}

/// Load the serialized explainer list, one per classifier.
fn load_explainers(
    path: &Path,
    feature_count: usize,
    classifier_count: usize,
) -> Result<ExplainerEnsemble> {
    let explainers: Vec<LinearExplainer> = load_json(path)?;
    if explainers.len() != classifier_count {
        return Err(invalid(
            path,
            format!(
                "{} explainers for {} classifiers",
                explainers.len(),
                classifier_count
            ),
        ));
    }
    for (i, e) in explainers.iter().enumerate() {
        if e.weights.len() != feature_count || e.feature_means.len() != feature_count {
            return Err(invalid(
                path,
                format!("explainer {} does not match {} features", i, feature_count),
            ));
        }
    }
    ExplainerEnsemble::new(
        explainers
            .into_iter()
            .map(|e| Box::new(e) as Box<dyn Explainer>)
            .collect(),
    )
}

#[derive(Deserialize)]
struct RawHistogram {
    heights: Vec<f64>,
    edges: Vec<f64>,
}

/// Load the precomputed panel histogram and normalize heights to percent.
fn load_panel(path: &Path) -> Result<PanelHistogram> {
    let raw: RawHistogram = load_json(path)?;
    if raw.heights.is_empty() || raw.edges.len() < raw.heights.len() {
        return Err(invalid(path, "histogram edges do not cover heights"));
    }
    Ok(PanelHistogram::from_raw(raw.heights, raw.edges))
}

/// Load the precomputed mean absolute attribution per feature.
fn load_mean_abs(path: &Path) -> Result<MeanAbsTable> {
    let raw: HashMap<String, f64> = load_json(path)?;
    if raw.is_empty() {
        return Err(invalid(path, "empty mean attribution table"));
    }
    Ok(MeanAbsTable::new(
        raw.into_iter()
            .map(|(name, mean_abs)| MeanAbsEntry { name, mean_abs })
            .collect(),
    ))
}

/// Load the reference-panel attribution table (one row per panel customer,
/// keyed by id, one column per feature plus `est_risk`).
fn load_shap_panel(path: &Path) -> Result<ShapPanel> {
    let mut reader = gzip_csv_reader(path)?;
    let headers = reader
        .headers()
        .map_err(|e| invalid(path, e.to_string()))?
        .clone();

    let risk_col = headers
        .iter()
        .position(|h| h == EST_RISK_COLUMN)
        .ok_or_else(|| invalid(path, format!("missing {} column", EST_RISK_COLUMN)))?;
    let id_col = headers
        .iter()
        .position(|h| h == ID_COLUMN)
        .ok_or_else(|| invalid(path, format!("missing {} column", ID_COLUMN)))?;

    let mut feature_cols = Vec::new();
    let mut feature_names = Vec::new();
    for (i, name) in headers.iter().enumerate() {
        if i == risk_col || i == id_col || name.is_empty() {
            continue;
        }
        feature_cols.push(i);
        feature_names.push(name.to_string());
    }

    let mut rows = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|e| invalid(path, e.to_string()))?;
        let id = record
            .get(id_col)
            .and_then(|s| s.trim().parse::<i64>().ok())
            .ok_or_else(|| invalid(path, format!("row {}: bad customer id", row)))?;
        let est_risk = parse_field(path, row, EST_RISK_COLUMN, record.get(risk_col).unwrap_or(""))?;
        let mut contributions = Vec::with_capacity(feature_cols.len());
        for (&col, name) in feature_cols.iter().zip(&feature_names) {
            let raw = record
                .get(col)
                .ok_or_else(|| invalid(path, format!("row {}: short record", row)))?;
            contributions.push(parse_field(path, row, name, raw)?);
        }
        rows.push(ShapRow {
            id: CustomerId(id),
            contributions,
            est_risk,
        });
    }

    Ok(ShapPanel {
        feature_names,
        rows,
    })
}

/// Resolve the data directory: explicit flag, else `CREDLENS_DATA_DIR`,
/// else `data/` beside the current working directory.
pub fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var("CREDLENS_DATA_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("data"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_gz(dir: &Path, name: &str, content: &str) {
        let file = File::create(dir.join(name)).unwrap();
        let mut enc = GzEncoder::new(file, Compression::default());
        enc.write_all(content.as_bytes()).unwrap();
        enc.finish().unwrap();
    }

    fn write_json(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    /// A complete three-feature fixture directory.
    fn fixture_dir() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        write_gz(
            dir,
            CUSTOMERS_FILE,
            "SK_ID_CURR,TARGET,AMT_CREDIT,CODE_GENDER,EXT_SOURCE_1\n\
             100001,0,5000.0,1,0.7\n\
             100002,1,9000.0,0,0.2\n\
             100003,0,1000.0,1,0.9\n",
        );
        write_gz(
            dir,
            CRITERIA_FILE,
            "Row,Description\n\
             SK_ID_CURR,ID of loan\n\
             AMT_CREDIT,Credit amount of the loan\n\
             CODE_GENDER,Gender of the client\n\
             EXT_SOURCE_1,Normalized score from external data source\n",
        );
        write_json(
            dir,
            CLASSIFIERS_FILE,
            r#"[{"weights":[0.0001,-0.5,-2.0],"intercept":-0.4},
                {"weights":[0.0002,-0.3,-1.5],"intercept":-0.6}]"#,
        );
        write_json(
            dir,
            EXPLAINERS_FILE,
            r#"[{"weights":[0.0001,-0.5,-2.0],"feature_means":[4000.0,0.5,0.5],"expected_value":0.3},
                {"weights":[0.0002,-0.3,-1.5],"feature_means":[4000.0,0.5,0.5],"expected_value":0.35}]"#,
        );
        write_json(
            dir,
            PANEL_FILE,
            r#"{"heights":[10.0,40.0,30.0,20.0],"edges":[0.0,0.1,0.2,0.3]}"#,
        );
        write_json(
            dir,
            MEAN_ABS_FILE,
            r#"{"AMT_CREDIT":0.02,"CODE_GENDER":0.01,"EXT_SOURCE_1":0.15}"#,
        );
        write_gz(
            dir,
            SHAP_PANEL_FILE,
            "SK_ID_CURR,AMT_CREDIT,CODE_GENDER,EXT_SOURCE_1,est_risk\n\
             100001,0.01,-0.02,0.1,0.25\n\
             100002,-0.03,0.04,-0.2,0.05\n",
        );
        tmp
    }

    #[test]
    fn loads_complete_fixture() {
        let tmp = fixture_dir();
        let ctx = AppContext::load(tmp.path(), DashboardConfig::default()).unwrap();
        assert_eq!(ctx.customers.len(), 3);
        assert_eq!(
            ctx.customers.feature_names,
            vec!["AMT_CREDIT", "CODE_GENDER", "EXT_SOURCE_1"]
        );
        assert_eq!(ctx.classifiers.len(), 2);
        assert_eq!(ctx.explainers.len(), 2);
        // TARGET row dropped, SK_ID_CURR row dropped
        assert_eq!(ctx.criteria.len(), 3);
        assert!((ctx.panel.heights.iter().sum::<f64>() - 100.0).abs() < 1e-9);
        assert_eq!(ctx.mean_abs.top(1)[0].name, "EXT_SOURCE_1");
        assert_eq!(ctx.shap_panel.rows.len(), 2);
    }

    #[test]
    fn sample_cap_truncates_customers() {
        let tmp = fixture_dir();
        let config = DashboardConfig {
            sample_cap: Some(2),
            ..DashboardConfig::default()
        };
        let ctx = AppContext::load(tmp.path(), config).unwrap();
        assert_eq!(ctx.customers.len(), 2);
        assert!(ctx.customers.row(CustomerId(100003)).is_none());
    }

    #[test]
    fn missing_artifact_aborts_startup() {
        let tmp = fixture_dir();
        std::fs::remove_file(tmp.path().join(PANEL_FILE)).unwrap();
        let err = AppContext::load(tmp.path(), DashboardConfig::default()).unwrap_err();
        assert!(err.to_string().contains("missing"), "{}", err);
    }

    #[test]
    fn classifier_shape_mismatch_is_rejected() {
        let tmp = fixture_dir();
        write_json(
            tmp.path(),
            CLASSIFIERS_FILE,
            r#"[{"weights":[1.0],"intercept":0.0}]"#,
        );
        assert!(AppContext::load(tmp.path(), DashboardConfig::default()).is_err());
    }

    #[test]
    fn explainer_count_must_match_classifier_count() {
        let tmp = fixture_dir();
        write_json(
            tmp.path(),
            EXPLAINERS_FILE,
            r#"[{"weights":[0.0,0.0,0.0],"feature_means":[0.0,0.0,0.0],"expected_value":0.3}]"#,
        );
        assert!(AppContext::load(tmp.path(), DashboardConfig::default()).is_err());
    }

    #[test]
    fn empty_classifier_list_is_rejected() {
        let tmp = fixture_dir();
        write_json(tmp.path(), CLASSIFIERS_FILE, "[]");
        assert!(AppContext::load(tmp.path(), DashboardConfig::default()).is_err());
    }

    #[test]
    fn non_numeric_feature_is_invalid() {
        let tmp = fixture_dir();
        write_gz(
            tmp.path(),
            CUSTOMERS_FILE,
            "SK_ID_CURR,AMT_CREDIT,CODE_GENDER,EXT_SOURCE_1\n100001,oops,1,0.7\n",
        );
        let err = AppContext::load(tmp.path(), DashboardConfig::default()).unwrap_err();
        assert!(err.to_string().contains("not numeric"), "{}", err);
    }
}
