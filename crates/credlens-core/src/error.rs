//! Error types for credlens operations.
//!
//! All inputs are static model artifacts, so no error here is transient:
//! nothing retries, and failures propagate to the caller immediately.

use std::error::Error;
use std::fmt;

/// Result type for credlens operations.
pub type Result<T> = std::result::Result<T, CredlensError>;

/// Errors that can occur during credlens operations.
#[derive(Debug, Clone)]
pub enum CredlensError {
    /// Startup artifact errors (missing or invalid files) — fatal.
    Artifact(ArtifactError),
    /// Customer lookup errors at request time.
    Customer(CustomerError),
    /// Criteria (feature) lookup errors at request time.
    Criteria(CriteriaError),
    /// Model/explainer ensemble shape errors.
    Ensemble(EnsembleError),
    /// Configuration errors.
    Config(ConfigError),
    /// I/O errors (wrapped).
    Io(String),
    /// Serialization errors.
    Serialization(String),
}

impl fmt::Display for CredlensError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredlensError::Artifact(e) => write!(f, "Artifact error: {}", e),
            CredlensError::Customer(e) => write!(f, "Customer error: {}", e),
            CredlensError::Criteria(e) => write!(f, "Criteria error: {}", e),
            CredlensError::Ensemble(e) => write!(f, "Ensemble error: {}", e),
            CredlensError::Config(e) => write!(f, "Config error: {}", e),
            CredlensError::Io(msg) => write!(f, "I/O error: {}", msg),
            CredlensError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl Error for CredlensError {}

impl From<std::io::Error> for CredlensError {
    fn from(e: std::io::Error) -> Self {
        CredlensError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CredlensError {
    fn from(e: serde_json::Error) -> Self {
        CredlensError::Serialization(e.to_string())
    }
}

/// Startup artifact errors.
#[derive(Debug, Clone)]
pub enum ArtifactError {
    /// A required input file is absent.
    Missing(String),
    /// The file exists but could not be read or decompressed.
    Unreadable { path: String, reason: String },
    /// The file was read but its contents are not usable.
    Invalid { path: String, reason: String },
}

impl fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactError::Missing(path) => write!(f, "Required artifact missing: {}", path),
            ArtifactError::Unreadable { path, reason } => {
                write!(f, "Artifact unreadable: {} ({})", path, reason)
            }
            ArtifactError::Invalid { path, reason } => {
                write!(f, "Artifact invalid: {} ({})", path, reason)
            }
        }
    }
}

/// Customer lookup errors.
#[derive(Debug, Clone)]
pub enum CustomerError {
    /// No row with this id in the customer table.
    NotFound(String),
}

impl fmt::Display for CustomerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerError::NotFound(id) => write!(f, "Customer not found: {}", id),
        }
    }
}

/// Criteria lookup errors.
#[derive(Debug, Clone)]
pub enum CriteriaError {
    /// The feature name is not in the catalog or feature table.
    Unknown(String),
}

impl fmt::Display for CriteriaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriteriaError::Unknown(name) => write!(f, "Unknown criteria: {}", name),
        }
    }
}

/// Ensemble shape errors.
#[derive(Debug, Clone)]
pub enum EnsembleError {
    /// Zero members; the unweighted mean would divide by zero.
    Empty(String),
    /// A member produced a vector of the wrong length.
    ShapeMismatch { expected: usize, found: usize },
}

impl fmt::Display for EnsembleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnsembleError::Empty(kind) => write!(f, "Empty {} ensemble", kind),
            EnsembleError::ShapeMismatch { expected, found } => {
                write!(
                    f,
                    "Shape mismatch: expected {} features, found {}",
                    expected, found
                )
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Out of range.
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
    /// Invalid value.
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::OutOfRange {
                field,
                min,
                max,
                value,
            } => {
                write!(
                    f,
                    "{} out of range: {} (must be {}-{})",
                    field, value, min, max
                )
            }
            ConfigError::InvalidValue {
                field,
                value,
                reason,
            } => {
                write!(f, "Invalid value for {}: {} ({})", field, value, reason)
            }
        }
    }
}

// Convenience constructors
impl CredlensError {
    pub fn artifact_missing(path: impl Into<String>) -> Self {
        CredlensError::Artifact(ArtifactError::Missing(path.into()))
    }

    pub fn artifact_unreadable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        CredlensError::Artifact(ArtifactError::Unreadable {
            path: path.into(),
            reason: reason.into(),
        })
    }

    pub fn artifact_invalid(path: impl Into<String>, reason: impl Into<String>) -> Self {
        CredlensError::Artifact(ArtifactError::Invalid {
            path: path.into(),
            reason: reason.into(),
        })
    }

    pub fn customer_not_found(id: impl fmt::Display) -> Self {
        CredlensError::Customer(CustomerError::NotFound(id.to_string()))
    }

    pub fn unknown_criteria(name: impl Into<String>) -> Self {
        CredlensError::Criteria(CriteriaError::Unknown(name.into()))
    }

    pub fn empty_ensemble(kind: impl Into<String>) -> Self {
        CredlensError::Ensemble(EnsembleError::Empty(kind.into()))
    }

    pub fn shape_mismatch(expected: usize, found: usize) -> Self {
        CredlensError::Ensemble(EnsembleError::ShapeMismatch { expected, found })
    }

    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        CredlensError::Config(ConfigError::OutOfRange {
            field: field.into(),
            min,
            max,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let e = CredlensError::customer_not_found(100042);
        assert_eq!(e.to_string(), "Customer error: Customer not found: 100042");

        let e = CredlensError::shape_mismatch(10, 7);
        assert!(e.to_string().contains("expected 10 features, found 7"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let e: CredlensError = io.into();
        assert!(matches!(e, CredlensError::Io(_)));
    }
}
