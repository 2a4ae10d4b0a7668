//! Credlens Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use credlens_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{
    Attribution, AxisValue, CriteriaCatalog, CriteriaEntry, CustomerId, CustomerRecord,
    CustomerTable, Decision, MeanAbsEntry, MeanAbsTable, PanelBin, PanelHistogram, ShapPanel,
    ShapRow, ValueLabels,
};

// Re-export configuration
pub use crate::config::{DashboardConfig, TopRange};

// Re-export error types
pub use crate::error::{CredlensError, Result};
