//! # Credlens Core
//!
//! Shared types, errors and configuration for the credlens
//! decision-explainability dashboard.
//!
//! Everything the dashboard knows at runtime is loaded once into an
//! immutable set of reference tables defined here:
//!
//! - **CustomerTable** — feature rows keyed by customer id, with one
//!   explicit feature-name ordering shared by every consumer
//! - **CriteriaCatalog** — feature name to human-readable description
//! - **PanelHistogram** — risk distribution over a reference customer panel
//! - **MeanAbsTable** — population-wide mean absolute attribution ranking
//! - **ShapPanel** — per-customer attributions for the reference panel
//!
//! Per-customer results (`Decision`, `Attribution`) are derived on demand
//! and never cached.
//!
//! ## Quick Start
//!
//! ```rust
//! use credlens_core::prelude::*;
//!
//! let decision = Decision::from_risk(0.2, 0.3);
//! assert!(decision.granted);
//! ```

pub mod config;
pub mod error;
pub mod types;
pub mod prelude;
