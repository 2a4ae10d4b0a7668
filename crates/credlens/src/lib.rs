//! # Credlens
//!
//! Explainability for automated loan-approval decisions.
//!
//! Credlens loads precomputed risk models and Shapley attribution
//! artifacts once at startup, then answers every question the dashboard
//! asks as a pure function over that immutable context: what is this
//! customer's risk, why, which criteria mattered most, and how does one
//! criteria behave across a reference population.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use credlens::prelude::*;
//!
//! # fn main() -> Result<()> {
//! // Load every artifact from the data directory
//! let ctx = AppContext::load("data", DashboardConfig::default())?;
//!
//! // Score one customer
//! let id = CustomerId(100001);
//! let decision = predict_decision(&ctx, id)?;
//! println!("risk {:.1}% -> {}", decision.risk * 100.0,
//!     if decision.granted { "granted" } else { "denied" });
//!
//! // Explain it
//! let attribution = explain_customer(&ctx, id)?;
//! let spec = build_waterfall(
//!     &ctx.customers.feature_names,
//!     &attribution.contributions,
//!     attribution.base_value,
//!     15,
//! );
//! println!("score = {:.3}", spec.final_value);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! Credlens is organized into several crates:
//!
//! - [`credlens_core`] - Shared types, errors and configuration
//! - [`credlens_model`] - Artifact loading, decision engine, attribution aggregation
//! - [`credlens_explain`] - Top-contributor, waterfall and scatter builders
//! - [`credlens_viz`] - Figure specifications and table views
//! - `credlens-web` - The axum server binary

pub use credlens_core as core;
pub use credlens_explain as explain;
pub use credlens_model as model;
pub use credlens_viz as viz;

pub mod prelude {
    //! Convenient imports for common usage.

    pub use credlens_core::prelude::*;
    pub use credlens_explain::{build_scatter, build_waterfall, top_tables};
    pub use credlens_model::{explain_customer, predict_decision, AppContext};
    pub use credlens_viz::{panel_figure, scatter_figure, top_table_views, waterfall_figure};
}
