//! # Credlens Explain
//!
//! Derived views over one customer's aggregated attribution:
//!
//! - **Top-contributor selection** — the N features with largest absolute
//!   contribution, for the customer and for the reference population, plus
//!   the folded "others" bucket
//! - **Waterfall construction** — ordered bars from the base value to the
//!   final risk score
//! - **Partial-dependence scatter** — population-wide value-vs-attribution
//!   points with the selected customer overlaid
//!
//! Every function here is pure: fixed inputs produce exactly reproducible
//! outputs.

pub mod scatter;
pub mod top;
pub mod waterfall;

pub use scatter::{build_scatter, CustomerMarker, ScatterData, ScatterPoint};
pub use top::{
    top_indices_by_abs, top_tables, ContributionRow, OthersBucket, OverallRow, TopTables,
};
pub use waterfall::{build_waterfall, WaterfallBar, WaterfallSpec};
