//! # Credlens Model
//!
//! Model artifacts and per-customer computations for the credlens
//! dashboard:
//!
//! - **Classifier ensemble** — averages per-classifier denial probabilities
//!   into one risk score and derives the loan decision
//! - **Explainer ensemble** — averages per-explainer Shapley vectors into
//!   one contribution vector and one base value
//! - **AppContext** — every reference table and model artifact, loaded once
//!   at startup and shared read-only afterwards
//!
//! All computations are pure functions of their inputs plus the context;
//! nothing here retains state between calls.

pub mod classifier;
pub mod context;
pub mod decision;
pub mod explainer;

pub use classifier::{Classifier, ClassifierEnsemble, LogisticScorer};
pub use context::AppContext;
pub use decision::{explain_customer, predict_decision};
pub use explainer::{Explainer, ExplainerEnsemble, LinearExplainer};
