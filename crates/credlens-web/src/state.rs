//! Application state for the web server.
//!
//! The context is loaded once at startup and never mutated, so handlers
//! share it through a plain `Arc`: concurrent requests are independent
//! computations over the same read-only tables, with no locking.

use credlens_core::error::Result;
use credlens_core::types::{Attribution, CustomerId, Decision};
use credlens_model::{explain_customer, predict_decision, AppContext};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    ctx: Arc<AppContext>,
}

impl AppState {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx: Arc::new(ctx) }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Risk score and decision for one customer.
    pub fn decision(&self, id: CustomerId) -> Result<Decision> {
        predict_decision(&self.ctx, id)
    }

    /// Aggregated attribution for one customer. Computed per request and
    /// passed explicitly to whatever derived view needs it; never cached.
    pub fn attribution(&self, id: CustomerId) -> Result<Attribution> {
        explain_customer(&self.ctx, id)
    }
}
