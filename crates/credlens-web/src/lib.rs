//! # Credlens Web Dashboard
//!
//! Browser dashboard explaining automated loan-approval decisions.
//!
//! ## Quick Start
//!
//! ```bash
//! # Start the web server
//! cargo run -p credlens-web -- --port 3000 --data-dir data
//!
//! # Open http://localhost:3000 in your browser
//! ```
//!
//! ## API Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/api/config` | Threshold and top-N selector range |
//! | GET | `/api/customers` | Customer selector options |
//! | GET | `/api/customers/{id}/decision` | Risk score and decision |
//! | GET | `/api/customers/{id}/panel` | Panel histogram figure |
//! | GET | `/api/customers/{id}/waterfall?top=N` | Waterfall figure |
//! | GET | `/api/customers/{id}/top?top=N` | Both ranked top-N tables |
//! | GET | `/api/criteria` | Criteria selector options |
//! | GET | `/api/criteria/{name}` | Description and scatter, no customer |
//! | GET | `/api/customers/{id}/criteria/{name}` | Description, customer value, impact, scatter |

pub mod routes;
pub mod state;

pub use state::AppState;
