//! HTTP surface for the symptom triage service.
//!
//! The model is built before the listener binds; handlers only ever see a
//! ready [`PredictionService`](symptom_triage_core::PredictionService) through
//! [`AppState`].
//!
//! | Method | Path        | Handler                      |
//! |--------|-------------|------------------------------|
//! | POST   | `/predict`  | [`handlers::predict`]        |
//! | POST   | `/schedule` | [`handlers::schedule`]       |
//! | GET    | `/health`   | [`handlers::health`]         |

pub mod config;
pub mod error;
pub mod handlers;
pub mod request;
pub mod router;
pub mod server;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use router::router;
pub use state::AppState;
