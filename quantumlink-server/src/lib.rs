//! QuantumLink Server Library - REST API components for quantum message packaging
//!
//! This library exposes the server components for use in integration tests.
//! The main binary uses these same components.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod validation;

pub use auth::{auth_gate, CurrentUser, JwtAuthenticator, TokenClaims};
pub use config::Config;
pub use error::{ApiError, ErrorBody};
pub use handlers::ApiResponse;
pub use openapi::ApiDoc;
pub use routes::{create_router, create_router_with_state};
pub use state::AppState;
