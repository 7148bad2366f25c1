//! Web server module
//!
//! Provides the HTTP API for price lookups.

mod handlers;
mod response;
mod routes;
mod state;

pub use response::{ErrorBody, JSON_UTF8};
pub use routes::create_router;
pub use state::AppState;
