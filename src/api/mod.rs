//! HTTP API.
//!
//! Exposes the clinic's record store as JSON endpoints for the web
//! front desk. Routes are nested under `/api/` and wrapped by a
//! middleware stack: CORS → Context → Write Guard → Log → Handler.
//!
//! The router is composable — `api_router()` returns a `Router` that
//! can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::api_router;
pub use server::{start_server, ApiServer};
pub use types::ApiContext;
