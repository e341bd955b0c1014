//! Gateway HTTP API.
//!
//! `gateway_router()` returns a composable `Router` with all endpoints
//! under `/api/v1/`; `start_server_on()` serves it in the background.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::gateway_router;
pub use server::{start_server_on, GatewayServer, ServerSession};
pub use types::ApiContext;
