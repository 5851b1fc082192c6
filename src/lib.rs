//! Greeter: a minimal HTTP greeting service.
//!
//! Answers `GET /` with `Hello World!` on an address taken from the `IP` and
//! `PORT` environment variables.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;

pub use config::{ConfigError, ServerConfig};
pub use error::AppError;
pub use routes::create_router;
