//! HTTP listener.
//!
//! Binds the configured address and runs the accept loop until the process
//! receives a termination signal:
//! - SIGINT (Ctrl+C) on every platform
//! - SIGTERM on unix

mod server;
mod shutdown;

pub use server::{bind, serve, start_server};
