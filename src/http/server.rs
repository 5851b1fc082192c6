//! Listener startup logic.

use std::future::{Future, IntoFuture};
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::AppError;

use super::shutdown;

/// Bind a TCP listener on the configured host and port.
///
/// The host may be an IP literal or a hostname; hostnames are resolved and
/// the first address that binds wins.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, AppError> {
    TcpListener::bind((config.host.as_str(), config.port))
        .await
        .map_err(|source| AppError::Bind {
            addr: config.addr(),
            source,
        })
}

/// Serve `app` on `listener` until `shutdown` resolves.
///
/// Each connection runs in its own task, with the peer address available to
/// handlers as `ConnectInfo<SocketAddr>`. In-flight connections are dropped
/// rather than drained when `shutdown` fires.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), AppError>
where
    F: Future<Output = ()>,
{
    tokio::select! {
        result = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .into_future() => result.map_err(AppError::Serve),
        _ = shutdown => {
            tracing::info!("Server stopped");
            Ok(())
        }
    }
}

/// Bind and serve until a termination signal arrives.
pub async fn start_server(app: Router, config: &ServerConfig) -> Result<(), AppError> {
    let listener = bind(config).await?;

    match listener.local_addr() {
        Ok(local) => tracing::info!(addr = %local, "Listening on http://{}", local),
        Err(e) => tracing::warn!(error = %e, addr = %config, "Listening, local address unknown"),
    }

    serve(listener, app, shutdown::shutdown_signal()).await
}
