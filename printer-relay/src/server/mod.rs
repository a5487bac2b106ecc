mod config;
mod error;
pub mod middleware;
mod state;

use std::future::Future;

use tokio::net::TcpListener;

pub use config::{Config, RelayMode};
pub use error::{Result, ServerError};
pub use state::ServerState;

use crate::routes::build_app;

pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 绑定端口并运行，直到收到 Ctrl+C / SIGTERM
    pub async fn run(&self) -> Result<()> {
        let state = ServerState::initialize(&self.config)?;

        let addr = self.config.listen_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        self.print_startup_banner(&state);

        serve(listener, state, shutdown_signal()).await?;

        tracing::info!("✅ Server shutdown complete");
        Ok(())
    }

    fn print_startup_banner(&self, state: &ServerState) {
        let addr = self.config.listen_addr();
        let target = state.printer.target();

        tracing::info!("🖨️  Printer relay listening on {}", addr);
        tracing::info!(
            mode = self.config.mode.as_str(),
            timeout_ms = state.printer.timeout().as_millis() as u64,
            max_body_bytes = self.config.max_body_bytes,
            "📡 Forwarding to {} at {}{}",
            self.config.target_name,
            target,
            target.path()
        );
    }
}

/// 在已绑定的监听器上提供服务
///
/// 测试中可绑定 `127.0.0.1:0` 后直接调用
pub async fn serve<F>(listener: TcpListener, state: ServerState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

/// Graceful shutdown handler
///
/// Listens for SIGTERM and Ctrl+C signals
pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
