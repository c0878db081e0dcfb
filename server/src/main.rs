use crate::config::{ServerConfig, StoreBackend};
use crate::error::StackTrace;
use crate::handler::{AppModule, BookModule};
use driver::database::{InMemoryDatabase, MongoDatabase};
use error_stack::ResultExt;
use kernel::KernelError;
use tokio::net::TcpListener;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

mod config;
mod controller;
mod error;
mod handler;
mod request;
mod response;
mod route;

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    let config = ServerConfig::from_env()?;
    let _guard = init_tracing(&config);

    match config.backend {
        StoreBackend::MongoDb => serve(MongoDatabase::new().await?, &config).await?,
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; books are lost on shutdown");
            serve(InMemoryDatabase::new(), &config).await?
        }
    }

    Ok(())
}

fn init_tracing(config: &ServerConfig) -> WorkerGuard {
    let appender = tracing_appender::rolling::daily(&config.log_dir, "debug.log");
    let (non_blocking_appender, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(tracing_subscriber::EnvFilter::new(
                    std::env::var("RUST_LOG").unwrap_or_else(|_| {
                        "driver=debug,application=debug,server=debug,tower_http=debug".into()
                    }),
                ))
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .init();
    guard
}

async fn serve<Db: BookModule>(
    database: Db,
    config: &ServerConfig,
) -> error_stack::Result<(), KernelError> {
    let router = route::router(AppModule::new(database));

    let tcp = TcpListener::bind(config.address)
        .await
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("Failed to listen on {}", config.address))?;
    tracing::info!("Listening on http://{}", config.address);

    axum::serve(tcp, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .change_context_lazy(|| KernelError::Internal)?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("Failed to listen for SIGTERM: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
