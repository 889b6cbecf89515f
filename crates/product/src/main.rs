use anyhow::{Context, Result};
use genproto::product::{
    product_command_service_server::ProductCommandServiceServer,
    product_query_service_server::ProductQueryServiceServer,
};
use product::{
    config::{myconfig::Config, server_config::ServerConfig},
    handler::{command::ProductCommandServiceImpl, query::ProductQueryServiceImpl},
    state::AppState,
};
use shared::{config::ConnectionManager, utils::init_logger};
use sqlx::{Pool, Postgres};
use std::sync::Arc;
use tokio::sync::broadcast;
use tonic::transport::Server;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let (server_config, state) = setup().await.context("Failed to setup application")?;

    let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);

    let grpc_handle = run_server(&server_config, state, shutdown_tx.clone());

    shutdown_listener(shutdown_tx);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("🛑 Shutdown signal received (Ctrl+C).");
        }
        _ = shutdown_rx.recv() => {
            info!("🛑 Shutdown signal received from internal component.");
        }
    }

    shutdown(grpc_handle).await;

    Ok(())
}

async fn setup() -> Result<(ServerConfig, Arc<AppState>)> {
    dotenv::dotenv().ok();

    let is_dev = std::env::var("DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let is_enable_file = std::env::var("ENABLE_FILE_LOG")
        .map(|v| v == "true")
        .unwrap_or(false);

    let config = Config::init().context("Failed to load configuration")?;
    let server_config = ServerConfig::from_config(&config)?;

    init_logger("product-service", is_dev, is_enable_file);

    info!("🚀 Starting Product Service initialization...");

    let db_pool = ConnectionManager::new_pool(
        &server_config.database_url,
        config.db_min_connections,
        config.db_max_connections,
    )
    .await
    .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&db_pool)
            .await
            .context("Failed to run database migrations")?;
    } else {
        warn!("⚠️ Skipping database migrations (RUN_MIGRATIONS=false)");
    }

    let state = Arc::new(AppState::new(db_pool));

    info!("✅ Application setup completed successfully.");
    Ok((server_config, state))
}

fn run_server(
    server_config: &ServerConfig,
    state: Arc<AppState>,
    shutdown_tx: broadcast::Sender<()>,
) -> tokio::task::JoinHandle<()> {
    let command_service =
        ProductCommandServiceImpl::new(Arc::new(state.di_container.product_command.clone()));

    let query_service =
        ProductQueryServiceImpl::new(Arc::new(state.di_container.product_query.clone()));

    let grpc_addr = server_config.grpc_addr;

    run_grpc_server(command_service, query_service, grpc_addr, shutdown_tx)
}

fn run_grpc_server(
    command_service: ProductCommandServiceImpl,
    query_service: ProductQueryServiceImpl,
    grpc_addr: std::net::SocketAddr,
    shutdown_tx: broadcast::Sender<()>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let shutdown_rx = shutdown_tx.subscribe();

        loop {
            info!("📡 Attempting to start gRPC server on {grpc_addr}");

            let server_shutdown_rx = shutdown_rx.resubscribe();

            match start_grpc_server(
                command_service.clone(),
                query_service.clone(),
                grpc_addr,
                server_shutdown_rx,
            )
            .await
            {
                Ok(()) => {
                    info!("✅ gRPC server stopped gracefully");
                    break;
                }
                Err(e) => {
                    error!("❌ gRPC server failed: {e}. Restarting in 5s...");
                    tokio::time::sleep(tokio::time::Duration::from_secs(5)).await;
                }
            }
        }
    })
}

fn shutdown_listener(shutdown_tx: broadcast::Sender<()>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("🛑 Ctrl+C signal detected, broadcasting shutdown...");
                if let Err(e) = shutdown_tx.send(()) {
                    warn!("Failed to send shutdown signal: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to listen for shutdown signal: {}", e);
            }
        }
    });
}

async fn start_grpc_server(
    command_service: ProductCommandServiceImpl,
    query_service: ProductQueryServiceImpl,
    addr: std::net::SocketAddr,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<()> {
    info!("📡 Starting gRPC server on {addr}");

    let shutdown_future = async move {
        let _ = shutdown_rx.recv().await;
        info!("gRPC server received shutdown signal");
    };

    Server::builder()
        .add_service(ProductCommandServiceServer::new(command_service))
        .add_service(ProductQueryServiceServer::new(query_service))
        .serve_with_shutdown(addr, shutdown_future)
        .await
        .with_context(|| format!("gRPC server failed to start on {addr}"))
}

async fn shutdown(grpc_handle: tokio::task::JoinHandle<()>) {
    info!("🛑 Shutting down all servers...");

    let shutdown_timeout = tokio::time::Duration::from_secs(30);
    let shutdown_result = tokio::time::timeout(shutdown_timeout, async {
        let _ = grpc_handle.await;
    })
    .await;

    match shutdown_result {
        Ok(()) => info!("✅ All components shutdown gracefully"),
        Err(_) => {
            warn!("⚠️ Shutdown timeout reached, forcing exit");
        }
    }

    info!("✅ Product Service shutdown complete.");
}

pub async fn run_migrations(pool: &Pool<Postgres>) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
