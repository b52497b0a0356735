use actix_web::{App, HttpServer, middleware::Logger, web};
use clap::Parser;
use std::io;
use std::sync::Arc;
use tracing::info;

mod api;
mod cli;
mod config;
mod db;
mod shutdown;
mod telemetry;

use crate::api::{state::AppState, upload::multipart_config};
use crate::cli::{Cli, Command, ServeArgs};
use crate::config::{Config, StoreBackend};
use crate::db::{JobBoardStore, MemoryStore, PgStore};
use crate::shutdown::ShutdownCoordinator;

/// Connect to PostgreSQL and bring the schema up to date
async fn connect_postgres(config: &Config) -> io::Result<sqlx::PgPool> {
    let database_url = config.require_database_url().map_err(io::Error::other)?;

    let pool = db::connection::get_connection(database_url, config.max_db_connections)
        .await
        .map_err(io::Error::other)?;
    info!("Database connection pool established");

    db::migrations::run_migrations(&pool).await.map_err(io::Error::other)?;
    Ok(pool)
}

async fn serve(mut config: Config, args: ServeArgs) -> io::Result<()> {
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if args.in_memory {
        config.store_backend = StoreBackend::Memory;
    }

    let store: Arc<dyn JobBoardStore> = match config.store_backend {
        StoreBackend::Postgres => Arc::new(PgStore::new(connect_postgres(&config).await?)),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    };

    info!("Starting job-board application");
    info!("Configuration loaded successfully:");
    info!("  - Store backend: {}", store.backend());
    info!("  - Max payload size: {} bytes", config.max_payload_size);
    info!("  - Max database connections: {}", config.max_db_connections);
    info!("  - Upload directory: {}", config.upload_dir.display());

    let state = AppState::new(store.clone(), config.upload_dir.clone());
    let max_payload_size = config.max_payload_size;

    let server = HttpServer::new(move || {
        let state = state.clone();

        App::new()
            .wrap(Logger::default())
            .app_data(web::PayloadConfig::default().limit(max_payload_size))
            .app_data(multipart_config(max_payload_size))
            .configure(|cfg| state.configure(cfg))
    });

    info!("Server starting on http://{}:{}", config.host, config.port);

    let server = server.bind((config.host.as_str(), config.port))?.run();
    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    ShutdownCoordinator::new(server_handle, server_task, store)
        .wait_for_shutdown()
        .await
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().map_err(io::Error::other)?;

    telemetry::init(&config.log_dir)?;

    match cli.command() {
        Command::Serve(args) => serve(config, args).await,
        Command::Migrate => {
            let pool = connect_postgres(&config).await?;
            pool.close().await;
            Ok(())
        }
    }
}
