use std::net::SocketAddr;

use anyhow::Context;
use dinamizar_service::bootstrap::initialize_master_user;
use dinamizar_service::repositories::Store;
use dinamizar_service::static_service::init_database_connection;
use dinamizar_service::{app, config::APP_CONFIG, utils::tracing::init_standard_tracing};
use migration::{Migrator, MigratorTrait};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    init_standard_tracing(env!("CARGO_CRATE_NAME"), &APP_CONFIG.log_level);

    tracing::info!("Starting application...");

    match init_database_connection(&APP_CONFIG.database_url).await {
        Some(db) => {
            if APP_CONFIG.run_migrations {
                tracing::info!("Running migrations...");
                if let Err(e) = Migrator::up(db, None).await {
                    tracing::error!("Failed to run migrations: {}", e);
                }
            }

            tracing::info!("Checking master user...");
            if let Err(e) = initialize_master_user(
                Store::global(),
                &APP_CONFIG.master_email,
                APP_CONFIG.master_password.as_deref(),
            )
            .await
            {
                tracing::error!("Failed to initialize master user: {:#}", e);
                tracing::warn!("Continuing without master user initialization...");
            }
        }
        None => {
            tracing::warn!("Serving without storage: reads return empty results, writes are refused");
        }
    }

    let app = app::create_app();
    let http_address = format!("0.0.0.0:{}", APP_CONFIG.port);

    tracing::info!("HTTP server listening on {}", &http_address);

    let listener = tokio::net::TcpListener::bind(&http_address)
        .await
        .with_context(|| format!("Failed to bind {http_address}"))?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("HTTP server stopped")?;

    Ok(())
}
