use std::time::Duration;

use once_cell::sync::OnceCell;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub static DATABASE_CONNECTION: OnceCell<DatabaseConnection> = OnceCell::new();

/// Connects once and keeps the handle for the lifetime of the process.
///
/// A failed connection is logged and left unset: the service still starts and
/// serves empty reads while writes report the store as unavailable.
pub async fn init_database_connection(database_url: &str) -> Option<&'static DatabaseConnection> {
    if let Some(db) = DATABASE_CONNECTION.get() {
        return Some(db);
    }

    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .max_connections(20)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    match Database::connect(options).await {
        Ok(db) => {
            tracing::info!("Database connection established");
            let _ = DATABASE_CONNECTION.set(db);
            DATABASE_CONNECTION.get()
        }
        Err(e) => {
            tracing::warn!("Database unreachable, running without storage: {}", e);
            None
        }
    }
}
