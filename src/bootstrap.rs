use anyhow::{Context, Result};

use crate::entities::sea_orm_active_enums::UserRole;
use crate::repositories::{Store, UserRepository};
use crate::utils::random::generate_password;

/// Creates the master account on first start.
///
/// Without a configured password a random one is generated and logged once;
/// it cannot be recovered afterwards.
pub async fn initialize_master_user(
    store: Store,
    master_email: &str,
    master_password: Option<&str>,
) -> Result<()> {
    if !store.is_connected() {
        tracing::warn!("Storage unavailable, skipping master user initialization");
        return Ok(());
    }

    let users = UserRepository::with_store(store);
    let existing = users
        .find_by_email(master_email)
        .await
        .context("Failed to check existing master user")?;

    if existing.is_some() {
        tracing::info!("Master user already exists, skipping initialization");
        return Ok(());
    }

    tracing::info!("Creating master user {}...", master_email);

    let generated = master_password.is_none();
    let password = match master_password {
        Some(password) => password.to_string(),
        None => generate_password(),
    };
    let hashed_password =
        bcrypt::hash(&password, bcrypt::DEFAULT_COST).context("Failed to hash master password")?;

    users
        .create(
            master_email,
            Some("Master".to_string()),
            hashed_password,
            UserRole::Master,
        )
        .await
        .context("Failed to insert master user")?;

    if generated {
        tracing::warn!(
            "Generated master password for {}: {} (set MASTER_PASSWORD to choose one)",
            master_email,
            password
        );
    }
    tracing::info!("Master user created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn skips_without_storage() {
        let result = initialize_master_user(Store::disconnected(), "master@example.com", None).await;
        assert!(result.is_ok());
    }
}
