use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::jwt::JwtManager;
use crate::entities::sea_orm_active_enums::UserRole;
use crate::errors::AppError;

/// Who is calling. Resolved from the session token on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub employee_id: Option<Uuid>,
}

impl Identity {
    pub fn is_master(&self) -> bool {
        self.role == UserRole::Master
    }

    pub fn can_evaluate(&self) -> bool {
        matches!(self.role, UserRole::Master | UserRole::Leader)
    }

    pub fn require_master(&self, action: &str) -> Result<(), AppError> {
        if self.is_master() {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!("Only master users can {action}")))
        }
    }

    pub fn require_evaluator(&self, action: &str) -> Result<(), AppError> {
        if self.can_evaluate() {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "Only master or leader users can {action}"
            )))
        }
    }
}

pub trait IdentityProvider: Send + Sync {
    fn identify(&self, token: &str) -> Result<Identity, AppError>;

    /// Issues a token for an identity, when the provider is able to.
    fn issue(&self, identity: &Identity) -> Result<String, AppError>;

    fn session_ttl_seconds(&self) -> i64;
}

pub type SharedIdentityProvider = Arc<dyn IdentityProvider>;

pub struct JwtIdentityProvider {
    jwt: JwtManager,
}

impl JwtIdentityProvider {
    pub fn new(jwt: JwtManager) -> Self {
        Self { jwt }
    }
}

impl IdentityProvider for JwtIdentityProvider {
    fn identify(&self, token: &str) -> Result<Identity, AppError> {
        let claims = self.jwt.decode_token(token)?;
        Ok(Identity {
            user_id: claims.sub,
            email: claims.email,
            name: claims.name,
            role: claims.role,
            employee_id: claims.employee_id,
        })
    }

    fn issue(&self, identity: &Identity) -> Result<String, AppError> {
        self.jwt.create_token(
            identity.user_id,
            &identity.email,
            &identity.name,
            identity.role,
            identity.employee_id,
        )
    }

    fn session_ttl_seconds(&self) -> i64 {
        self.jwt.ttl_seconds()
    }
}

/// Fixed token table, for tests and local tooling.
#[derive(Default)]
pub struct StaticIdentityProvider {
    identities: HashMap<String, Identity>,
}

impl StaticIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>, identity: Identity) -> Self {
        self.identities.insert(token.into(), identity);
        self
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn identify(&self, token: &str) -> Result<Identity, AppError> {
        self.identities
            .get(token)
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Invalid or expired session".to_string()))
    }

    fn issue(&self, identity: &Identity) -> Result<String, AppError> {
        self.identities
            .iter()
            .find(|(_, known)| known.user_id == identity.user_id)
            .map(|(token, _)| token.clone())
            .ok_or_else(|| AppError::Unauthorized("Unknown identity".to_string()))
    }

    fn session_ttl_seconds(&self) -> i64 {
        crate::config::DEFAULT_SESSION_TTL_SECONDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: UserRole) -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            email: "someone@example.com".to_string(),
            name: "Someone".to_string(),
            role,
            employee_id: None,
        }
    }

    #[test]
    fn role_gates() {
        assert!(identity(UserRole::Master).require_master("edit").is_ok());
        assert!(identity(UserRole::Leader).require_master("edit").is_err());
        assert!(identity(UserRole::Leader).require_evaluator("score").is_ok());
        assert!(matches!(
            identity(UserRole::Employee).require_evaluator("score"),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn jwt_provider_round_trips_identity() {
        let provider = JwtIdentityProvider::new(JwtManager::new("secret", 60));
        let who = identity(UserRole::Leader);

        let token = provider.issue(&who).unwrap();
        assert_eq!(provider.identify(&token).unwrap(), who);
    }

    #[test]
    fn static_provider_only_knows_its_tokens() {
        let who = identity(UserRole::Master);
        let provider = StaticIdentityProvider::new().with_token("master-token", who.clone());

        assert_eq!(provider.identify("master-token").unwrap(), who);
        assert!(provider.identify("other").is_err());
        assert_eq!(provider.issue(&who).unwrap(), "master-token");
    }
}
