use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::AppResult;
use crate::routes::{require_email, require_text};
use crate::session::Identity;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[schema(example = "master@example.com")]
    pub email: String,

    #[schema(example = "password123")]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> AppResult<(String, String)> {
        let email = require_email("email", &self.email)?;
        require_text("password", &self.password, 128)?;
        Ok((email, self.password.clone()))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: Identity,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LogoutResponse {
    pub message: String,
}
