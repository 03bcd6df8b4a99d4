use clap::Parser;
use once_cell::sync::Lazy;

pub const SESSION_COOKIE_NAME: &str = "app_session_id";
pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 86400i64;
pub const RECENT_ACTIVITY_LIMIT: u64 = 5;

pub static APP_CONFIG: Lazy<Config> = Lazy::new(Config::parse);

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,

    #[clap(long, env, default_value_t = true)]
    pub swagger_enabled: bool,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    #[clap(long, env)]
    pub database_url: String,

    #[clap(long, env, default_value_t = true)]
    pub run_migrations: bool,

    #[clap(long, env)]
    pub jwt_secret: String,

    #[clap(long, env, default_value_t = DEFAULT_SESSION_TTL_SECONDS)]
    pub session_ttl_seconds: i64,

    #[clap(long, env)]
    pub master_email: String,

    /// Generated and logged once at bootstrap when absent.
    #[clap(long, env)]
    pub master_password: Option<String>,

    #[clap(long, env, default_value = "*")]
    pub cors_allowed_origins: String,

    #[clap(long, env, default_value = "local")]
    pub app_env: String,
}
