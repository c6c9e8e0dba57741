use std::str::FromStr;

use dotenvy;

use crate::entities::project::project_status::TransitionPolicy;
use crate::middleware::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_namespace: String,
    pub db_database: String,
    pub db_password: Option<String>,
    pub db_username: Option<String>,
    pub db_url: String,
    pub server_port: u16,
    pub upload_file_size_max_mb: u64,
    pub transition_policy: TransitionPolicy,
}

pub const MAX_UPLOAD_SIZE_MB: u64 = 1024;

/// Upload limit in bytes, saturating on platforms where it does not fit.
pub fn upload_limit_bytes(upload_max_size_mb: u64) -> usize {
    let bytes = upload_max_size_mb.saturating_mul(1024 * 1024);
    usize::try_from(bytes).unwrap_or(usize::MAX)
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::dotenv();
        let db_namespace = std::env::var("DB_NAMESPACE").unwrap_or("freelinkd".to_string());
        let db_database = std::env::var("DB_DATABASE").unwrap_or("freelinkd".to_string());
        let db_password = std::env::var("DB_PASSWORD").ok();
        let db_username = std::env::var("DB_USERNAME").ok();
        let db_url = std::env::var("DB_URL").unwrap_or("mem://".to_string());

        let server_port: u16 = parse_env("SERVER_PORT", "8080")?;
        let upload_file_size_max_mb: u64 = parse_env("UPLOAD_MAX_SIZE_MB", "15")?;
        if !(1..=MAX_UPLOAD_SIZE_MB).contains(&upload_file_size_max_mb) {
            return Err(AppError::Config {
                description: format!("UPLOAD_MAX_SIZE_MB must be 1-{MAX_UPLOAD_SIZE_MB}"),
            });
        }

        let transition_policy = std::env::var("PROJECT_TRANSITIONS")
            .unwrap_or("permissive".to_string())
            .parse::<TransitionPolicy>()
            .map_err(|_| AppError::Config {
                description: "PROJECT_TRANSITIONS must be 'permissive' or 'strict'".to_string(),
            })?;

        Ok(Self {
            db_namespace,
            db_database,
            db_password,
            db_username,
            db_url,
            server_port,
            upload_file_size_max_mb,
            transition_policy,
        })
    }
}

fn parse_env<T: FromStr>(key: &str, default: &str) -> AppResult<T> {
    std::env::var(key)
        .unwrap_or(default.to_string())
        .parse::<T>()
        .map_err(|_| AppError::Config {
            description: format!("{key} must be a number"),
        })
}
