use anyhow::{Context, Result};
use std::env;
use tracing::warn;

const DEV_SESSION_SECRET: &str = "dev-only-session-secret-change-me";

#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub session_secret: String,
    pub session_ttl_secs: i64,
    pub seed_hotels: bool,
    pub admin: Option<AdminSeed>,
}

impl AppConfig {
    /// Reads configuration from the environment after loading `.env`, if any.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("Invalid PORT")?;

        let session_secret = match env::var("SESSION_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                warn!("SESSION_SECRET not set, using development secret");
                DEV_SESSION_SECRET.to_string()
            }
        };

        let session_ttl_secs = env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse::<i64>()
            .context("Invalid SESSION_TTL_SECS")?;
        if session_ttl_secs <= 0 {
            anyhow::bail!("SESSION_TTL_SECS must be positive");
        }

        let seed_hotels = env::var("SEED_HOTELS")
            .unwrap_or_else(|_| "true".to_string())
            .parse::<bool>()
            .context("Invalid SEED_HOTELS")?;

        let admin = match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) => Some(AdminSeed { email, password }),
            _ => None,
        };

        Ok(Self {
            host,
            port,
            session_secret,
            session_ttl_secs,
            seed_hotels,
            admin,
        })
    }
}
