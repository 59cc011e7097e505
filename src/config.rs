// src/config.rs
use std::net::IpAddr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://products.db";
pub const DEFAULT_PRODUCTS_FILE: &str = "products.xlsx";
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 8;
/// Longest admin session accepted from the environment: one year.
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub products_file: String,
    pub jwt_secret: String,
    pub session_ttl_hours: i64,
    /// Adds `Secure` to the session cookie; enable when served over HTTPS.
    pub secure_cookies: bool,
    pub admin_username: String,
    pub admin_password: String,
    pub host: IpAddr,
    pub port: u16,
}

impl Config {
    /// Reads the environment. Call after `dotenvy::dotenv()`.
    pub fn from_env() -> Result<Self, String> {
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(s) if !s.trim().is_empty() => s,
            _ if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using an insecure development secret");
                "dev-only-insecure-secret".to_string()
            }
            _ => return Err("JWT_SECRET must be set".to_string()),
        };

        let session_ttl_hours = parse_session_ttl(std::env::var("SESSION_TTL_HOURS").ok().as_deref());
        let secure_cookies = parse_flag(std::env::var("SESSION_COOKIE_SECURE").ok().as_deref());

        let host = std::env::var("HOST")
            .ok()
            .and_then(|h| h.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::from([127, 0, 0, 1]));
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(5000);

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            products_file: std::env::var("PRODUCTS_FILE")
                .unwrap_or_else(|_| DEFAULT_PRODUCTS_FILE.to_string()),
            jwt_secret,
            session_ttl_hours,
            secure_cookies,
            admin_username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string()),
            host,
            port,
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            products_file: "does-not-exist.xlsx".to_string(),
            jwt_secret: "test-secret".to_string(),
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            secure_cookies: false,
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
        }
    }
}

/// Session lifetime in hours: defaults when unset or invalid, capped at one year.
fn parse_session_ttl(raw: Option<&str>) -> i64 {
    let hours = raw
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|h| *h > 0)
        .unwrap_or(DEFAULT_SESSION_TTL_HOURS);
    if hours > MAX_SESSION_TTL_HOURS {
        tracing::warn!(hours, max = MAX_SESSION_TTL_HOURS, "SESSION_TTL_HOURS too large, capping");
        return MAX_SESSION_TTL_HOURS;
    }
    hours
}

fn parse_flag(raw: Option<&str>) -> bool {
    matches!(raw.map(|v| v.trim().to_ascii_lowercase()).as_deref(), Some("1" | "true" | "yes" | "on"))
}
