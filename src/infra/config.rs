//! Centralized configuration (environment variables + defaults).
//!
//! `.env` is honoured through `dotenv`; real environment variables win.

/// Matches the database file name existing deployments already use.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://parking.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_LOG_FILTER: &str = "parking_lot_manager=info,tower_http=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
}

impl Settings {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            database_url: database_url(),
            bind_addr: bind_addr(),
            max_connections: max_connections(),
        }
    }
}

/// SQLite connection URL (`DATABASE_URL`).
pub fn database_url() -> String {
    non_empty_var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

/// Listen address for the HTTP server (`BIND_ADDR`).
pub fn bind_addr() -> String {
    non_empty_var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
}

/// Pool size (`DB_MAX_CONNECTIONS`), at least 1.
pub fn max_connections() -> u32 {
    parse_max_connections(non_empty_var("DB_MAX_CONNECTIONS").as_deref())
}

fn parse_max_connections(raw: Option<&str>) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(DEFAULT_MAX_CONNECTIONS)
        .max(1)
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
