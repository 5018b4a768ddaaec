//! Centralized configuration (environment variables + defaults).
//!
//! Binaries call `dotenv::dotenv().ok()` first, so a local `.env` file works too.

use anyhow::Context;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3000;
/// Ports tried in order when the preferred one is taken.
pub const FALLBACK_PORTS: &[u16] = &[8080, 5000, 8888];
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            other => Err(anyhow::anyhow!(
                "unknown ENTRIES_STORE '{}' (expected 'postgres' or 'memory')",
                other
            )),
        }
    }
}

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Database URL must be provided (no default) for safety.
pub fn database_url() -> anyhow::Result<String> {
    var("DATABASE_URL").context("DATABASE_URL must be set")
}

/// Which record store backs the API server (default: postgres).
pub fn store_backend() -> anyhow::Result<StoreBackend> {
    var("ENTRIES_STORE").map_or(Ok(StoreBackend::Postgres), |v| v.parse())
}

pub fn db_max_connections() -> anyhow::Result<u32> {
    match var("DB_MAX_CONNECTIONS") {
        Some(v) => Ok(v
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid u32")?
            .max(1)),
        None => Ok(5),
    }
}

pub fn bind_host() -> String {
    var("BIND_HOST").unwrap_or_else(|| "0.0.0.0".to_string())
}

/// Preferred port followed by the fallbacks, without duplicates.
pub fn bind_ports() -> anyhow::Result<Vec<u16>> {
    let preferred = match var("PORT") {
        Some(v) => v.parse::<u16>().context("PORT must be a valid u16")?,
        None => DEFAULT_PORT,
    };
    Ok(port_candidates(preferred))
}

pub fn port_candidates(preferred: u16) -> Vec<u16> {
    let mut ports = vec![preferred];
    ports.extend(FALLBACK_PORTS.iter().copied().filter(|p| *p != preferred));
    ports
}

/// Base URL the client controller talks to.
pub fn api_base_url() -> String {
    var("ENTRIES_API_URL")
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

pub fn log_json() -> bool {
    var("LOG_JSON").is_some_and(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_backend_parses_known_names() {
        assert_eq!("postgres".parse::<StoreBackend>().unwrap(), StoreBackend::Postgres);
        assert_eq!(" Memory ".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("mysql".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn port_candidates_keep_order_and_skip_duplicates() {
        assert_eq!(port_candidates(3000), vec![3000, 8080, 5000, 8888]);
        assert_eq!(port_candidates(5000), vec![5000, 8080, 8888]);
    }
}
