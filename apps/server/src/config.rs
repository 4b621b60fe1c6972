use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_PATH: &str = "./db/app.db";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub request_timeout: Duration,
    /// Empty means any origin.
    pub cors_allow_origins: Vec<String>,
}

impl Config {
    /// Reads `GB_*` variables, loading `.env` first when present.
    ///
    /// Malformed values fall back to their defaults, except the listen
    /// address which is reported as an error.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr = std::env::var("GB_LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| anyhow::anyhow!("Invalid GB_LISTEN_ADDR: {}", e))?;

        let db_path = std::env::var("GB_DB_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

        let timeout_ms = std::env::var("GB_REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);

        let cors_allow_origins = parse_origins(
            &std::env::var("GB_CORS_ALLOW_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        );

        Ok(Self {
            listen_addr,
            db_path,
            request_timeout: Duration::from_millis(timeout_ms),
            cors_allow_origins,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect();
    if origins.iter().any(|o| o == "*") {
        Vec::new()
    } else {
        origins
    }
}
