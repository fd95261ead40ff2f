use std::path::PathBuf;
use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use atlas_sources::provider::http::{
    DEFAULT_COUNTRIES_URL, DEFAULT_FETCH_TIMEOUT, DEFAULT_RATES_URL,
};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cache_dir: PathBuf,
    pub countries_url: String,
    pub rates_url: String,
    pub fetch_timeout: Duration,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = match std::env::var("ATLAS_LISTEN_ADDR") {
            Ok(addr) => addr.parse(),
            Err(_) => {
                let port = std::env::var("PORT").unwrap_or_else(|_| "8080".into());
                format!("0.0.0.0:{port}").parse()
            }
        }
        .context("Invalid ATLAS_LISTEN_ADDR or PORT")?;

        let db_path = std::env::var("ATLAS_DB_PATH").unwrap_or_else(|_| "./db/atlas.db".into());
        let cache_dir = std::env::var("ATLAS_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./cache"));
        let countries_url =
            std::env::var("ATLAS_COUNTRIES_URL").unwrap_or_else(|_| DEFAULT_COUNTRIES_URL.into());
        let rates_url =
            std::env::var("ATLAS_RATES_URL").unwrap_or_else(|_| DEFAULT_RATES_URL.into());

        let fetch_timeout = match std::env::var("ATLAS_FETCH_TIMEOUT_SECS") {
            Ok(secs) => Duration::from_secs(
                secs.parse()
                    .context("Invalid ATLAS_FETCH_TIMEOUT_SECS")?,
            ),
            Err(_) => DEFAULT_FETCH_TIMEOUT,
        };
        let timeout_ms: u64 = std::env::var("ATLAS_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "120000".into())
            .parse()
            .context("Invalid ATLAS_REQUEST_TIMEOUT_MS")?;

        let cors_allow = std::env::var("ATLAS_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            listen_addr,
            db_path,
            cache_dir,
            countries_url,
            rates_url,
            fetch_timeout,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }
}
