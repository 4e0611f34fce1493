use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file holding the whole bank collection.
    pub store_path: PathBuf,
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Write the sample banks when the store is empty at startup.
    pub seed_sample_banks: bool,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            store_path: lookup("BANK_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/question_banks.json")),
            bind_addr: lookup("BIND_ADDR")
                .unwrap_or_else(|| "127.0.0.1".to_string())
                .parse::<IpAddr>()
                .context("BIND_ADDR must be a valid IP address")?,
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            seed_sample_banks: parse_bool(lookup("SEED_SAMPLE_BANKS").as_deref(), true)
                .context("SEED_SAMPLE_BANKS must be true or false")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_bool(value: Option<&str>, default: bool) -> Result<bool> {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => anyhow::bail!("unrecognised boolean '{other}'"),
        },
    }
}
