use crate::analysis::PriceBands;
use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub listings_api_url: String,
    pub ai_api_url: String,
    pub http_timeout: Duration,
    pub price_bands: PriceBands,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = PriceBands::default();

        let price_bands = PriceBands {
            lower: parse_or(&lookup, "PRICE_BAND_LOWER", defaults.lower)?,
            upper: parse_or(&lookup, "PRICE_BAND_UPPER", defaults.upper)?,
        };
        if price_bands.lower.is_nan() || price_bands.upper.is_nan() {
            bail!("PRICE_BAND_LOWER and PRICE_BAND_UPPER must be numbers");
        }
        if price_bands.lower >= price_bands.upper {
            bail!(
                "PRICE_BAND_LOWER ({}) must be below PRICE_BAND_UPPER ({})",
                price_bands.lower,
                price_bands.upper
            );
        }

        Ok(Self {
            listings_api_url: lookup("LISTINGS_API_URL")
                .unwrap_or_else(|| "http://localhost:8000".to_string()),
            ai_api_url: lookup("AI_API_URL").unwrap_or_else(|| "http://localhost:8001".to_string()),
            http_timeout: Duration::from_secs(parse_or(&lookup, "HTTP_TIMEOUT_SECS", 30u64)?),
            price_bands,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a valid number")),
        None => Ok(default),
    }
}
