//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before either
//! binary starts serving.
//!
//! ## Required Variables
//!
//! - `POSTGRES_DSN` - Postgres connection string
//!
//! ## Optional Variables
//!
//! - `REDIS_URL` - Redis connection string (enables link caching if set)
//! - `KAFKA_BROKERS` - Comma-separated broker list (default: `localhost:9092`)
//! - `KAFKA_CLICKS_TOPIC` - Click event topic (default: `clicks`)
//! - `KAFKA_CLICKS_CONSUMER_GROUP` - Consumer group name
//!   (default: `clicks-analytics-consumer`)
//! - `BASE_URL` - Canonical base URL links are scoped under
//!   (default: `http://localhost:8080`)
//! - `HTTP_ADDR` - Bind address (default: `0.0.0.0:8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `SHORT_CODE_LENGTH` - Generated code length (default: 8)
//! - `CACHE_TTL_SECONDS` - TTL for cached links (default: 86400)
//! - `NEGATIVE_CACHE_TTL_SECONDS` - TTL for not-found markers (default: 300)
//! - `PROCESS_TIMEOUT_SECONDS` - Per-message aggregation deadline (default: 5)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 10)

use anyhow::{Context, Result};
use std::env;

/// Service configuration shared by the API server and the analytics consumer.
#[derive(Debug, Clone)]
pub struct Config {
    pub postgres_dsn: String,
    pub redis_url: Option<String>,
    pub kafka_brokers: String,
    pub kafka_clicks_topic: String,
    pub kafka_consumer_group: String,
    pub base_url: String,
    pub http_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub short_code_length: usize,
    /// TTL (seconds) for cached link entries.
    pub cache_ttl_seconds: u64,
    /// TTL (seconds) for negative-cache markers written on store misses.
    pub negative_cache_ttl_seconds: u64,
    /// Deadline (seconds) for a single aggregation call in the consumer.
    pub process_timeout_seconds: u64,
    pub db_max_connections: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `POSTGRES_DSN` is missing.
    pub fn from_env() -> Result<Self> {
        let postgres_dsn = env::var("POSTGRES_DSN").context("POSTGRES_DSN must be set")?;

        let redis_url = env::var("REDIS_URL").ok().filter(|v| !v.is_empty());

        let kafka_brokers =
            env::var("KAFKA_BROKERS").unwrap_or_else(|_| "localhost:9092".to_string());
        let kafka_clicks_topic =
            env::var("KAFKA_CLICKS_TOPIC").unwrap_or_else(|_| "clicks".to_string());
        let kafka_consumer_group = env::var("KAFKA_CLICKS_CONSUMER_GROUP")
            .unwrap_or_else(|_| "clicks-analytics-consumer".to_string());

        let base_url = env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
        let http_addr = env::var("HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let short_code_length = parse_env("SHORT_CODE_LENGTH", 8);
        let cache_ttl_seconds = parse_env("CACHE_TTL_SECONDS", 24 * 60 * 60);
        let negative_cache_ttl_seconds = parse_env("NEGATIVE_CACHE_TTL_SECONDS", 300);
        let process_timeout_seconds = parse_env("PROCESS_TIMEOUT_SECONDS", 5);
        let db_max_connections = parse_env("DB_MAX_CONNECTIONS", 10);

        Ok(Self {
            postgres_dsn,
            redis_url,
            kafka_brokers,
            kafka_clicks_topic,
            kafka_consumer_group,
            base_url,
            http_addr,
            log_level,
            log_format,
            short_code_length,
            cache_ttl_seconds,
            negative_cache_ttl_seconds,
            process_timeout_seconds,
            db_max_connections,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `KAFKA_BROKERS` or `BASE_URL` is empty
    /// - `SHORT_CODE_LENGTH` is zero or unreasonably large
    /// - `LOG_FORMAT` is not `text` or `json`
    /// - `HTTP_ADDR` is not a valid socket address
    pub fn validate(&self) -> Result<()> {
        if self.kafka_brokers.trim().is_empty() {
            anyhow::bail!("KAFKA_BROKERS must not be empty");
        }

        if self.base_url.trim().is_empty() {
            anyhow::bail!("BASE_URL must not be empty");
        }

        if self.short_code_length == 0 || self.short_code_length > 32 {
            anyhow::bail!(
                "SHORT_CODE_LENGTH must be between 1 and 32, got {}",
                self.short_code_length
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        self.http_addr
            .parse::<std::net::SocketAddr>()
            .with_context(|| format!("HTTP_ADDR is not a valid socket address: {}", self.http_addr))?;

        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
