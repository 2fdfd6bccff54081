//! Configuration module
//!
//! This module provides the configuration structures for the HTTP server and the
//! barcode decoder backends. Values are read from the environment (optionally seeded
//! from a `.env` file) once at startup and passed down explicitly.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

// Common constants
const SERVER_PORT: u16 = 5002;
// Browser `Origin` headers never carry a path, so the inventory locator pages are
// listed by scheme and host.
const CORS_ORIGINS: &str = "http://localhost:3000,\
https://stg2-jp.misumi-ec.com,\
https://usertest2025-07-jp.misumi-ec.com";
const MAX_FILE_SIZE_MB: usize = 10;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;
const DECODER_COMMAND: &str = "zxing";
const DECODER_TIMEOUT_SECS: u64 = 30;

/// Which barcode decoder implementation serves requests
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DecoderBackend {
    /// In-process recognition library
    #[default]
    Library,
    /// External command-line decoder run against a temporary file
    Command,
}

impl DecoderBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecoderBackend::Library => "library",
            DecoderBackend::Command => "command",
        }
    }
}

impl fmt::Display for DecoderBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecoderBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "library" | "in-process" | "inprocess" | "rxing" => Ok(DecoderBackend::Library),
            "command" | "subprocess" | "cli" => Ok(DecoderBackend::Command),
            other => Err(anyhow::anyhow!(
                "Unknown DECODER_BACKEND '{}'. Expected 'library' or 'command'",
                other
            )),
        }
    }
}

/// Console log output format
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" | "text" | "pretty" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!("Unknown LOG_FORMAT '{}'", other)),
        }
    }
}

/// HTTP server configuration
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub max_file_size_bytes: usize,
    pub http_concurrency_limit: usize,
    pub log_format: LogFormat,
}

/// Decoder backend configuration
#[derive(Clone, Debug)]
pub struct DecoderConfig {
    pub backend: DecoderBackend,
    /// Executable used by the command backend
    pub command: String,
    /// Arguments placed before the image path
    pub command_args: Vec<String>,
    pub timeout_secs: u64,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub decoder: DecoderConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| CORS_ORIGINS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_file_size_mb = lookup("MAX_FILE_SIZE_MB")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(MAX_FILE_SIZE_MB);
        let Some(max_file_size_bytes) = max_file_size_mb.checked_mul(1024 * 1024) else {
            anyhow::bail!("MAX_FILE_SIZE_MB is too large: {}", max_file_size_mb);
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(s) => s.parse()?,
            None => LogFormat::default(),
        };

        let base = BaseConfig {
            server_port: lookup("PORT")
                .unwrap_or_else(|| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            max_file_size_bytes,
            http_concurrency_limit: lookup("HTTP_CONCURRENCY_LIMIT")
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
            log_format,
        };

        let backend = match lookup("DECODER_BACKEND") {
            Some(s) => s.parse()?,
            None => DecoderBackend::default(),
        };

        let decoder = DecoderConfig {
            backend,
            command: lookup("DECODER_COMMAND")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DECODER_COMMAND.to_string()),
            command_args: lookup("DECODER_COMMAND_ARGS")
                .map(|s| s.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
            timeout_secs: lookup("DECODER_TIMEOUT_SECS")
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(DECODER_TIMEOUT_SECS),
        };

        Ok(Config { base, decoder })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.cors_origins.is_empty() {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS must list at least one origin"
            ));
        }

        if self.is_production() && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.base.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }

        if self.decoder.timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "DECODER_TIMEOUT_SECS must be greater than 0"
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.base.max_file_size_bytes
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.base.http_concurrency_limit
    }

    pub fn log_format(&self) -> LogFormat {
        self.base.log_format
    }

    pub fn decoder_backend(&self) -> DecoderBackend {
        self.decoder.backend
    }

    pub fn decoder_command(&self) -> &str {
        &self.decoder.command
    }

    pub fn decoder_command_args(&self) -> &[String] {
        &self.decoder.command_args
    }

    pub fn decoder_timeout(&self) -> Duration {
        Duration::from_secs(self.decoder.timeout_secs)
    }
}
