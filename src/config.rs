//! Service Configuration
//!
//! Settings come from environment variables, overridden by command-line
//! flags:
//!
//! | Flag            | Environment          | Default          |
//! |-----------------|----------------------|------------------|
//! | `--port`        | `PORT`               | `5000`           |
//! | `--documents`   | `DOCUMENTS_PATH`     | `coleccion_2022` |
//! | `--extension`   | `DOCUMENT_EXTENSION` | `txt`            |
//! | `--cache-ttl`   | `CACHE_TTL_SECS`     | `60` (0 = off)   |
//! | `--no-cache`    |                      |                  |

use anyhow::{Context, Result, bail};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::index::collection::DEFAULT_EXTENSION;
use crate::search::cache::DEFAULT_TTL;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DOCUMENTS_PATH: &str = "coleccion_2022";

pub const USAGE: &str = "Usage: termfreq [--port <port>] [--documents <dir>] \
[--extension <ext>] [--cache-ttl <secs>] [--no-cache]";

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub port: u16,
    pub documents_path: PathBuf,
    /// Recognized document extension, without the leading dot.
    pub extension: String,
    /// `None` disables the response cache.
    pub cache_ttl: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            documents_path: PathBuf::from(DEFAULT_DOCUMENTS_PATH),
            extension: DEFAULT_EXTENSION.to_string(),
            cache_ttl: Some(DEFAULT_TTL),
        }
    }
}

impl ServiceConfig {
    /// Reads the process environment and command line.
    pub fn from_env_and_args() -> Result<Self> {
        Self::parse(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// Builds a config from explicit arguments (without the program name)
    /// and an environment lookup.
    pub fn parse<I, F>(args: I, env: F) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = env("PORT") {
            config.port = parse_port(&port).context("Invalid PORT")?;
        }
        if let Some(path) = env("DOCUMENTS_PATH") {
            config.documents_path = PathBuf::from(path);
        }
        if let Some(ext) = env("DOCUMENT_EXTENSION") {
            config.extension = normalize_extension(&ext)?;
        }
        if let Some(ttl) = env("CACHE_TTL_SECS") {
            config.cache_ttl = parse_ttl(&ttl).context("Invalid CACHE_TTL_SECS")?;
        }

        let args: Vec<String> = args.into_iter().collect();
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--port" => {
                    config.port = parse_port(flag_value(&args, i)?)?;
                    i += 2;
                }
                "--documents" => {
                    config.documents_path = PathBuf::from(flag_value(&args, i)?);
                    i += 2;
                }
                "--extension" => {
                    config.extension = normalize_extension(flag_value(&args, i)?)?;
                    i += 2;
                }
                "--cache-ttl" => {
                    config.cache_ttl = parse_ttl(flag_value(&args, i)?)?;
                    i += 2;
                }
                "--no-cache" => {
                    config.cache_ttl = None;
                    i += 1;
                }
                other => {
                    bail!("Unknown argument '{}'\n{}", other, USAGE);
                }
            }
        }

        Ok(config)
    }

    /// All interfaces on the configured port.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn flag_value(args: &[String], i: usize) -> Result<&str> {
    match args.get(i + 1) {
        Some(value) => Ok(value.as_str()),
        None => bail!("{} requires a value\n{}", args[i], USAGE),
    }
}

fn parse_port(value: &str) -> Result<u16> {
    value
        .trim()
        .parse::<u16>()
        .with_context(|| format!("'{}' is not a valid port", value))
}

fn parse_ttl(value: &str) -> Result<Option<Duration>> {
    let secs = value
        .trim()
        .parse::<u64>()
        .with_context(|| format!("'{}' is not a number of seconds", value))?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}

fn normalize_extension(value: &str) -> Result<String> {
    let ext = value.trim().trim_start_matches('.');
    if ext.is_empty() {
        bail!("Document extension must not be empty");
    }
    Ok(ext.to_string())
}
