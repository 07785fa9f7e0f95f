/*
 * Responsibility
 * - Load settings from the environment (PORT, APP_ENV, auth handoff settings)
 * - Validate them once at startup; a missing or blank required value aborts
 * - Hand the request path an immutable `HandoffConfig` (no env reads per request)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use url::Url;

pub const AUTH_APP_URL: &str = "AUTH_APP_URL";
pub const APP_URL: &str = "APP_URL";
pub const ALLOWED_REDIRECT_DOMAINS: &str = "ALLOWED_REDIRECT_DOMAINS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.unwrap_or("development").to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "Missing required env: {}", key),
            ConfigError::Invalid(key) => write!(f, "Invalid required env: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings the gate and the logout route need to build handoff URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffConfig {
    pub auth_app_url: Url,
    pub app_url: Url,
    // host or host:port, as configured (matching is case-insensitive)
    pub allowed_domains: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub handoff: HandoffConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source (the process env in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let auth_app_url = required_url(AUTH_APP_URL, lookup(AUTH_APP_URL))?;
        let app_url = required_url(APP_URL, lookup(APP_URL))?;
        let allowed_domains = parse_allowed_domains(lookup(ALLOWED_REDIRECT_DOMAINS).as_deref())?;

        Ok(Self {
            addr,
            app_env,
            handoff: HandoffConfig {
                auth_app_url,
                app_url,
                allowed_domains,
            },
        })
    }
}

fn required(key: &'static str, raw: Option<String>) -> Result<String, ConfigError> {
    raw.map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(key))
}

// Absolute http(s) URL with a host; anything else would misdirect the handoff.
fn required_url(key: &'static str, raw: Option<String>) -> Result<Url, ConfigError> {
    let value = required(key, raw)?;
    let url = Url::parse(&value).map_err(|_| ConfigError::Invalid(key))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::Invalid(key));
    }
    Ok(url)
}

/// Comma-separated list; an empty result counts as missing.
pub fn parse_allowed_domains(raw: Option<&str>) -> Result<Vec<String>, ConfigError> {
    let domains: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if domains.is_empty() {
        return Err(ConfigError::Missing(ALLOWED_REDIRECT_DOMAINS));
    }
    Ok(domains)
}
