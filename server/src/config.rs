//! Server configuration parsed from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SITE_ROOT: &str = "site";

/// Errors raised while reading configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed.
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket the HTTP listener binds to.
    pub bind: SocketAddr,
    /// Whether issued cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
    /// YAML user directory; `None` selects the built-in demo account.
    pub users_file: Option<PathBuf>,
    /// Directory holding the built client (`pkg/`) and static `assets/`.
    pub site_root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            cookie_secure: false,
            users_file: None,
            site_root: PathBuf::from(DEFAULT_SITE_ROOT),
        }
    }
}

impl ServerConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `BIND_ADDR`: default `0.0.0.0`
    /// - `PORT`: default 3000
    /// - `COOKIE_SECURE`: `1/true/yes/on` or `0/false/no/off`, default off
    /// - `METRO_USERS_FILE`: path to the YAML user directory
    /// - `SITE_ROOT`: default `site`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable is present but unparseable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let ip = match lookup("BIND_ADDR") {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::Invalid { var: "BIND_ADDR", value: raw })?,
            None => defaults.bind.ip(),
        };
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { var: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };
        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { var: "COOKIE_SECURE", value: raw })?,
            None => defaults.cookie_secure,
        };
        let users_file = lookup("METRO_USERS_FILE")
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);
        let site_root = lookup("SITE_ROOT")
            .filter(|raw| !raw.trim().is_empty())
            .map_or(defaults.site_root, PathBuf::from);

        Ok(Self { bind: SocketAddr::new(ip, port), cookie_secure, users_file, site_root })
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
