//
//  bitbucket-cloud
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Client settings stored as TOML in a platform-specific directory, plus the
//! credentials the `bb` binary collects from flags and the environment.
//!
//! Nothing in [`crate::api`] reads this module. A program opts in by loading
//! a [`Config`] and turning it into a [`ClientBuilder`] with
//! [`Config::client_builder`].
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/bitbucket-cloud/config.toml`
//! - **macOS**: `~/Library/Application Support/bitbucket-cloud/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\bitbucket-cloud\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! base_url = "https://api.bitbucket.org/2.0"
//! user_agent = "release-bot/1.0"
//! timeout_secs = 30
//! pagelen = 50
//! username = "jdoe"
//!
//! [headers]
//! X-Request-Source = "ci"
//! ```
//!
//! ## Environment
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `BB_HOST` | `base_url` |
//! | `BB_USER` | `username` |
//! | `BB_PASS` | app password (never stored) |
//! | `BB_TOKEN` | bearer token (never stored) |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bitbucket_cloud::config::{Config, Credentials};
//!
//! let mut config = Config::load()?;
//! config.apply_env();
//!
//! let client = config.client_builder(&Credentials::from_env()).build()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::client::ClientBuilder;

/// Environment variable overriding the API base URL.
pub const ENV_HOST: &str = "BB_HOST";
/// Environment variable holding the username for Basic auth.
pub const ENV_USER: &str = "BB_USER";
/// Environment variable holding the app password for Basic auth.
pub const ENV_PASS: &str = "BB_PASS";
/// Environment variable holding a bearer token.
pub const ENV_TOKEN: &str = "BB_TOKEN";

/// Persistent client settings.
///
/// Every field is optional; unset fields leave the client default in place.
///
/// # Examples
///
/// ```rust
/// use bitbucket_cloud::config::Config;
///
/// let config: Config = toml::from_str("pagelen = 50\n[headers]\nX-Team = \"web\"").unwrap();
/// assert_eq!(config.pagelen, Some(50));
/// assert_eq!(config.headers["X-Team"], "web");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API root without a trailing slash.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Default page length for repository listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagelen: Option<u32>,

    /// Username used with an app password when none is given explicitly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Extra headers sent with every request.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

/// Secrets supplied at run time. Never written to disk.
#[derive(Clone, Default, PartialEq)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Credentials {
    /// Reads `BB_USER`, `BB_PASS` and `BB_TOKEN`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds credentials from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            username: non_empty(ENV_USER),
            password: non_empty(ENV_PASS),
            token: non_empty(ENV_TOKEN),
        }
    }
}

impl Config {
    /// Loads configuration from the default location.
    ///
    /// A missing file is not an error; defaults are returned.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The configuration directory cannot be determined
    /// - The file exists but cannot be read
    /// - The file is not valid TOML for this schema
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("invalid config in {}", path.display()))
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Writes the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    ///
    /// The file may not exist; this only returns where it would be.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "bitbucket-cloud")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Applies `BB_HOST` and `BB_USER` from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_lookup(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary variable source.
    pub fn apply_lookup(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup(ENV_HOST).filter(|v| !v.is_empty()) {
            self.base_url = Some(host);
        }
        if let Some(user) = lookup(ENV_USER).filter(|v| !v.is_empty()) {
            self.username = Some(user);
        }
    }

    /// Turns this configuration and `credentials` into a client builder.
    ///
    /// A token wins over a password. A password without a username falls
    /// back to [`Config::username`]; with neither, no credential is set.
    pub fn client_builder(&self, credentials: &Credentials) -> ClientBuilder {
        let mut builder = ClientBuilder::default();

        if let Some(url) = &self.base_url {
            builder = builder.base_url(url.trim_end_matches('/'));
        }
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(pagelen) = self.pagelen {
            builder = builder.pagelen(pagelen);
        }
        builder = builder.headers(self.headers.clone());

        let username = credentials.username.as_ref().or(self.username.as_ref());
        match (&credentials.token, username, &credentials.password) {
            (Some(token), _, _) => builder.bearer_token(token),
            (None, Some(user), Some(pass)) => builder.basic_auth(user, pass),
            _ => builder,
        }
    }

    /// Gets a setting by key, for `bb config get`.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "base_url" => self.base_url.clone(),
            "user_agent" => self.user_agent.clone(),
            "timeout_secs" => self.timeout_secs.map(|v| v.to_string()),
            "pagelen" => self.pagelen.map(|v| v.to_string()),
            "username" => self.username.clone(),
            _ => key
                .strip_prefix("headers.")
                .and_then(|name| self.headers.get(name).cloned()),
        }
    }

    /// Sets a setting by key, for `bb config set`.
    ///
    /// Changes are only persisted when [`Config::save`] is called.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown key or a non-numeric value for a
    /// numeric setting.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "base_url" => self.base_url = Some(value.trim_end_matches('/').to_string()),
            "user_agent" => self.user_agent = Some(value.to_string()),
            "timeout_secs" => {
                self.timeout_secs = Some(
                    value
                        .parse()
                        .with_context(|| format!("timeout_secs must be a number, got '{}'", value))?,
                )
            }
            "pagelen" => {
                self.pagelen = Some(
                    value
                        .parse()
                        .with_context(|| format!("pagelen must be a number, got '{}'", value))?,
                )
            }
            "username" => self.username = Some(value.to_string()),
            _ => match key.strip_prefix("headers.") {
                Some(name) if !name.is_empty() => {
                    self.headers.insert(name.to_string(), value.to_string());
                }
                _ => anyhow::bail!("unknown config key '{}'", key),
            },
        }
        Ok(())
    }
}
