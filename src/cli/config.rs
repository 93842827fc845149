//
//  bitbucket-cloud
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Configuration commands
//!
//! Reads and writes the TOML settings file used to build the client.
//! Secrets are never stored here; pass them with `--pass`/`--token` or the
//! `BB_PASS`/`BB_TOKEN` environment variables.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use crate::config::Config;

use super::{print_json, GlobalOptions};

/// Valid configuration keys, besides `headers.<Name>`
const VALID_KEYS: &[&str] = &["base_url", "user_agent", "timeout_secs", "pagelen", "username"];

/// Manage client configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g. pagelen, headers.X-Team)
    pub key: String,

    /// Configuration value
    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Set(args) => self.set(args),
            ConfigSubcommand::List => self.list(global),
            ConfigSubcommand::Path => self.path(global),
        }
    }

    fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let value = config.get(&args.key);

        if global.json {
            return print_json(&serde_json::json!({ "key": args.key, "value": value }));
        }
        match value {
            Some(v) => println!("{}", v),
            None if is_known_key(&args.key) => {}
            None => bail!(
                "Unknown config key '{}'. Valid keys: {}, headers.<Name>",
                args.key,
                VALID_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    fn set(&self, args: &SetArgs) -> Result<()> {
        let mut config = Config::load()?;
        config.set(&args.key, &args.value)?;
        config.save()?;
        tracing::debug!("set {} in {}", args.key, Config::config_path()?.display());
        Ok(())
    }

    fn list(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        if global.json {
            return print_json(&config);
        }
        print!("{}", toml::to_string_pretty(&config)?);
        Ok(())
    }

    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let path = Config::config_path()?;
        if global.json {
            return print_json(&serde_json::json!({ "path": path }));
        }
        println!("{}", path.display());
        Ok(())
    }
}

fn is_known_key(key: &str) -> bool {
    VALID_KEYS.contains(&key) || key.starts_with("headers.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys() {
        assert!(is_known_key("pagelen"));
        assert!(is_known_key("headers.X-Team"));
        assert!(!is_known_key("editor"));
    }
}
