//
//  bitbucket-cloud
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod api;
mod config;
mod issue;
mod pr;
mod repo;

pub use api::ApiCommand;
pub use config::ConfigCommand;
pub use issue::IssueCommand;
pub use pr::PrCommand;
pub use repo::RepoCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::api::BitbucketClient;
use crate::config::{Config, Credentials};

/// bb - Work with the Bitbucket Cloud API from the command line
#[derive(Parser, Debug)]
#[command(
    name = "bb",
    version,
    about = "Work with the Bitbucket Cloud API from the command line",
    long_about = "bb is a small companion to the bitbucket-cloud library.\n\n\
                  It lists and inspects repositories, pull requests and issues, \
                  and makes raw API requests.",
    propagate_version = true,
    after_help = "Use 'bb <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// API base URL (defaults to https://api.bitbucket.org/2.0)
    #[arg(long, global = true, env = "BB_HOST")]
    pub host: Option<String>,

    /// Username for Basic authentication
    #[arg(long, global = true, env = "BB_USER")]
    pub user: Option<String>,

    /// App password for Basic authentication
    #[arg(long, global = true, env = "BB_PASS", hide_env_values = true)]
    pub pass: Option<String>,

    /// Bearer token (repository, project or workspace access token)
    #[arg(long, global = true, env = "BB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Credentials from flags, already merged with the environment by clap.
    pub fn credentials(&self) -> Credentials {
        let non_empty = |v: &Option<String>| v.clone().filter(|s| !s.is_empty());
        Credentials {
            username: non_empty(&self.user),
            password: non_empty(&self.pass),
            token: non_empty(&self.token),
        }
    }

    /// Builds a client from the config file and these options.
    pub fn client(&self) -> Result<BitbucketClient> {
        let mut config = Config::load()?;
        if let Some(host) = self.host.as_ref().filter(|h| !h.is_empty()) {
            config.base_url = Some(host.clone());
        }
        Ok(config.client_builder(&self.credentials()).build()?)
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Work with issues
    Issue(IssueCommand),

    /// Work with repositories
    #[command(visible_alias = "r")]
    Repo(RepoCommand),

    /// Work with pull requests
    Pr(PrCommand),

    /// Make a raw GET request
    Api(ApiCommand),

    /// Manage client configuration
    Config(ConfigCommand),

    /// Print version information
    Version,
}

/// Prints `value` as pretty JSON.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
