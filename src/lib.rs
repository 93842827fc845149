//
//  bitbucket-cloud
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Cloud Client Library
//!
//! An async client for the Bitbucket Cloud REST API v2.0, plus the small
//! `bb` binary built on top of it.
//!
//! ## Overview
//!
//! [`BitbucketClient`] owns the HTTP connection pool, base URL, credentials
//! and default page length. Each resource family is reached through a
//! borrowed service (`client.repositories()`, `client.issues()`, ...) whose
//! methods map one-to-one onto REST endpoints and return typed responses.
//!
//! ## Features
//!
//! - **Typed Resources**: Repositories, pull requests, issues, commits,
//!   refs, source browsing, teams, users and webhooks
//! - **Flexible Queries**: Any `Serialize` struct can be passed as query
//!   options; several are merged into one query string
//! - **Pagination**: Pages carry `next`/`previous` links that can be
//!   fetched with [`BitbucketClient::get`]
//! - **Authentication**: Basic (app passwords), bearer tokens and OAuth 2.0
//!
//! ## Module Structure
//!
//! - [`api`]: HTTP client, resource services and shared types
//! - [`auth`]: Credentials and the OAuth 2.0 token endpoint
//! - [`config`]: TOML configuration and environment overrides
//! - [`cli`]: Command-line interface definitions using clap
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bitbucket_cloud::api::common::FilterSortOpts;
//! use bitbucket_cloud::BitbucketClient;
//!
//! # async fn example() -> bitbucket_cloud::api::common::Result<()> {
//! let client = BitbucketClient::builder()
//!     .basic_auth("jdoe", "app-password")
//!     .build()?;
//!
//! let open = FilterSortOpts {
//!     q: Some(r#"state="open""#.to_string()),
//!     sort: Some("-updated_on".to_string()),
//! };
//! let issues = client.issues().list("team", "web", &[&open]).await?;
//! for issue in &issues.values {
//!     println!("#{} {}", issue.id.unwrap_or_default(), issue.title.as_deref().unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

/// Bitbucket Cloud API client.
///
/// Contains the HTTP client, one service per resource family, and the
/// error, pagination and query option types they share.
pub mod api;

/// Authentication credentials.
///
/// Handles:
/// - HTTP Basic with app passwords
/// - Static bearer tokens
/// - OAuth 2.0 token exchange and refresh
pub mod auth;

/// Configuration file management.
///
/// Settings are stored in platform-specific locations:
/// - Linux: `~/.config/bitbucket-cloud/config.toml`
/// - macOS: `~/Library/Application Support/bitbucket-cloud/config.toml`
/// - Windows: `%APPDATA%\bitbucket-cloud\config\config.toml`
pub mod config;

/// Command-line interface for the `bb` binary.
pub mod cli;

/// Re-export of the API client.
///
/// # Example
///
/// ```rust
/// use bitbucket_cloud::BitbucketClient;
///
/// let client = BitbucketClient::new().unwrap();
/// assert_eq!(client.base_url(), "https://api.bitbucket.org/2.0");
/// ```
pub use api::BitbucketClient;

/// Re-export of the main CLI struct for convenient access.
pub use cli::Cli;

/// Re-export of the configuration struct.
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_cloud::Config;
///
/// let config = Config::load().expect("Failed to load config");
/// if let Some(pagelen) = config.get("pagelen") {
///     println!("Page length: {}", pagelen);
/// }
/// ```
pub use config::Config;

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes.
pub const APP_NAME: &str = "bb";

/// Application version constant.
///
/// The current crate version, derived from Cargo.toml at compile time. Also
/// used in the default `User-Agent`.
///
/// # Example
///
/// ```rust
/// use bitbucket_cloud::VERSION;
///
/// println!("bb version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes following Unix conventions, allowing scripts
/// to programmatically detect the outcome of CLI operations.
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_cloud::exit_codes;
/// use std::process;
///
/// // Exit with authentication error
/// process::exit(exit_codes::AUTH_ERROR);
/// ```
pub mod exit_codes {
    use crate::api::ApiError;

    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// An unspecified error occurred during execution.
    /// Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments. Emitted by clap itself.
    pub const USAGE: i32 = 2;

    /// Authentication required or failed.
    ///
    /// The API answered 401 or 403, or an OAuth token exchange failed.
    /// Check `--user`/`--pass` or `--token`.
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found.
    ///
    /// The requested resource does not exist or the caller cannot see it.
    pub const NOT_FOUND: i32 = 8;

    /// API rate limit exceeded (HTTP 429).
    pub const RATE_LIMIT: i32 = 32;

    /// Maps an error to its exit code.
    ///
    /// Looks for an [`ApiError`] anywhere in the chain; other errors map to
    /// [`ERROR`].
    pub fn for_error(err: &anyhow::Error) -> i32 {
        let Some(api) = err.chain().find_map(|e| e.downcast_ref::<ApiError>()) else {
            return ERROR;
        };
        if matches!(api, ApiError::AuthFailed(_)) {
            return AUTH_ERROR;
        }
        match api.status().map(|s| s.as_u16()) {
            Some(401) | Some(403) => AUTH_ERROR,
            Some(404) => NOT_FOUND,
            Some(429) => RATE_LIMIT,
            _ => ERROR,
        }
    }

}
