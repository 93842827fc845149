//
//  bitbucket-cloud
//  api/cloud/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bitbucket Cloud API v2.0 resources.
//!
//! One module per resource family. Each holds the JSON types for that
//! family and a service struct borrowed from [`BitbucketClient`] through an
//! accessor such as [`BitbucketClient::issues`].
//!
//! # Module Organization
//!
//! - [`repositories`] / [`repository_hooks`] - Repositories and their webhooks
//! - [`pullrequests`] / [`pullrequest_activity`] / [`pullrequest_comments`] - Pull requests
//! - [`issues`] / [`issue_comments`] / [`issue_changes`] - Issue tracker
//! - [`issue_tracker`] - Components, milestones and versions
//! - [`commit`] / [`commits`] / [`diff`] - Commits, statuses and diffs
//! - [`refs`] / [`branch_restrictions`] / [`branching_model`] - Branches and tags
//! - [`source`] - `/src` browsing and file history
//! - [`default_reviewers`], [`deploy_keys`], [`downloads`], [`forks`], [`watchers`]
//! - [`teams`] / [`user`] / [`users`] / [`search`] - Accounts and code search
//! - [`hook_events`] - Webhook event catalogue
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_cloud::api::cloud::PullRequestRequest;
//! use bitbucket_cloud::BitbucketClient;
//!
//! # async fn example() -> bitbucket_cloud::api::common::Result<()> {
//! let client = BitbucketClient::builder().bearer_token("token").build()?;
//!
//! let request = PullRequestRequest::new("Add login page", "feature/login", "main");
//! let pr = client.pull_requests().create("team", "web", &request).await?;
//! println!("opened #{}", pr.id.unwrap_or_default());
//! # Ok(())
//! # }
//! ```
//!
//! # Notes
//!
//! - All timestamps are ISO 8601 and decode to `chrono::DateTime<Utc>`
//! - UUIDs are returned with curly braces (e.g., `{123e4567-e89b-...}`)
//! - Lists are paged; follow `next` with [`BitbucketClient::get`]
//!
//! [`BitbucketClient`]: crate::api::BitbucketClient
//! [`BitbucketClient::issues`]: crate::api::BitbucketClient::issues
//! [`BitbucketClient::get`]: crate::api::BitbucketClient::get

pub mod branch_restrictions;
pub mod branching_model;
pub mod comment;
pub mod commit;
pub mod commits;
pub mod default_reviewers;
pub mod deploy_keys;
pub mod diff;
pub mod downloads;
pub mod forks;
pub mod hook_events;
pub mod issue_changes;
pub mod issue_comments;
pub mod issue_tracker;
pub mod issues;
pub mod pullrequest_activity;
pub mod pullrequest_comments;
pub mod pullrequests;
pub mod refs;
pub mod repositories;
pub mod repository_hooks;
pub mod search;
pub mod source;
pub mod teams;
pub mod user;
pub mod users;
pub mod watchers;

pub use branch_restrictions::*;
pub use branching_model::*;
pub use comment::*;
pub use commit::*;
pub use commits::*;
pub use default_reviewers::*;
pub use deploy_keys::*;
pub use diff::*;
pub use downloads::*;
pub use forks::*;
pub use hook_events::*;
pub use issue_changes::*;
pub use issue_tracker::*;
pub use issues::*;
pub use pullrequest_activity::*;
pub use pullrequests::*;
pub use refs::*;
pub use repositories::*;
pub use repository_hooks::*;
pub use search::*;
pub use source::*;
pub use teams::*;
pub use user::*;
pub use users::*;
pub use watchers::*;
