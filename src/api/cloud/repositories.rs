//
//  bitbucket-cloud
//  api/cloud/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud repository API types and the repositories service.
//!
//! Repositories are the core resource in Bitbucket. They contain the source
//! code, pull requests, issues and webhooks for a project. Each repository
//! belongs to an owner (a user or team) and optionally to a project.
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_cloud::api::cloud::{RepositoryRequest, RepositoryRole};
//! use bitbucket_cloud::BitbucketClient;
//!
//! # async fn example() -> bitbucket_cloud::api::common::Result<()> {
//! let client = BitbucketClient::builder().basic_auth("jdoe", "app-password").build()?;
//!
//! let role = RepositoryRole { role: Some("admin".to_string()) };
//! let mine = client.repositories().list("jdoe", &[&role]).await?;
//!
//! let request = RepositoryRequest {
//!     scm: Some("git".to_string()),
//!     is_private: Some(true),
//!     ..Default::default()
//! };
//! client.repositories().create("jdoe", "backend-service", &request).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Notes
//!
//! - Repository slugs are URL-safe versions of repository names
//! - The `full_name` field follows the format `{owner}/{repo_slug}`
//! - Private repositories require authentication for all operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::teams::Project;
use crate::api::client::BitbucketClient;
use crate::api::common::{ApiResponse, Link, PaginatedResponse, QueryOpts, Result, User};

/// Represents a Bitbucket Cloud repository.
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_cloud::api::cloud::Repository;
///
/// fn display_repo(repo: &Repository) {
///     println!("Repository: {}", repo.full_name.as_deref().unwrap_or("?"));
///     println!("  Private: {}", repo.is_private.unwrap_or(false));
///     if let Some(ref lang) = repo.language {
///         println!("  Language: {}", lang);
///     }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    /// Unique identifier (e.g., `{123e4567-e89b-...}`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    /// Version control system, always `git` today.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scm: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_issues: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_wiki: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// `allow_forks`, `no_public_forks` or `no_forks`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fork_policy: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<RepositoryLinks>,

    /// Human-readable name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Full path in format `{owner}/{repo_slug}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// URL-safe identifier derived from the name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,

    /// Reference to the main branch.
    #[serde(alias = "main_branch", skip_serializing_if = "Option::is_none")]
    pub mainbranch: Option<MainBranch>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<User>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,

    /// Repository this one was forked from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<Repository>>,

    /// Size of the repository in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub repository_type: Option<String>,
}

/// The repository's main branch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MainBranch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub branch_type: Option<String>,
}

/// Links attached to a [`Repository`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryLinks {
    /// Clone URLs, one per protocol (`https`, `ssh`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub clone: Vec<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub watchers: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub branches: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub commits: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub forks: Option<Link>,

    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pullrequests: Option<Link>,
}

impl RepositoryLinks {
    /// The HTTPS clone URL, if Bitbucket returned one.
    pub fn https_clone_url(&self) -> Option<&str> {
        self.clone_url("https")
    }

    /// The SSH clone URL, if Bitbucket returned one.
    pub fn ssh_clone_url(&self) -> Option<&str> {
        self.clone_url("ssh")
    }

    fn clone_url(&self, protocol: &str) -> Option<&str> {
        self.clone
            .iter()
            .find(|link| link.name.as_deref() == Some(protocol))
            .map(|link| link.href.as_str())
    }
}

/// Page of repositories.
pub type Repositories = PaginatedResponse<Repository>;

/// Body for creating or updating a repository.
///
/// Only set fields are sent. `scm` is required on creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scm: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fork_policy: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_wiki: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_issues: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Project the repository is placed in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectKey>,
}

/// Project reference used when creating a repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectKey {
    pub key: String,
}

/// Filters listed repositories by the caller's role: `member`,
/// `contributor`, `admin` or `owner`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryRole {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Options for [`RepositoriesService::delete`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryDeleteOpts {
    /// URL visitors of the deleted repository are redirected to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

/// Repository endpoints under `/repositories`.
#[derive(Debug, Clone, Copy)]
pub struct RepositoriesService<'a> {
    pub(super) client: &'a BitbucketClient,
}

impl<'a> RepositoriesService<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    /// Lists every public repository.
    pub async fn list_public(&self, opts: QueryOpts<'_>) -> Result<ApiResponse<Repositories>> {
        let url = self.client.request_url("/repositories", opts)?;
        self.client.get(&url).await
    }

    /// Lists the repositories of `owner`. Accepts [`RepositoryRole`].
    pub async fn list(&self, owner: &str, opts: QueryOpts<'_>) -> Result<ApiResponse<Repositories>> {
        let url = self
            .client
            .request_url(&format!("/repositories/{}", owner), opts)?;
        self.client.get(&url).await
    }

    /// Gets a single repository.
    pub async fn get(&self, owner: &str, repo_slug: &str) -> Result<ApiResponse<Repository>> {
        self.get_with(owner, repo_slug, &[]).await
    }

    /// Gets a single repository with options such as partial response fields.
    pub async fn get_with(
        &self,
        owner: &str,
        repo_slug: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Repository>> {
        let url = self
            .client
            .request_url(&format!("/repositories/{}/{}", owner, repo_slug), opts)?;
        self.client.get(&url).await
    }

    /// Creates the repository `owner/repo_slug`.
    pub async fn create(
        &self,
        owner: &str,
        repo_slug: &str,
        request: &RepositoryRequest,
    ) -> Result<ApiResponse<Repository>> {
        let url = self
            .client
            .request_url(&format!("/repositories/{}/{}", owner, repo_slug), &[])?;
        self.client.post(&url, request).await
    }

    /// Updates repository settings.
    pub async fn update(
        &self,
        owner: &str,
        repo_slug: &str,
        request: &RepositoryRequest,
    ) -> Result<ApiResponse<Repository>> {
        let url = self
            .client
            .request_url(&format!("/repositories/{}/{}", owner, repo_slug), &[])?;
        self.client.put(&url, request).await
    }

    /// Deletes a repository. Accepts [`RepositoryDeleteOpts`].
    pub async fn delete(
        &self,
        owner: &str,
        repo_slug: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<()>> {
        let url = self
            .client
            .request_url(&format!("/repositories/{}/{}", owner, repo_slug), opts)?;
        self.client.delete(&url).await
    }
}
