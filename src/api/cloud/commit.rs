//
//  bitbucket-cloud
//  api/cloud/commit.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Single-commit endpoints: approvals, comments and build statuses.
//!
//! Build statuses are how CI systems report results on a commit. A status is
//! identified by its `key`; posting a second status with the same key
//! replaces the first.
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_cloud::api::cloud::CommitStatusRequest;
//! use bitbucket_cloud::BitbucketClient;
//!
//! # async fn example() -> bitbucket_cloud::api::common::Result<()> {
//! let client = BitbucketClient::builder().bearer_token("token").build()?;
//! let status = CommitStatusRequest {
//!     key: Some("ci-build".to_string()),
//!     state: Some("SUCCESSFUL".to_string()),
//!     url: Some("https://ci.example.com/builds/42".to_string()),
//!     ..Default::default()
//! };
//! client
//!     .commit()
//!     .create_status("team", "repo", "1d3c8a5", &status)
//!     .await?;
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::comment::{Comment, CommentRequest, Comments};
use super::commits::Commit;
use crate::api::client::BitbucketClient;
use crate::api::common::{
    ApiResponse, PaginatedResponse, Participant, QueryOpts, Result, SelfLinks,
};

/// A build status reported on a commit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    /// Identifier chosen by the reporter; unique per commit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refname: Option<String>,

    /// Link to the build.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// `INPROGRESS`, `SUCCESSFUL`, `FAILED` or `STOPPED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<SelfLinks>,
}

/// Page of build statuses.
pub type CommitStatuses = PaginatedResponse<CommitStatus>;

/// Body for creating or updating a build status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitStatusRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refname: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Endpoints under `/repositories/{owner}/{repo_slug}/commit/{sha}`.
#[derive(Debug, Clone, Copy)]
pub struct CommitService<'a> {
    client: &'a BitbucketClient,
}

impl<'a> CommitService<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    fn path(owner: &str, repo_slug: &str, sha: &str) -> String {
        format!("/repositories/{}/{}/commit/{}", owner, repo_slug, sha)
    }

    /// Gets a commit.
    pub async fn get(
        &self,
        owner: &str,
        repo_slug: &str,
        sha: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Commit>> {
        let url = self
            .client
            .request_url(&Self::path(owner, repo_slug, sha), opts)?;
        self.client.get(&url).await
    }

    /// Approves a commit as the authenticated user.
    pub async fn approve(
        &self,
        owner: &str,
        repo_slug: &str,
        sha: &str,
    ) -> Result<ApiResponse<Participant>> {
        let path = format!("{}/approve", Self::path(owner, repo_slug, sha));
        let url = self.client.request_url(&path, &[])?;
        self.client.post_empty(&url).await
    }

    /// Withdraws the authenticated user's approval.
    pub async fn unapprove(&self, owner: &str, repo_slug: &str, sha: &str) -> Result<ApiResponse<()>> {
        let path = format!("{}/approve", Self::path(owner, repo_slug, sha));
        let url = self.client.request_url(&path, &[])?;
        self.client.delete(&url).await
    }

    /// Lists comments on a commit.
    pub async fn list_comments(
        &self,
        owner: &str,
        repo_slug: &str,
        sha: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Comments>> {
        let path = format!("{}/comments", Self::path(owner, repo_slug, sha));
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }

    /// Comments on a commit.
    pub async fn create_comment(
        &self,
        owner: &str,
        repo_slug: &str,
        sha: &str,
        request: &CommentRequest,
    ) -> Result<ApiResponse<Comment>> {
        let path = format!("{}/comments", Self::path(owner, repo_slug, sha));
        let url = self.client.request_url(&path, &[])?;
        self.client.post(&url, request).await
    }

    /// Gets a single commit comment.
    pub async fn get_comment(
        &self,
        owner: &str,
        repo_slug: &str,
        sha: &str,
        comment_id: i64,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Comment>> {
        let path = format!(
            "{}/comments/{}",
            Self::path(owner, repo_slug, sha),
            comment_id
        );
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }

    /// Lists build statuses on a commit.
    pub async fn list_statuses(
        &self,
        owner: &str,
        repo_slug: &str,
        sha: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<CommitStatuses>> {
        let path = format!("{}/statuses", Self::path(owner, repo_slug, sha));
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }

    /// Reports a build status.
    pub async fn create_status(
        &self,
        owner: &str,
        repo_slug: &str,
        sha: &str,
        request: &CommitStatusRequest,
    ) -> Result<ApiResponse<CommitStatus>> {
        let path = format!("{}/statuses/build", Self::path(owner, repo_slug, sha));
        let url = self.client.request_url(&path, &[])?;
        self.client.post(&url, request).await
    }

    /// Gets the build status reported under `key`.
    pub async fn get_status(
        &self,
        owner: &str,
        repo_slug: &str,
        sha: &str,
        key: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<CommitStatus>> {
        let path = format!(
            "{}/statuses/build/{}",
            Self::path(owner, repo_slug, sha),
            key
        );
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }

    /// Updates the build status reported under `key`.
    pub async fn update_status(
        &self,
        owner: &str,
        repo_slug: &str,
        sha: &str,
        key: &str,
        request: &CommitStatusRequest,
    ) -> Result<ApiResponse<CommitStatus>> {
        let path = format!(
            "{}/statuses/build/{}",
            Self::path(owner, repo_slug, sha),
            key
        );
        let url = self.client.request_url(&path, &[])?;
        self.client.put(&url, request).await
    }
}
