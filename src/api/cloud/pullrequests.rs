//
//  bitbucket-cloud
//  api/cloud/pullrequests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud pull request API types and the pull requests service.
//!
//! # Pull Request Lifecycle
//!
//! 1. **Creation**: A PR is created from a source branch to a destination branch
//! 2. **Review**: Reviewers comment on and approve the changes
//! 3. **Resolution**: The PR is either merged or declined
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_cloud::api::cloud::{MergeRequest, PullRequestRequest};
//! use bitbucket_cloud::api::common::FilterSortOpts;
//! use bitbucket_cloud::BitbucketClient;
//!
//! # async fn example() -> bitbucket_cloud::api::common::Result<()> {
//! let client = BitbucketClient::builder().basic_auth("jdoe", "app-password").build()?;
//! let prs = client.pull_requests();
//!
//! let open = FilterSortOpts {
//!     q: Some(r#"state = "OPEN""#.to_string()),
//!     sort: Some("-updated_on".to_string()),
//! };
//! let page = prs.list("team", "repo", &[&open]).await?;
//!
//! let created = prs
//!     .create("team", "repo", &PullRequestRequest::new("Add feature X", "feature/x", "main"))
//!     .await?;
//!
//! let merge = MergeRequest {
//!     merge_strategy: Some("squash".to_string()),
//!     close_source_branch: Some(true),
//!     ..Default::default()
//! };
//! prs.merge("team", "repo", created.id.unwrap_or_default(), Some(&merge)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Notes
//!
//! - PR IDs are unique within a repository, not globally
//! - States are `OPEN`, `MERGED`, `DECLINED` and `SUPERSEDED`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::commit::CommitStatuses;
use super::commits::{Commit, Commits};
use super::diff::DiffStats;
use super::repositories::Repository;
use crate::api::client::BitbucketClient;
use crate::api::common::{
    ApiResponse, Content, Link, PaginatedResponse, Participant, QueryOpts, Result, User,
};

/// Represents a Bitbucket Cloud pull request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequest {
    /// Repository-scoped identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendered: Option<PullRequestRendered>,

    /// `OPEN`, `MERGED`, `DECLINED` or `SUPERSEDED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PullRequestEndpoint>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<PullRequestEndpoint>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_commit: Option<Commit>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_source_branch: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_by: Option<User>,

    /// Why the PR was declined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reviewers: Vec<User>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<Participant>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<PullRequestLinks>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub pullrequest_type: Option<String>,
}

/// Rendered title and description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestRendered {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Content>,
}

/// Source or destination of a pull request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestEndpoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<BranchName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<Commit>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
}

/// A branch referenced by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchName {
    #[serde(default)]
    pub name: String,
}

/// Links attached to a [`PullRequest`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestLinks {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub commits: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub approve: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diffstat: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses: Option<Link>,
}

impl PullRequest {
    /// Source branch name, or an empty string.
    pub fn source_branch(&self) -> &str {
        Self::branch_of(self.source.as_ref())
    }

    /// Destination branch name, or an empty string.
    pub fn destination_branch(&self) -> &str {
        Self::branch_of(self.destination.as_ref())
    }

    fn branch_of(endpoint: Option<&PullRequestEndpoint>) -> &str {
        endpoint
            .and_then(|e| e.branch.as_ref())
            .map(|b| b.name.as_str())
            .unwrap_or_default()
    }
}

/// Page of pull requests.
pub type PullRequests = PaginatedResponse<PullRequest>;

/// Body for creating or updating a pull request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequestRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PullRequestEndpointRequest>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<PullRequestEndpointRequest>,

    /// Reviewers, identified by `uuid` or `account_id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewers: Option<Vec<User>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_source_branch: Option<bool>,
}

impl PullRequestRequest {
    /// A request for a new PR from `source` into `destination`.
    pub fn new(
        title: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            source: Some(PullRequestEndpointRequest::branch(source)),
            destination: Some(PullRequestEndpointRequest::branch(destination)),
            ..Default::default()
        }
    }
}

/// Branch selection in a [`PullRequestRequest`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequestEndpointRequest {
    pub branch: BranchName,

    /// Source repository, for PRs from a fork.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<RepositoryFullName>,
}

impl PullRequestEndpointRequest {
    /// Selects `name` in the target repository.
    pub fn branch(name: impl Into<String>) -> Self {
        Self {
            branch: BranchName { name: name.into() },
            repository: None,
        }
    }
}

/// Repository reference by `owner/slug`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryFullName {
    pub full_name: String,
}

/// Optional body for [`PullRequestsService::merge`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeRequest {
    /// Commit message for the merge commit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_source_branch: Option<bool>,

    /// `merge_commit`, `squash` or `fast_forward`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_strategy: Option<String>,
}

/// Pull request endpoints under
/// `/repositories/{owner}/{repo_slug}/pullrequests`.
#[derive(Debug, Clone, Copy)]
pub struct PullRequestsService<'a> {
    pub(super) client: &'a BitbucketClient,
}

impl<'a> PullRequestsService<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    pub(super) fn path(owner: &str, repo_slug: &str) -> String {
        format!("/repositories/{}/{}/pullrequests", owner, repo_slug)
    }

    pub(super) fn pr_path(owner: &str, repo_slug: &str, id: i64) -> String {
        format!("{}/{}", Self::path(owner, repo_slug), id)
    }

    /// Lists pull requests. Bitbucket returns only `OPEN` PRs unless a
    /// `state` or `q` filter says otherwise.
    pub async fn list(
        &self,
        owner: &str,
        repo_slug: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<PullRequests>> {
        let url = self
            .client
            .request_url(&Self::path(owner, repo_slug), opts)?;
        self.client.get(&url).await
    }

    /// Gets a pull request.
    pub async fn get(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<PullRequest>> {
        let url = self
            .client
            .request_url(&Self::pr_path(owner, repo_slug, id), opts)?;
        self.client.get(&url).await
    }

    /// Opens a pull request.
    pub async fn create(
        &self,
        owner: &str,
        repo_slug: &str,
        request: &PullRequestRequest,
    ) -> Result<ApiResponse<PullRequest>> {
        let url = self
            .client
            .request_url(&Self::path(owner, repo_slug), &[])?;
        self.client.post(&url, request).await
    }

    /// Updates title, description, reviewers or destination.
    pub async fn update(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
        request: &PullRequestRequest,
    ) -> Result<ApiResponse<PullRequest>> {
        let url = self
            .client
            .request_url(&Self::pr_path(owner, repo_slug, id), &[])?;
        self.client.put(&url, request).await
    }

    /// Declines a pull request.
    pub async fn decline(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
    ) -> Result<ApiResponse<PullRequest>> {
        let path = format!("{}/decline", Self::pr_path(owner, repo_slug, id));
        let url = self.client.request_url(&path, &[])?;
        self.client.post_empty(&url).await
    }

    /// Merges a pull request, optionally choosing strategy and message.
    ///
    /// Large merges may answer `202 Accepted`; that surfaces as
    /// [`ApiError::Accepted`](crate::api::common::ApiError::Accepted).
    pub async fn merge(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
        request: Option<&MergeRequest>,
    ) -> Result<ApiResponse<PullRequest>> {
        let path = format!("{}/merge", Self::pr_path(owner, repo_slug, id));
        let url = self.client.request_url(&path, &[])?;
        match request {
            Some(body) => self.client.post(&url, body).await,
            None => self.client.post_empty(&url).await,
        }
    }

    /// Raw unified diff of a pull request.
    pub async fn get_diff_raw(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
    ) -> Result<ApiResponse<String>> {
        let path = format!("{}/diff", Self::pr_path(owner, repo_slug, id));
        let url = self.client.request_url(&path, &[])?;
        self.client.get_text(&url).await
    }

    /// Per-file change summary of a pull request.
    pub async fn get_diffstat(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<DiffStats>> {
        let path = format!("{}/diffstat", Self::pr_path(owner, repo_slug, id));
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }

    /// Raw patch of a pull request.
    pub async fn get_patch_raw(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
    ) -> Result<ApiResponse<String>> {
        let path = format!("{}/patch", Self::pr_path(owner, repo_slug, id));
        let url = self.client.request_url(&path, &[])?;
        self.client.get_text(&url).await
    }

    /// Lists commits on a pull request.
    pub async fn list_commits(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Commits>> {
        let path = format!("{}/commits", Self::pr_path(owner, repo_slug, id));
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }

    /// Lists build statuses of a pull request's commits.
    pub async fn list_statuses(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<CommitStatuses>> {
        let path = format!("{}/statuses", Self::pr_path(owner, repo_slug, id));
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }
}
