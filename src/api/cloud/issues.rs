//
//  bitbucket-cloud
//  api/cloud/issues.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud issue tracker types and the issues service.
//!
//! Bitbucket Cloud includes a built-in issue tracker that can be enabled per
//! repository. This module covers issues themselves plus attachments, votes
//! and watches. Comments and change records live in their own modules.
//!
//! # Issue Properties
//!
//! | Property | Values |
//! |----------|--------|
//! | State | `new`, `open`, `resolved`, `on hold`, `invalid`, `duplicate`, `wontfix`, `closed` |
//! | Kind | `bug`, `enhancement`, `proposal`, `task` |
//! | Priority | `trivial`, `minor`, `major`, `critical`, `blocker` |
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_cloud::api::cloud::IssueRequest;
//! use bitbucket_cloud::BitbucketClient;
//!
//! # async fn example() -> bitbucket_cloud::api::common::Result<()> {
//! let client = BitbucketClient::builder().basic_auth("jdoe", "app-password").build()?;
//!
//! let request = IssueRequest {
//!     title: Some("Login fails on Safari".to_string()),
//!     kind: Some("bug".to_string()),
//!     priority: Some("major".to_string()),
//!     ..Default::default()
//! }
//! .with_content("Steps to reproduce: ...");
//! let issue = client.issues().create("team", "repo", &request).await?;
//!
//! if !client.issues().is_watching("team", "repo", issue.id.unwrap_or_default()).await?.data {
//!     client.issues().watch("team", "repo", issue.id.unwrap_or_default()).await?;
//! }
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::issue_tracker::{Component, Milestone, Version};
use super::repositories::Repository;
use crate::api::client::{escape_segment, BitbucketClient};
use crate::api::common::{
    ApiResponse, Content, Link, PaginatedResponse, QueryOpts, Result, User,
};

/// Represents an issue in a Bitbucket Cloud repository's issue tracker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Issue {
    /// Issue number, unique within the repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter: Option<User>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<Component>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<Milestone>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub watches: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<IssueLinks>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,
}

/// Links attached to an [`Issue`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueLinks {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote: Option<Link>,
}

/// Page of issues.
pub type Issues = PaginatedResponse<Issue>;

/// Body for creating or updating an issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    /// Assignee, identified by `account_id` or `uuid`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,
}

impl IssueRequest {
    /// Sets the description text.
    pub fn with_content(mut self, raw: impl Into<String>) -> Self {
        self.content = Some(Content::raw(raw));
        self
    }
}

/// A file attached to an issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<AttachmentLinks>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub attachment_type: Option<String>,
}

/// Links attached to an [`Attachment`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentLinks {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,
}

/// Page of attachments.
pub type Attachments = PaginatedResponse<Attachment>;

/// Issue endpoints under `/repositories/{owner}/{repo_slug}/issues`.
#[derive(Debug, Clone, Copy)]
pub struct IssuesService<'a> {
    pub(super) client: &'a BitbucketClient,
}

impl<'a> IssuesService<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    pub(super) fn path(owner: &str, repo_slug: &str) -> String {
        format!("/repositories/{}/{}/issues", owner, repo_slug)
    }

    pub(super) fn issue_path(owner: &str, repo_slug: &str, id: i64) -> String {
        format!("{}/{}", Self::path(owner, repo_slug), id)
    }

    /// Lists issues. Combine with `FilterSortOpts` to filter by state.
    pub async fn list(
        &self,
        owner: &str,
        repo_slug: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Issues>> {
        let url = self
            .client
            .request_url(&Self::path(owner, repo_slug), opts)?;
        self.client.get(&url).await
    }

    /// Gets an issue.
    pub async fn get(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Issue>> {
        let url = self
            .client
            .request_url(&Self::issue_path(owner, repo_slug, id), opts)?;
        self.client.get(&url).await
    }

    /// Opens an issue.
    pub async fn create(
        &self,
        owner: &str,
        repo_slug: &str,
        request: &IssueRequest,
    ) -> Result<ApiResponse<Issue>> {
        let url = self
            .client
            .request_url(&Self::path(owner, repo_slug), &[])?;
        self.client.post(&url, request).await
    }

    /// Modifies an issue in place.
    pub async fn update(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
        request: &IssueRequest,
    ) -> Result<ApiResponse<Issue>> {
        let url = self
            .client
            .request_url(&Self::issue_path(owner, repo_slug, id), &[])?;
        self.client.put(&url, request).await
    }

    /// Deletes an issue.
    pub async fn delete(&self, owner: &str, repo_slug: &str, id: i64) -> Result<ApiResponse<()>> {
        let url = self
            .client
            .request_url(&Self::issue_path(owner, repo_slug, id), &[])?;
        self.client.delete(&url).await
    }

    /// Lists files attached to an issue.
    pub async fn list_attachments(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Attachments>> {
        let path = format!("{}/attachments", Self::issue_path(owner, repo_slug, id));
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }

    /// Deletes an attachment. `file_path` is escaped as a single segment.
    pub async fn delete_attachment(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
        file_path: &str,
    ) -> Result<ApiResponse<()>> {
        let path = format!(
            "{}/attachments/{}",
            Self::issue_path(owner, repo_slug, id),
            escape_segment(file_path)
        );
        let url = self.client.request_url(&path, &[])?;
        self.client.delete(&url).await
    }

    /// Whether the authenticated user has voted for an issue.
    pub async fn has_voted(&self, owner: &str, repo_slug: &str, id: i64) -> Result<ApiResponse<bool>> {
        let path = format!("{}/vote", Self::issue_path(owner, repo_slug, id));
        let url = self.client.request_url(&path, &[])?;
        self.client.get_flag(&url).await
    }

    /// Votes for an issue.
    pub async fn vote(&self, owner: &str, repo_slug: &str, id: i64) -> Result<ApiResponse<()>> {
        let path = format!("{}/vote", Self::issue_path(owner, repo_slug, id));
        let url = self.client.request_url(&path, &[])?;
        self.client.put_empty(&url).await
    }

    /// Retracts the authenticated user's vote.
    pub async fn remove_vote(&self, owner: &str, repo_slug: &str, id: i64) -> Result<ApiResponse<()>> {
        let path = format!("{}/vote", Self::issue_path(owner, repo_slug, id));
        let url = self.client.request_url(&path, &[])?;
        self.client.delete(&url).await
    }

    /// Whether the authenticated user is watching an issue.
    pub async fn is_watching(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
    ) -> Result<ApiResponse<bool>> {
        let path = format!("{}/watch", Self::issue_path(owner, repo_slug, id));
        let url = self.client.request_url(&path, &[])?;
        self.client.get_flag(&url).await
    }

    /// Starts watching an issue.
    pub async fn watch(&self, owner: &str, repo_slug: &str, id: i64) -> Result<ApiResponse<()>> {
        let path = format!("{}/watch", Self::issue_path(owner, repo_slug, id));
        let url = self.client.request_url(&path, &[])?;
        self.client.put_empty(&url).await
    }

    /// Stops watching an issue.
    pub async fn stop_watching(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
    ) -> Result<ApiResponse<()>> {
        let path = format!("{}/watch", Self::issue_path(owner, repo_slug, id));
        let url = self.client.request_url(&path, &[])?;
        self.client.delete(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::tests::mock_client;
    use crate::api::common::FilterSortOpts;
    use mockito::Matcher;
    use reqwest::StatusCode;

    const ISSUE_JSON: &str = r#"{
        "id": 1,
        "title": "Login fails",
        "state": "new",
        "kind": "bug",
        "priority": "major",
        "content": {"raw": "Steps...", "markup": "markdown"},
        "reporter": {"display_name": "Jane"},
        "component": {"name": "auth"},
        "votes": 2,
        "created_on": "2023-05-01T12:00:00.000+00:00"
    }"#;

    #[tokio::test]
    async fn test_list_and_get() {
        let mut server = mockito::Server::new_async().await;
        let list = server
            .mock("GET", "/repositories/team/repo/issues")
            .match_query(Matcher::UrlEncoded("q".into(), r#"state="new""#.into()))
            .with_status(200)
            .with_body(format!(r#"{{"values": [{}], "size": 1}}"#, ISSUE_JSON))
            .create_async()
            .await;
        let get = server
            .mock("GET", "/repositories/team/repo/issues/1")
            .with_status(200)
            .with_body(ISSUE_JSON)
            .create_async()
            .await;

        let client = mock_client(&server);
        let filter = FilterSortOpts {
            q: Some(r#"state="new""#.to_string()),
            sort: None,
        };
        let issues = client
            .issues()
            .list("team", "repo", &[&filter])
            .await
            .unwrap();
        assert_eq!(issues.values[0].kind.as_deref(), Some("bug"));

        let issue = client.issues().get("team", "repo", 1, &[]).await.unwrap();
        assert_eq!(issue.votes, Some(2));
        assert_eq!(
            issue.component.as_ref().and_then(|c| c.name.as_deref()),
            Some("auth")
        );

        list.assert_async().await;
        get.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let mut server = mockito::Server::new_async().await;
        let create = server
            .mock("POST", "/repositories/team/repo/issues")
            .match_body(Matcher::Json(serde_json::json!({
                "title": "Login fails",
                "kind": "bug",
                "content": {"raw": "Steps..."}
            })))
            .with_status(201)
            .with_body(ISSUE_JSON)
            .create_async()
            .await;
        let update = server
            .mock("PUT", "/repositories/team/repo/issues/1")
            .match_body(Matcher::Json(serde_json::json!({"state": "resolved"})))
            .with_status(200)
            .with_body(r#"{"id": 1, "state": "resolved"}"#)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/repositories/team/repo/issues/1")
            .with_status(204)
            .create_async()
            .await;

        let client = mock_client(&server);
        let issues = client.issues();

        let request = IssueRequest {
            title: Some("Login fails".to_string()),
            kind: Some("bug".to_string()),
            ..Default::default()
        }
        .with_content("Steps...");
        let issue = issues.create("team", "repo", &request).await.unwrap();
        assert_eq!(issue.id, Some(1));

        let request = IssueRequest {
            state: Some("resolved".to_string()),
            ..Default::default()
        };
        let issue = issues.update("team", "repo", 1, &request).await.unwrap();
        assert_eq!(issue.state.as_deref(), Some("resolved"));

        issues.delete("team", "repo", 1).await.unwrap();

        create.assert_async().await;
        update.assert_async().await;
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_attachments() {
        let mut server = mockito::Server::new_async().await;
        let list = server
            .mock("GET", "/repositories/team/repo/issues/1/attachments")
            .with_status(200)
            .with_body(r#"{"values": [{"name": "screen shot.png"}]}"#)
            .create_async()
            .await;
        let delete = server
            .mock(
                "DELETE",
                "/repositories/team/repo/issues/1/attachments/screen+shot.png",
            )
            .with_status(204)
            .create_async()
            .await;

        let client = mock_client(&server);
        let attachments = client
            .issues()
            .list_attachments("team", "repo", 1, &[])
            .await
            .unwrap();
        assert_eq!(attachments.values[0].name.as_deref(), Some("screen shot.png"));

        client
            .issues()
            .delete_attachment("team", "repo", 1, "screen shot.png")
            .await
            .unwrap();

        list.assert_async().await;
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_vote_flags() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repositories/team/repo/issues/1/vote")
            .with_status(204)
            .create_async()
            .await;
        server
            .mock("GET", "/repositories/team/repo/issues/2/vote")
            .with_status(404)
            .with_body(r#"{"type": "error", "error": {"message": "not voted"}}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/repositories/team/repo/issues/3/vote")
            .with_status(401)
            .create_async()
            .await;
        let vote = server
            .mock("PUT", "/repositories/team/repo/issues/2/vote")
            .with_status(204)
            .create_async()
            .await;
        let unvote = server
            .mock("DELETE", "/repositories/team/repo/issues/1/vote")
            .with_status(204)
            .create_async()
            .await;

        let client = mock_client(&server);
        let issues = client.issues();

        assert!(issues.has_voted("team", "repo", 1).await.unwrap().data);
        assert!(!issues.has_voted("team", "repo", 2).await.unwrap().data);
        let err = issues.has_voted("team", "repo", 3).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));

        issues.vote("team", "repo", 2).await.unwrap();
        issues.remove_vote("team", "repo", 1).await.unwrap();

        vote.assert_async().await;
        unvote.assert_async().await;
    }

    #[tokio::test]
    async fn test_watch_flags() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repositories/team/repo/issues/5/watch")
            .with_status(404)
            .create_async()
            .await;
        let watch = server
            .mock("PUT", "/repositories/team/repo/issues/5/watch")
            .with_status(204)
            .create_async()
            .await;
        let stop = server
            .mock("DELETE", "/repositories/team/repo/issues/5/watch")
            .with_status(204)
            .create_async()
            .await;

        let client = mock_client(&server);
        let issues = client.issues();

        assert!(!issues.is_watching("team", "repo", 5).await.unwrap().data);
        issues.watch("team", "repo", 5).await.unwrap();
        issues.stop_watching("team", "repo", 5).await.unwrap();

        watch.assert_async().await;
        stop.assert_async().await;
    }
}
