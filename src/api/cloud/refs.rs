//
//  bitbucket-cloud
//  api/cloud/refs.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Branches and tags.
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_cloud::api::cloud::RefRequest;
//! use bitbucket_cloud::BitbucketClient;
//!
//! # async fn example() -> bitbucket_cloud::api::common::Result<()> {
//! let client = BitbucketClient::builder().bearer_token("token").build()?;
//!
//! let branch = client
//!     .refs()
//!     .create_branch("team", "repo", &RefRequest::new("feature/login", "a1b2c3d"))
//!     .await?;
//! println!("created {}", branch.name.as_deref().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::commits::Commit;
use crate::api::client::{escape_segment, BitbucketClient};
use crate::api::common::{ApiResponse, Link, PaginatedResponse, QueryOpts, Result};

/// A branch or a tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Ref {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Commit the ref points at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Commit>,

    /// Tag message, for annotated tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub heads: Vec<Commit>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_merge_strategy: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub merge_strategies: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<RefLinks>,

    /// `branch` or `tag`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ref_type: Option<String>,
}

/// Links attached to a [`Ref`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RefLinks {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub commits: Option<Link>,
}

/// Page of refs.
pub type Refs = PaginatedResponse<Ref>;

/// Body for creating a branch or tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefRequest {
    pub name: String,
    pub target: RefTarget,
}

/// Commit a new ref points at.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefTarget {
    pub hash: String,
}

impl RefRequest {
    pub fn new(name: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: RefTarget { hash: hash.into() },
        }
    }
}

/// Ref endpoints under `/repositories/{owner}/{repo_slug}/refs`.
#[derive(Debug, Clone, Copy)]
pub struct RefsService<'a> {
    client: &'a BitbucketClient,
}

impl<'a> RefsService<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    fn path(owner: &str, repo_slug: &str, kind: &str) -> String {
        format!("/repositories/{}/{}/refs/{}", owner, repo_slug, kind)
    }

    async fn list_kind(
        &self,
        owner: &str,
        repo_slug: &str,
        kind: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Refs>> {
        let url = self
            .client
            .request_url(&Self::path(owner, repo_slug, kind), opts)?;
        self.client.get(&url).await
    }

    async fn create_kind(
        &self,
        owner: &str,
        repo_slug: &str,
        kind: &str,
        request: &RefRequest,
    ) -> Result<ApiResponse<Ref>> {
        let url = self
            .client
            .request_url(&Self::path(owner, repo_slug, kind), &[])?;
        self.client.post(&url, request).await
    }

    // Ref names may contain `/`, so the name is escaped as one segment.
    fn named_path(owner: &str, repo_slug: &str, kind: &str, name: &str) -> String {
        format!("{}/{}", Self::path(owner, repo_slug, kind), escape_segment(name))
    }

    /// Lists branches and tags together.
    pub async fn list_all(
        &self,
        owner: &str,
        repo_slug: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Refs>> {
        let path = format!("/repositories/{}/{}/refs", owner, repo_slug);
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }

    pub async fn list_branches(
        &self,
        owner: &str,
        repo_slug: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Refs>> {
        self.list_kind(owner, repo_slug, "branches", opts).await
    }

    /// Creates a branch at `request.target.hash`.
    pub async fn create_branch(
        &self,
        owner: &str,
        repo_slug: &str,
        request: &RefRequest,
    ) -> Result<ApiResponse<Ref>> {
        self.create_kind(owner, repo_slug, "branches", request).await
    }

    pub async fn get_branch(
        &self,
        owner: &str,
        repo_slug: &str,
        name: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Ref>> {
        let path = Self::named_path(owner, repo_slug, "branches", name);
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }

    pub async fn delete_branch(
        &self,
        owner: &str,
        repo_slug: &str,
        name: &str,
    ) -> Result<ApiResponse<()>> {
        let path = Self::named_path(owner, repo_slug, "branches", name);
        let url = self.client.request_url(&path, &[])?;
        self.client.delete(&url).await
    }

    pub async fn list_tags(
        &self,
        owner: &str,
        repo_slug: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Refs>> {
        self.list_kind(owner, repo_slug, "tags", opts).await
    }

    /// Creates a lightweight tag at `request.target.hash`.
    pub async fn create_tag(
        &self,
        owner: &str,
        repo_slug: &str,
        request: &RefRequest,
    ) -> Result<ApiResponse<Ref>> {
        self.create_kind(owner, repo_slug, "tags", request).await
    }

    pub async fn get_tag(
        &self,
        owner: &str,
        repo_slug: &str,
        name: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Ref>> {
        let path = Self::named_path(owner, repo_slug, "tags", name);
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }

    pub async fn delete_tag(&self, owner: &str, repo_slug: &str, name: &str) -> Result<ApiResponse<()>> {
        let path = Self::named_path(owner, repo_slug, "tags", name);
        let url = self.client.request_url(&path, &[])?;
        self.client.delete(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::tests::mock_client;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_list_all_refs() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repositories/team/repo/refs")
            .with_status(200)
            .with_body(
                r#"{"values": [
                    {"type": "branch", "name": "main", "target": {"hash": "abc123"}},
                    {"type": "tag", "name": "v1.0", "message": "release"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = mock_client(&server);
        let refs = client.refs().list_all("team", "repo", &[]).await.unwrap();

        mock.assert_async().await;
        assert_eq!(refs.values[0].ref_type.as_deref(), Some("branch"));
        assert_eq!(
            refs.values[0].target.as_ref().and_then(|c| c.hash.as_deref()),
            Some("abc123")
        );
        assert_eq!(refs.values[1].message.as_deref(), Some("release"));
    }

    #[tokio::test]
    async fn test_branch_lifecycle() {
        let mut server = mockito::Server::new_async().await;
        let create = server
            .mock("POST", "/repositories/team/repo/refs/branches")
            .match_body(Matcher::Json(serde_json::json!({
                "name": "feature/login",
                "target": {"hash": "abc123"}
            })))
            .with_status(201)
            .with_body(r#"{"name": "feature/login", "type": "branch"}"#)
            .create_async()
            .await;
        let get = server
            .mock("GET", "/repositories/team/repo/refs/branches/feature%2Flogin")
            .with_status(200)
            .with_body(r#"{"name": "feature/login"}"#)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/repositories/team/repo/refs/branches/feature%2Flogin")
            .with_status(204)
            .create_async()
            .await;

        let client = mock_client(&server);
        let refs = client.refs();

        let branch = refs
            .create_branch("team", "repo", &RefRequest::new("feature/login", "abc123"))
            .await
            .unwrap();
        assert_eq!(branch.name.as_deref(), Some("feature/login"));

        refs.get_branch("team", "repo", "feature/login", &[])
            .await
            .unwrap();
        refs.delete_branch("team", "repo", "feature/login")
            .await
            .unwrap();

        create.assert_async().await;
        get.assert_async().await;
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_tags() {
        let mut server = mockito::Server::new_async().await;
        let list = server
            .mock("GET", "/repositories/team/repo/refs/tags")
            .match_query(Matcher::UrlEncoded("sort".into(), "-name".into()))
            .with_status(200)
            .with_body(r#"{"values": [{"name": "v2.0"}], "size": 1}"#)
            .create_async()
            .await;
        let create = server
            .mock("POST", "/repositories/team/repo/refs/tags")
            .with_status(201)
            .with_body(r#"{"name": "v2.1"}"#)
            .create_async()
            .await;
        let get = server
            .mock("GET", "/repositories/team/repo/refs/tags/v2.1")
            .with_status(200)
            .with_body(r#"{"name": "v2.1"}"#)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/repositories/team/repo/refs/tags/v2.1")
            .with_status(204)
            .create_async()
            .await;

        let client = mock_client(&server);
        let refs = client.refs();
        let sort = crate::api::common::FilterSortOpts {
            q: None,
            sort: Some("-name".to_string()),
        };

        let tags = refs.list_tags("team", "repo", &[&sort]).await.unwrap();
        assert_eq!(tags.len(), 1);
        refs.create_tag("team", "repo", &RefRequest::new("v2.1", "def456"))
            .await
            .unwrap();
        let tag = refs.get_tag("team", "repo", "v2.1", &[]).await.unwrap();
        assert_eq!(tag.name.as_deref(), Some("v2.1"));
        refs.delete_tag("team", "repo", "v2.1").await.unwrap();

        list.assert_async().await;
        create.assert_async().await;
        get.assert_async().await;
        delete.assert_async().await;
    }
}
