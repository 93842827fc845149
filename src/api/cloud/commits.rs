//
//  bitbucket-cloud
//  api/cloud/commits.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Commit listings under `/repositories/{owner}/{repo_slug}/commits`.
//!
//! Bitbucket returns commits newest first. `include` and `exclude` query
//! parameters select ranges, for example every commit on `feature` that is
//! not on `main`:
//!
//! ```rust,no_run
//! use bitbucket_cloud::api::cloud::CommitsRangeOpts;
//! use bitbucket_cloud::BitbucketClient;
//!
//! # async fn example() -> bitbucket_cloud::api::common::Result<()> {
//! let client = BitbucketClient::new()?;
//! let range = CommitsRangeOpts {
//!     include: vec!["feature".to_string()],
//!     exclude: vec!["main".to_string()],
//! };
//! let commits = client.commits().list("team", "repo", &[&range]).await?;
//! for commit in &commits.values {
//!     println!("{}", commit.hash.as_deref().unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::repositories::Repository;
use crate::api::client::BitbucketClient;
use crate::api::common::{
    ApiResponse, Content, Link, PaginatedResponse, Participant, QueryOpts, Result, User,
};

/// A single commit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Commit {
    /// Full 40-character SHA-1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendered: Option<CommitRendered>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<CommitAuthor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Box<Repository>>,

    /// Parent commits; usually only `hash` and `links` are populated.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<Commit>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<Participant>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<CommitLinks>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub commit_type: Option<String>,
}

impl Commit {
    /// First seven characters of the hash.
    pub fn short_hash(&self) -> &str {
        let hash = self.hash.as_deref().unwrap_or_default();
        hash.get(..7).unwrap_or(hash)
    }
}

/// Commit author: the raw git identity plus the linked account, if any.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitAuthor {
    /// `Name <email>` as recorded in git.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Rendered commit message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitRendered {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Content>,
}

/// Links attached to a [`Commit`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitLinks {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub approve: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses: Option<Link>,
}

/// Page of commits.
pub type Commits = PaginatedResponse<Commit>;

/// Revision range selection. Both fields repeat in the query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitsRangeOpts {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

/// Commit listings.
#[derive(Debug, Clone, Copy)]
pub struct CommitsService<'a> {
    client: &'a BitbucketClient,
}

impl<'a> CommitsService<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    /// Lists commits. Accepts [`CommitsRangeOpts`].
    pub async fn list(
        &self,
        owner: &str,
        repo_slug: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Commits>> {
        let path = format!("/repositories/{}/{}/commits", owner, repo_slug);
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }

    /// Same as [`list`](Self::list) but issued as a POST, for include or
    /// exclude lists too long for a GET query string.
    pub async fn list_safe(
        &self,
        owner: &str,
        repo_slug: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Commits>> {
        let path = format!("/repositories/{}/{}/commits", owner, repo_slug);
        let url = self.client.request_url(&path, opts)?;
        self.client.post_empty(&url).await
    }

    /// Lists the commits reachable from `revision` (a branch, tag or hash).
    pub async fn get_revision(
        &self,
        owner: &str,
        repo_slug: &str,
        revision: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Commits>> {
        let path = format!("/repositories/{}/{}/commits/{}", owner, repo_slug, revision);
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::tests::mock_client;
    use mockito::Matcher;

    const COMMITS_JSON: &str = r#"{
        "pagelen": 30,
        "values": [{
            "hash": "1d3c8a5e0e3c4b7f8f2a0d6c2b1a9e8d7c6b5a4f",
            "message": "Fix the build\n",
            "date": "2021-03-04T10:00:00+00:00",
            "author": {"raw": "Jane Doe <jane@example.com>", "user": {"nickname": "jane"}},
            "parents": [{"hash": "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"}]
        }],
        "next": "https://api.bitbucket.org/2.0/repositories/team/repo/commits?page=2"
    }"#;

    #[test]
    fn test_short_hash() {
        let commit = Commit {
            hash: Some("1d3c8a5e0e3c".to_string()),
            ..Default::default()
        };
        assert_eq!(commit.short_hash(), "1d3c8a5");
        assert_eq!(Commit::default().short_hash(), "");
    }

    #[tokio::test]
    async fn test_list_with_range() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repositories/team/repo/commits")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("include".into(), "feature".into()),
                Matcher::UrlEncoded("exclude".into(), "main".into()),
            ]))
            .with_status(200)
            .with_body(COMMITS_JSON)
            .create_async()
            .await;

        let client = mock_client(&server);
        let range = CommitsRangeOpts {
            include: vec!["feature".to_string()],
            exclude: vec!["main".to_string()],
        };
        let commits = client
            .commits()
            .list("team", "repo", &[&range])
            .await
            .unwrap();

        mock.assert_async().await;
        let commit = &commits.values[0];
        assert_eq!(commit.short_hash(), "1d3c8a5");
        assert_eq!(commit.parents.len(), 1);
        assert_eq!(
            commit.author.as_ref().and_then(|a| a.raw.as_deref()),
            Some("Jane Doe <jane@example.com>")
        );
        assert!(commits.has_next());
    }

    #[tokio::test]
    async fn test_list_safe_posts() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/repositories/team/repo/commits")
            .with_status(200)
            .with_body(COMMITS_JSON)
            .create_async()
            .await;

        let client = mock_client(&server);
        let commits = client
            .commits()
            .list_safe("team", "repo", &[])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(commits.len(), 1);
    }

    #[tokio::test]
    async fn test_get_revision() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repositories/team/repo/commits/develop")
            .with_status(200)
            .with_body(COMMITS_JSON)
            .create_async()
            .await;

        let client = mock_client(&server);
        client
            .commits()
            .get_revision("team", "repo", "develop", &[])
            .await
            .unwrap();

        mock.assert_async().await;
    }
}
