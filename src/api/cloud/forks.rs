//
//  bitbucket-cloud
//  api/cloud/forks.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository forks.

use serde::{Deserialize, Serialize};

use super::repositories::{MainBranch, Repositories, Repository};
use crate::api::client::BitbucketClient;
use crate::api::common::{ApiResponse, QueryOpts, Result, User};

/// Body for forking a repository. Every field defaults to the parent's.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForkRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Workspace receiving the fork; defaults to the caller's.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<User>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fork_policy: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_wiki: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_issues: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mainbranch: Option<MainBranch>,
}

#[derive(Debug, Clone, Copy)]
pub struct ForksService<'a> {
    client: &'a BitbucketClient,
}

impl<'a> ForksService<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    /// Lists forks of a repository.
    pub async fn list(
        &self,
        owner: &str,
        repo_slug: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Repositories>> {
        let path = format!("/repositories/{}/{}/forks", owner, repo_slug);
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }

    /// Forks a repository.
    pub async fn create(
        &self,
        owner: &str,
        repo_slug: &str,
        request: &ForkRequest,
    ) -> Result<ApiResponse<Repository>> {
        let path = format!("/repositories/{}/{}/forks", owner, repo_slug);
        let url = self.client.request_url(&path, &[])?;
        self.client.post(&url, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::tests::mock_client;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_list_and_create() {
        let mut server = mockito::Server::new_async().await;
        let list = server
            .mock("GET", "/repositories/team/repo/forks")
            .with_status(200)
            .with_body(r#"{"values": [{"full_name": "alice/repo"}]}"#)
            .create_async()
            .await;
        let create = server
            .mock("POST", "/repositories/team/repo/forks")
            .match_body(Matcher::Json(serde_json::json!({
                "name": "repo-fork",
                "owner": {"username": "alice"}
            })))
            .with_status(201)
            .with_body(r#"{"full_name": "alice/repo-fork", "parent": {"full_name": "team/repo"}}"#)
            .create_async()
            .await;

        let client = mock_client(&server);
        let forks = client.forks().list("team", "repo", &[]).await.unwrap();
        assert_eq!(forks.values[0].full_name.as_deref(), Some("alice/repo"));

        let request = ForkRequest {
            name: Some("repo-fork".to_string()),
            owner: Some(User {
                username: Some("alice".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let fork = client.forks().create("team", "repo", &request).await.unwrap();
        assert_eq!(
            fork.parent.as_ref().and_then(|p| p.full_name.as_deref()),
            Some("team/repo")
        );

        list.assert_async().await;
        create.assert_async().await;
    }
}
