//
//  bitbucket-cloud
//  api/cloud/repository_hooks.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository webhooks under `/repositories/{owner}/{repo_slug}/hooks`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::repositories::RepositoriesService;
use crate::api::common::{ApiResponse, PaginatedResponse, QueryOpts, Result};

/// A webhook subscription on a repository or user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Webhook {
    /// Identifier used in hook URLs, including curly braces.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    /// Endpoint Bitbucket posts events to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// `repository`, `workspace` or `user`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Subscribed event keys such as `repo:push`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<String>,
}

/// Page of webhooks.
pub type Webhooks = PaginatedResponse<Webhook>;

/// Body for creating or updating a webhook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<String>,
}

impl RepositoriesService<'_> {
    fn hooks_path(owner: &str, repo_slug: &str) -> String {
        format!("/repositories/{}/{}/hooks", owner, repo_slug)
    }

    /// Lists the webhooks installed on a repository.
    pub async fn list_hooks(
        &self,
        owner: &str,
        repo_slug: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Webhooks>> {
        let url = self
            .client
            .request_url(&Self::hooks_path(owner, repo_slug), opts)?;
        self.client.get(&url).await
    }

    /// Installs a webhook.
    pub async fn create_hook(
        &self,
        owner: &str,
        repo_slug: &str,
        request: &WebhookRequest,
    ) -> Result<ApiResponse<Webhook>> {
        let url = self
            .client
            .request_url(&Self::hooks_path(owner, repo_slug), &[])?;
        self.client.post(&url, request).await
    }

    /// Gets a webhook by its UUID.
    pub async fn get_hook(
        &self,
        owner: &str,
        repo_slug: &str,
        uid: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Webhook>> {
        let path = format!("{}/{}", Self::hooks_path(owner, repo_slug), uid);
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }

    /// Replaces a webhook's description, URL, events or active flag.
    pub async fn update_hook(
        &self,
        owner: &str,
        repo_slug: &str,
        uid: &str,
        request: &WebhookRequest,
    ) -> Result<ApiResponse<Webhook>> {
        let path = format!("{}/{}", Self::hooks_path(owner, repo_slug), uid);
        let url = self.client.request_url(&path, &[])?;
        self.client.put(&url, request).await
    }

    /// Removes a webhook.
    pub async fn delete_hook(
        &self,
        owner: &str,
        repo_slug: &str,
        uid: &str,
    ) -> Result<ApiResponse<()>> {
        let path = format!("{}/{}", Self::hooks_path(owner, repo_slug), uid);
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
    async fn test_create_hook() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/repositories/team/repo/hooks")
            .match_body(Matcher::Json(serde_json::json!({
                "url": "https://ci.example.com/hook",
                "active": true,
                "events": ["repo:push", "pullrequest:created"]
            })))
            .with_status(201)
            .with_body(
                r#"{"uuid": "{abc}", "url": "https://ci.example.com/hook",
                    "subject_type": "repository", "active": true,
                    "events": ["repo:push", "pullrequest:created"]}"#,
            )
            .create_async()
            .await;

        let client = mock_client(&server);
        let request = WebhookRequest {
            url: Some("https://ci.example.com/hook".to_string()),
            active: Some(true),
            events: vec!["repo:push".to_string(), "pullrequest:created".to_string()],
            ..Default::default()
        };
        let hook = client
            .repositories()
            .create_hook("team", "repo", &request)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(hook.uuid.as_deref(), Some("{abc}"));
        assert_eq!(hook.events.len(), 2);
    }

    #[tokio::test]
    async fn test_get_update_delete_hook() {
        let mut server = mockito::Server::new_async().await;
        let get = server
            .mock("GET", "/repositories/team/repo/hooks/%7Babc%7D")
            .with_status(200)
            .with_body(r#"{"uuid": "{abc}", "active": false}"#)
            .create_async()
            .await;
        let put = server
            .mock("PUT", "/repositories/team/repo/hooks/%7Babc%7D")
            .match_body(Matcher::Json(serde_json::json!({"active": true})))
            .with_status(200)
            .with_body(r#"{"uuid": "{abc}", "active": true}"#)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/repositories/team/repo/hooks/%7Babc%7D")
            .with_status(204)
            .create_async()
            .await;

        let client = mock_client(&server);
        let repos = client.repositories();

        let hook = repos.get_hook("team", "repo", "{abc}", &[]).await.unwrap();
        assert_eq!(hook.active, Some(false));

        let request = WebhookRequest {
            active: Some(true),
            ..Default::default()
        };
        let hook = repos
            .update_hook("team", "repo", "{abc}", &request)
            .await
            .unwrap();
        assert_eq!(hook.active, Some(true));

        repos.delete_hook("team", "repo", "{abc}").await.unwrap();

        get.assert_async().await;
        put.assert_async().await;
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_hooks() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repositories/team/repo/hooks")
            .with_status(200)
            .with_body(r#"{"values": [{"uuid": "{a}"}, {"uuid": "{b}"}], "pagelen": 10}"#)
            .create_async()
            .await;

        let client = mock_client(&server);
        let hooks = client
            .repositories()
            .list_hooks("team", "repo", &[])
            .await
            .unwrap();
        assert_eq!(hooks.len(), 2);
    }
}
