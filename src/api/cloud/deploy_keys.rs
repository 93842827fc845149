//
//  bitbucket-cloud
//  api/cloud/deploy_keys.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository deploy keys (read-only SSH access).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::repositories::Repository;
use crate::api::client::BitbucketClient;
use crate::api::common::{ApiResponse, PaginatedResponse, QueryOpts, Result, SelfLinks};

/// An SSH key granted read access to one repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployKey {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Public key in OpenSSH format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Trailing comment parsed from the key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<SelfLinks>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub key_type: Option<String>,
}

pub type DeployKeys = PaginatedResponse<DeployKey>;

/// Body for adding or relabelling a deploy key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeployKeyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct DeployKeysService<'a> {
    client: &'a BitbucketClient,
}

impl<'a> DeployKeysService<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    fn path(owner: &str, repo_slug: &str) -> String {
        format!("/repositories/{}/{}/deploy-keys", owner, repo_slug)
    }

    pub async fn list(
        &self,
        owner: &str,
        repo_slug: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<DeployKeys>> {
        let url = self
            .client
            .request_url(&Self::path(owner, repo_slug), opts)?;
        self.client.get(&url).await
    }

    pub async fn add(
        &self,
        owner: &str,
        repo_slug: &str,
        request: &DeployKeyRequest,
    ) -> Result<ApiResponse<DeployKey>> {
        let url = self
            .client
            .request_url(&Self::path(owner, repo_slug), &[])?;
        self.client.post(&url, request).await
    }

    pub async fn get(
        &self,
        owner: &str,
        repo_slug: &str,
        key_id: i64,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<DeployKey>> {
        let path = format!("{}/{}", Self::path(owner, repo_slug), key_id);
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }

    /// Updates a deploy key's label or key material.
    pub async fn update(
        &self,
        owner: &str,
        repo_slug: &str,
        key_id: i64,
        request: &DeployKeyRequest,
    ) -> Result<ApiResponse<DeployKey>> {
        let path = format!("{}/{}", Self::path(owner, repo_slug), key_id);
        let url = self.client.request_url(&path, &[])?;
        self.client.put(&url, request).await
    }

    pub async fn remove(&self, owner: &str, repo_slug: &str, key_id: i64) -> Result<ApiResponse<()>> {
        let path = format!("{}/{}", Self::path(owner, repo_slug), key_id);
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
    async fn test_deploy_key_lifecycle() {
        let mut server = mockito::Server::new_async().await;
        let add = server
            .mock("POST", "/repositories/team/repo/deploy-keys")
            .match_body(Matcher::Json(serde_json::json!({
                "key": "ssh-rsa AAAAB3Nza ci@example",
                "label": "ci"
            })))
            .with_status(200)
            .with_body(
                r#"{"id": 123, "label": "ci", "comment": "ci@example", "type": "deploy_key"}"#,
            )
            .create_async()
            .await;
        let list = server
            .mock("GET", "/repositories/team/repo/deploy-keys")
            .with_status(200)
            .with_body(r#"{"values": [{"id": 123}], "pagelen": 10}"#)
            .create_async()
            .await;
        let get = server
            .mock("GET", "/repositories/team/repo/deploy-keys/123")
            .with_status(200)
            .with_body(r#"{"id": 123, "last_used": "2024-03-01T10:00:00Z"}"#)
            .create_async()
            .await;
        let update = server
            .mock("PUT", "/repositories/team/repo/deploy-keys/123")
            .match_body(Matcher::Json(serde_json::json!({"label": "deploy"})))
            .with_status(200)
            .with_body(r#"{"id": 123, "label": "deploy"}"#)
            .create_async()
            .await;
        let remove = server
            .mock("DELETE", "/repositories/team/repo/deploy-keys/123")
            .with_status(204)
            .create_async()
            .await;

        let client = mock_client(&server);
        let keys = client.deploy_keys();

        let request = DeployKeyRequest {
            key: Some("ssh-rsa AAAAB3Nza ci@example".to_string()),
            label: Some("ci".to_string()),
        };
        let key = keys.add("team", "repo", &request).await.unwrap();
        assert_eq!(key.comment.as_deref(), Some("ci@example"));

        assert_eq!(keys.list("team", "repo", &[]).await.unwrap().len(), 1);
        assert!(keys.get("team", "repo", 123, &[]).await.unwrap().last_used.is_some());

        let request = DeployKeyRequest {
            label: Some("deploy".to_string()),
            ..Default::default()
        };
        let key = keys.update("team", "repo", 123, &request).await.unwrap();
        assert_eq!(key.label.as_deref(), Some("deploy"));

        keys.remove("team", "repo", 123).await.unwrap();

        add.assert_async().await;
        list.assert_async().await;
        get.assert_async().await;
        update.assert_async().await;
        remove.assert_async().await;
    }
}
