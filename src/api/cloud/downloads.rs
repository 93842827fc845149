//
//  bitbucket-cloud
//  api/cloud/downloads.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Files uploaded to a repository's Downloads section.

use serde::{Deserialize, Serialize};

use crate::api::client::{escape_segment, BitbucketClient};
use crate::api::common::{ApiResponse, PaginatedResponse, QueryOpts, Result, SelfLinks, User};

/// A downloadable artifact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Artifact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Size in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,

    /// Number of times the file was downloaded.
    #[serde(rename = "downloads", skip_serializing_if = "Option::is_none")]
    pub download_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<SelfLinks>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub artifact_type: Option<String>,
}

pub type Artifacts = PaginatedResponse<Artifact>;

#[derive(Debug, Clone, Copy)]
pub struct DownloadsService<'a> {
    client: &'a BitbucketClient,
}

impl<'a> DownloadsService<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        owner: &str,
        repo_slug: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Artifacts>> {
        let path = format!("/repositories/{}/{}/downloads", owner, repo_slug);
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }

    /// Deletes an artifact. The file name is escaped as one segment.
    pub async fn delete(&self, owner: &str, repo_slug: &str, file_name: &str) -> Result<ApiResponse<()>> {
        let path = format!(
            "/repositories/{}/{}/downloads/{}",
            owner,
            repo_slug,
            escape_segment(file_name)
        );
        let url = self.client.request_url(&path, &[])?;
        self.client.delete(&url).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::client::tests::mock_client;

    #[tokio::test]
    async fn test_list_and_delete() {
        let mut server = mockito::Server::new_async().await;
        let list = server
            .mock("GET", "/repositories/team/repo/downloads")
            .with_status(200)
            .with_body(r#"{"values": [{"name": "app v1.zip", "size": 2048, "downloads": 17}]}"#)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/repositories/team/repo/downloads/app%20v1.zip")
            .with_status(204)
            .create_async()
            .await;

        let client = mock_client(&server);
        let artifacts = client.downloads().list("team", "repo", &[]).await.unwrap();
        assert_eq!(artifacts.values[0].download_count, Some(17));

        client
            .downloads()
            .delete("team", "repo", "app v1.zip")
            .await
            .unwrap();

        list.assert_async().await;
        delete.assert_async().await;
    }
}
