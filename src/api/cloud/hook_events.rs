//
//  bitbucket-cloud
//  api/cloud/hook_events.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Webhook event catalogue.

use serde::{Deserialize, Serialize};

use crate::api::client::BitbucketClient;
use crate::api::common::{ApiResponse, Link, PaginatedResponse, QueryOpts, Result};

/// Subject types webhooks can be registered on, each linking to its events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HookEventTypes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<HookEventTypeLinks>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<HookEventTypeLinks>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<HookEventTypeLinks>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<HookEventTypeLinks>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HookEventTypeLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Link>,
}

/// An event a webhook can subscribe to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HookEvent {
    /// Event key, e.g. `repo:push`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

pub type HookEvents = PaginatedResponse<HookEvent>;

#[derive(Debug, Clone, Copy)]
pub struct HookEventsService<'a> {
    client: &'a BitbucketClient,
}

impl<'a> HookEventsService<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    /// Lists the subject types webhooks can be registered on.
    pub async fn list(&self, opts: QueryOpts<'_>) -> Result<ApiResponse<HookEventTypes>> {
        let url = self.client.request_url("/hook_events", opts)?;
        self.client.get(&url).await
    }

    /// Lists the events available for `subject_type` (`repository`, `team`, ...).
    pub async fn get(&self, subject_type: &str, opts: QueryOpts<'_>) -> Result<ApiResponse<HookEvents>> {
        let url = self
            .client
            .request_url(&format!("/hook_events/{}", subject_type), opts)?;
        self.client.get(&url).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::client::tests::mock_client;

    #[tokio::test]
    async fn test_list_subject_types() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/hook_events")
            .with_status(200)
            .with_body(
                r#"{
                    "repository": {"links": {}, "events": {"href": "https://api.bitbucket.org/2.0/hook_events/repository"}},
                    "team": {"events": {"href": "https://api.bitbucket.org/2.0/hook_events/team"}}
                }"#,
            )
            .create_async()
            .await;

        let client = mock_client(&server);
        let types = client.hook_events().list(&[]).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            types.repository.as_ref().and_then(|r| r.events.as_ref()).map(|l| l.href.as_str()),
            Some("https://api.bitbucket.org/2.0/hook_events/repository")
        );
        assert!(types.user.is_none());
    }

    #[tokio::test]
    async fn test_get_events_for_subject() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/hook_events/repository")
            .with_status(200)
            .with_body(
                r#"{"values": [{"event": "repo:push", "category": "Repository", "label": "Push"}], "size": 1}"#,
            )
            .create_async()
            .await;

        let client = mock_client(&server);
        let events = client
            .hook_events()
            .get("repository", &[])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(events.values[0].event.as_deref(), Some("repo:push"));
    }
}
