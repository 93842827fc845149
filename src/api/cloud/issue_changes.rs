//
//  bitbucket-cloud
//  api/cloud/issue_changes.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Issue change records.
//!
//! A change moves one or more issue fields to new values and may carry a
//! comment. Bitbucket expects the body nested as
//! `{"changes": {"<field>": {"new": "<value>"}}, "message": {"raw": "..."}}`;
//! [`IssueChangeRequest`] serializes to that shape from flat fields.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use super::issues::{Issue, IssuesService};
use crate::api::common::{
    ApiResponse, Content, PaginatedResponse, QueryOpts, Result, SelfLinks, User,
};

/// One change applied to an issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueChange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Field name to old/new value.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub changes: BTreeMap<String, ChangeValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<Box<Issue>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<SelfLinks>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub change_type: Option<String>,
}

/// Before and after values of a changed field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub new: Option<String>,
}

/// Page of issue changes.
pub type IssueChanges = PaginatedResponse<IssueChange>;

/// Fields to change on an issue. Unset fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct IssueChangeRequest {
    pub assignee_account_id: Option<String>,
    pub kind: Option<String>,
    pub priority: Option<String>,
    pub state: Option<String>,
    pub component: Option<String>,
    pub milestone: Option<String>,
    pub version: Option<String>,
    /// New issue description.
    pub content: Option<String>,
    /// Comment attached to the change; sent outside `changes`.
    pub message: Option<String>,
}

#[derive(Serialize)]
struct NewValue<'a> {
    new: &'a str,
}

#[derive(Serialize)]
struct ChangeBody<'a> {
    changes: BTreeMap<&'static str, NewValue<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<Content>,
}

impl Serialize for IssueChangeRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let fields = [
            ("assignee_account_id", &self.assignee_account_id),
            ("kind", &self.kind),
            ("priority", &self.priority),
            ("state", &self.state),
            ("component", &self.component),
            ("milestone", &self.milestone),
            ("version", &self.version),
            ("content", &self.content),
        ];

        let changes = fields
            .into_iter()
            .filter_map(|(name, value)| value.as_deref().map(|new| (name, NewValue { new })))
            .collect();

        let message = self
            .message
            .as_deref()
            .filter(|m| !m.is_empty())
            .map(Content::raw);

        ChangeBody { changes, message }.serialize(serializer)
    }
}

impl IssuesService<'_> {
    fn changes_path(owner: &str, repo_slug: &str, id: i64) -> String {
        format!("{}/changes", Self::issue_path(owner, repo_slug, id))
    }

    /// Lists changes made to an issue, oldest first.
    pub async fn list_changes(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<IssueChanges>> {
        let url = self
            .client
            .request_url(&Self::changes_path(owner, repo_slug, id), opts)?;
        self.client.get(&url).await
    }

    pub async fn get_change(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
        change_id: i64,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<IssueChange>> {
        let path = format!("{}/{}", Self::changes_path(owner, repo_slug, id), change_id);
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }

    /// Applies a change to an issue.
    pub async fn create_change(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
        request: &IssueChangeRequest,
    ) -> Result<ApiResponse<IssueChange>> {
        let url = self
            .client
            .request_url(&Self::changes_path(owner, repo_slug, id), &[])?;
        self.client.post(&url, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::tests::mock_client;
    use mockito::Matcher;
    use serde_json::json;

    #[test]
    fn test_change_request_body_shape() {
        let request = IssueChangeRequest {
            state: Some("resolved".to_string()),
            assignee_account_id: Some("557058:abc".to_string()),
            message: Some("Fixed in 1.4".to_string()),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "changes": {
                    "assignee_account_id": {"new": "557058:abc"},
                    "state": {"new": "resolved"}
                },
                "message": {"raw": "Fixed in 1.4"}
            })
        );
    }

    #[test]
    fn test_empty_message_is_omitted() {
        let request = IssueChangeRequest {
            kind: Some("task".to_string()),
            message: Some(String::new()),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"changes": {"kind": {"new": "task"}}})
        );
    }

    #[tokio::test]
    async fn test_list_get_create_changes() {
        let mut server = mockito::Server::new_async().await;
        let list = server
            .mock("GET", "/repositories/team/repo/issues/2/changes")
            .with_status(200)
            .with_body(
                r#"{"values": [{"id": 1, "changes": {"state": {"old": "new", "new": "open"}}}]}"#,
            )
            .create_async()
            .await;
        let get = server
            .mock("GET", "/repositories/team/repo/issues/2/changes/1")
            .with_status(200)
            .with_body(r#"{"id": 1, "changes": {"priority": {"old": null, "new": "major"}}}"#)
            .create_async()
            .await;
        let create = server
            .mock("POST", "/repositories/team/repo/issues/2/changes")
            .match_body(Matcher::Json(json!({
                "changes": {"priority": {"new": "blocker"}}
            })))
            .with_status(201)
            .with_body(r#"{"id": 2, "changes": {"priority": {"old": "major", "new": "blocker"}}}"#)
            .create_async()
            .await;

        let client = mock_client(&server);
        let issues = client.issues();

        let changes = issues.list_changes("team", "repo", 2, &[]).await.unwrap();
        assert_eq!(
            changes.values[0].changes["state"],
            ChangeValue {
                old: Some("new".to_string()),
                new: Some("open".to_string()),
            }
        );

        let change = issues.get_change("team", "repo", 2, 1, &[]).await.unwrap();
        assert_eq!(change.changes["priority"].old, None);

        let request = IssueChangeRequest {
            priority: Some("blocker".to_string()),
            ..Default::default()
        };
        let created = issues.create_change("team", "repo", 2, &request).await.unwrap();
        assert_eq!(created.id, Some(2));

        list.assert_async().await;
        get.assert_async().await;
        create.assert_async().await;
    }
}
