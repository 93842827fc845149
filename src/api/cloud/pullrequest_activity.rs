//
//  bitbucket-cloud
//  api/cloud/pullrequest_activity.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pull request activity log and approvals.
//!
//! Each activity entry carries exactly one of `update`, `approval` or
//! `comment`; [`PullRequestActivity::kind`] reports which.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::comment::Comment;
use super::pullrequests::{PullRequest, PullRequestEndpoint, PullRequestsService};
use crate::api::common::{ApiResponse, PaginatedResponse, Participant, QueryOpts, Result, User};

/// One entry of a pull request's activity log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestActivity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<UpdateActivity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval: Option<ApprovalActivity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<PullRequest>,
}

/// Which kind of event an activity entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Update,
    Approval,
    Comment,
    Unknown,
}

impl PullRequestActivity {
    /// The kind of event this entry records.
    pub fn kind(&self) -> ActivityKind {
        if self.update.is_some() {
            ActivityKind::Update
        } else if self.approval.is_some() {
            ActivityKind::Approval
        } else if self.comment.is_some() {
            ActivityKind::Comment
        } else {
            ActivityKind::Unknown
        }
    }
}

/// A change to a pull request's title, description, state or branches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateActivity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PullRequestEndpoint>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<PullRequestEndpoint>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

/// An approval given on a pull request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApprovalActivity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

/// Page of activity entries.
pub type PullRequestActivities = PaginatedResponse<PullRequestActivity>;

impl PullRequestsService<'_> {
    /// Activity across every pull request of a repository.
    pub async fn list_activity(
        &self,
        owner: &str,
        repo_slug: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<PullRequestActivities>> {
        let path = format!("{}/activity", Self::path(owner, repo_slug));
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }

    /// Activity of a single pull request.
    pub async fn get_activity(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<PullRequestActivities>> {
        let path = format!("{}/activity", Self::pr_path(owner, repo_slug, id));
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }

    /// Approves a pull request as the authenticated user.
    pub async fn approve(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
    ) -> Result<ApiResponse<Participant>> {
        let path = format!("{}/approve", Self::pr_path(owner, repo_slug, id));
        let url = self.client.request_url(&path, &[])?;
        self.client.post_empty(&url).await
    }

    /// Withdraws the authenticated user's approval.
    pub async fn remove_approval(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
    ) -> Result<ApiResponse<()>> {
        let path = format!("{}/approve", Self::pr_path(owner, repo_slug, id));
        let url = self.client.request_url(&path, &[])?;
        self.client.delete(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::tests::mock_client;
    use reqwest::StatusCode;

    #[tokio::test]
    async fn test_get_activity_kinds() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repositories/team/repo/pullrequests/3/activity")
            .with_status(200)
            .with_body(
                r#"{"values": [
                    {"update": {"state": "OPEN", "title": "WIP", "date": "2024-02-01T09:00:00+00:00"}},
                    {"approval": {"user": {"nickname": "rev"}, "date": "2024-02-02T09:00:00+00:00"}},
                    {"comment": {"id": 9, "content": {"raw": "ok"}}},
                    {}
                ]}"#,
            )
            .create_async()
            .await;

        let client = mock_client(&server);
        let activity = client
            .pull_requests()
            .get_activity("team", "repo", 3, &[])
            .await
            .unwrap();

        mock.assert_async().await;
        let kinds: Vec<ActivityKind> = activity.values.iter().map(|a| a.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ActivityKind::Update,
                ActivityKind::Approval,
                ActivityKind::Comment,
                ActivityKind::Unknown
            ]
        );
    }

    #[tokio::test]
    async fn test_list_activity() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repositories/team/repo/pullrequests/activity")
            .with_status(200)
            .with_body(r#"{"values": []}"#)
            .create_async()
            .await;

        let client = mock_client(&server);
        let activity = client
            .pull_requests()
            .list_activity("team", "repo", &[])
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(activity.is_empty());
    }

    #[tokio::test]
    async fn test_approve_and_remove_approval() {
        let mut server = mockito::Server::new_async().await;
        let approve = server
            .mock("POST", "/repositories/team/repo/pullrequests/3/approve")
            .with_status(200)
            .with_body(r#"{"approved": true, "role": "REVIEWER", "state": "approved"}"#)
            .create_async()
            .await;
        let remove = server
            .mock("DELETE", "/repositories/team/repo/pullrequests/3/approve")
            .with_status(204)
            .create_async()
            .await;

        let client = mock_client(&server);
        let prs = client.pull_requests();

        let participant = prs.approve("team", "repo", 3).await.unwrap();
        assert_eq!(participant.role.as_deref(), Some("REVIEWER"));

        let removed = prs.remove_approval("team", "repo", 3).await.unwrap();
        assert_eq!(removed.status, StatusCode::NO_CONTENT);

        approve.assert_async().await;
        remove.assert_async().await;
    }
}
