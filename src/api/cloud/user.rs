//
//  bitbucket-cloud
//  api/cloud/user.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The authenticated user (`/user`).

use serde::{Deserialize, Serialize};

use super::teams::{RepositoryPermissions, TeamPermissions};
use crate::api::client::BitbucketClient;
use crate::api::common::{ApiResponse, PaginatedResponse, QueryOpts, Result, SelfLinks, User};

/// An email address on the caller's account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserEmail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_confirmed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<SelfLinks>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub email_type: Option<String>,
}

pub type UserEmails = PaginatedResponse<UserEmail>;

#[derive(Debug, Clone, Copy)]
pub struct UserService<'a> {
    client: &'a BitbucketClient,
}

impl<'a> UserService<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    /// Gets the account the client is authenticated as.
    pub async fn get(&self) -> Result<ApiResponse<User>> {
        let url = self.client.request_url("/user", &[])?;
        self.client.get(&url).await
    }

    pub async fn emails(&self, opts: QueryOpts<'_>) -> Result<ApiResponse<UserEmails>> {
        let url = self.client.request_url("/user/emails", opts)?;
        self.client.get(&url).await
    }

    /// The caller's explicit permission on each repository.
    pub async fn repository_permissions(
        &self,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<RepositoryPermissions>> {
        let url = self
            .client
            .request_url("/user/permissions/repositories", opts)?;
        self.client.get(&url).await
    }

    /// The caller's permission on each team.
    pub async fn team_permissions(&self, opts: QueryOpts<'_>) -> Result<ApiResponse<TeamPermissions>> {
        let url = self.client.request_url("/user/permissions/teams", opts)?;
        self.client.get(&url).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::client::tests::mock_client;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_current_user_sends_credentials() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/user")
            .match_header("authorization", "Basic dXNlcjpwYXNz")
            .with_status(200)
            .with_body(r#"{"display_name": "Jane Doe", "account_id": "557058:1", "type": "user"}"#)
            .create_async()
            .await;

        let client = mock_client(&server);
        let me = client.user().get().await.unwrap();

        mock.assert_async().await;
        assert_eq!(me.name(), "Jane Doe");
        assert_eq!(me.account_id.as_deref(), Some("557058:1"));
    }

    #[tokio::test]
    async fn test_emails_and_permissions() {
        let mut server = mockito::Server::new_async().await;
        let emails = server
            .mock("GET", "/user/emails")
            .with_status(200)
            .with_body(r#"{"values": [{"email": "jane@example.com", "is_primary": true}]}"#)
            .create_async()
            .await;
        let repos = server
            .mock("GET", "/user/permissions/repositories")
            .match_query(Matcher::UrlEncoded("q".into(), r#"permission="admin""#.into()))
            .with_status(200)
            .with_body(r#"{"values": [{"permission": "admin"}]}"#)
            .create_async()
            .await;
        let teams = server
            .mock("GET", "/user/permissions/teams")
            .with_status(200)
            .with_body(r#"{"values": [{"permission": "member", "team": {"username": "acme"}}]}"#)
            .create_async()
            .await;

        let client = mock_client(&server);
        let user = client.user();

        let addresses = user.emails(&[]).await.unwrap();
        assert_eq!(addresses.values[0].is_primary, Some(true));

        let filter = crate::api::common::FilterSortOpts {
            q: Some(r#"permission="admin""#.to_string()),
            sort: None,
        };
        let perms = user.repository_permissions(&[&filter]).await.unwrap();
        assert_eq!(perms.len(), 1);

        let perms = user.team_permissions(&[]).await.unwrap();
        assert_eq!(
            perms.values[0].team.as_ref().and_then(|t| t.username.as_deref()),
            Some("acme")
        );

        emails.assert_async().await;
        repos.assert_async().await;
        teams.assert_async().await;
    }
}
