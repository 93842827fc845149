//
//  bitbucket-cloud
//  api/cloud/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Other user accounts (`/users/{user}`): profile, webhooks, repositories,
//! code search and SSH keys.
//!
//! `user` may be a username, a UUID in braces or an account ID.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::repositories::Repositories;
use super::repository_hooks::{Webhook, Webhooks};
use super::search::{CodeSearchOpts, SearchCodeResults};
use crate::api::client::BitbucketClient;
use crate::api::common::{ApiResponse, PaginatedResponse, QueryOpts, Result, SelfLinks, User};

/// An SSH key on a user account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SshKey {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<User>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<SelfLinks>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub key_type: Option<String>,
}

pub type SshKeys = PaginatedResponse<SshKey>;

/// Body for adding an SSH key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SshKeyRequest {
    pub key: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct UsersService<'a> {
    client: &'a BitbucketClient,
}

impl<'a> UsersService<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, user: &str) -> Result<ApiResponse<User>> {
        let url = self.client.request_url(&format!("/users/{}", user), &[])?;
        self.client.get(&url).await
    }

    pub async fn list_hooks(&self, user: &str, opts: QueryOpts<'_>) -> Result<ApiResponse<Webhooks>> {
        let url = self
            .client
            .request_url(&format!("/users/{}/hooks", user), opts)?;
        self.client.get(&url).await
    }

    pub async fn get_hook(
        &self,
        user: &str,
        uid: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Webhook>> {
        let url = self
            .client
            .request_url(&format!("/users/{}/hooks/{}", user, uid), opts)?;
        self.client.get(&url).await
    }

    pub async fn delete_hook(&self, user: &str, uid: &str) -> Result<ApiResponse<()>> {
        let url = self
            .client
            .request_url(&format!("/users/{}/hooks/{}", user, uid), &[])?;
        self.client.delete(&url).await
    }

    /// Repositories owned by the user.
    pub async fn repositories(
        &self,
        user: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Repositories>> {
        let url = self
            .client
            .request_url(&format!("/users/{}/repositories", user), opts)?;
        self.client.get(&url).await
    }

    /// Searches code across the user's repositories.
    pub async fn search_code(
        &self,
        user: &str,
        opts: &CodeSearchOpts,
    ) -> Result<ApiResponse<SearchCodeResults>> {
        let url = self
            .client
            .request_url(&format!("/users/{}/search/code", user), &[opts])?;
        self.client.get(&url).await
    }

    pub async fn list_ssh_keys(&self, user: &str, opts: QueryOpts<'_>) -> Result<ApiResponse<SshKeys>> {
        let url = self
            .client
            .request_url(&format!("/users/{}/ssh-keys", user), opts)?;
        self.client.get(&url).await
    }

    pub async fn add_ssh_key(&self, user: &str, request: &SshKeyRequest) -> Result<ApiResponse<SshKey>> {
        let url = self
            .client
            .request_url(&format!("/users/{}/ssh-keys", user), &[])?;
        self.client.post(&url, request).await
    }
}
