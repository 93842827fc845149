//
//  bitbucket-cloud
//  api/cloud/teams.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Teams, their members, permissions and projects.
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_cloud::api::cloud::{ProjectRequest, TeamRole};
//! use bitbucket_cloud::BitbucketClient;
//!
//! # async fn example() -> bitbucket_cloud::api::common::Result<()> {
//! let client = BitbucketClient::builder().basic_auth("jdoe", "app-password").build()?;
//! let teams = client.teams();
//!
//! let role = TeamRole { role: Some("admin".to_string()) };
//! for team in &teams.list(&[&role]).await?.values {
//!     println!("{}", team.username.as_deref().unwrap_or_default());
//! }
//!
//! let request = ProjectRequest {
//!     name: Some("Platform".to_string()),
//!     key: Some("PLAT".to_string()),
//!     ..Default::default()
//! };
//! teams.create_project("acme", &request).await?;
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::repositories::{Repositories, Repository};
use super::search::{CodeSearchOpts, SearchCodeResults};
use crate::api::client::BitbucketClient;
use crate::api::common::{
    ApiResponse, Link, PaginatedResponse, QueryOpts, Result, User, UserLinks, Users,
};

/// A team account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_2fa_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<UserLinks>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub team_type: Option<String>,
}

pub type Teams = PaginatedResponse<Team>;

/// Filters teams by the caller's role: `member`, `contributor` or `admin`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamRole {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// A project grouping repositories within a team.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<User>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<ProjectLinks>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLinks {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Link>,
}

pub type Projects = PaginatedResponse<Project>;

/// Body for creating or updating a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
}

/// A user's permission on a team: `admin`, `collaborator` or `member`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamPermission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub permission_type: Option<String>,
}

pub type TeamPermissions = PaginatedResponse<TeamPermission>;

/// A user's permission on a repository: `admin`, `write` or `read`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryPermission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub permission_type: Option<String>,
}

pub type RepositoryPermissions = PaginatedResponse<RepositoryPermission>;

/// Endpoints under `/teams`.
#[derive(Debug, Clone, Copy)]
pub struct TeamsService<'a> {
    client: &'a BitbucketClient,
}

impl<'a> TeamsService<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    async fn get_path<T>(&self, path: &str, opts: QueryOpts<'_>) -> Result<ApiResponse<T>>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        let url = self.client.request_url(path, opts)?;
        self.client.get(&url).await
    }

    /// Lists teams the caller is associated with. Bitbucket requires `role`.
    pub async fn list(&self, opts: QueryOpts<'_>) -> Result<ApiResponse<Teams>> {
        self.get_path("/teams", opts).await
    }

    pub async fn get(&self, team: &str, opts: QueryOpts<'_>) -> Result<ApiResponse<Team>> {
        self.get_path(&format!("/teams/{}", team), opts).await
    }

    /// Accounts following the team.
    pub async fn followers(&self, team: &str, opts: QueryOpts<'_>) -> Result<ApiResponse<Users>> {
        self.get_path(&format!("/teams/{}/followers", team), opts).await
    }

    /// Accounts the team follows.
    pub async fn following(&self, team: &str, opts: QueryOpts<'_>) -> Result<ApiResponse<Users>> {
        self.get_path(&format!("/teams/{}/following", team), opts).await
    }

    pub async fn members(&self, team: &str, opts: QueryOpts<'_>) -> Result<ApiResponse<Users>> {
        self.get_path(&format!("/teams/{}/members", team), opts).await
    }

    /// Team-level permissions of every member.
    pub async fn permissions(
        &self,
        team: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<TeamPermissions>> {
        self.get_path(&format!("/teams/{}/permissions", team), opts)
            .await
    }

    /// Explicit repository permissions across all of the team's repositories.
    pub async fn list_repository_permissions(
        &self,
        team: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<RepositoryPermissions>> {
        self.get_path(&format!("/teams/{}/permissions/repositories", team), opts)
            .await
    }

    /// Explicit permissions on one of the team's repositories.
    pub async fn get_repository_permissions(
        &self,
        team: &str,
        repo_slug: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<RepositoryPermissions>> {
        let path = format!("/teams/{}/permissions/repositories/{}", team, repo_slug);
        self.get_path(&path, opts).await
    }

    // The collection endpoint only answers with the trailing slash.
    pub async fn list_projects(&self, team: &str, opts: QueryOpts<'_>) -> Result<ApiResponse<Projects>> {
        self.get_path(&format!("/teams/{}/projects/", team), opts)
            .await
    }

    pub async fn create_project(
        &self,
        team: &str,
        request: &ProjectRequest,
    ) -> Result<ApiResponse<Project>> {
        let url = self
            .client
            .request_url(&format!("/teams/{}/projects/", team), &[])?;
        self.client.post(&url, request).await
    }

    pub async fn update_project(
        &self,
        team: &str,
        project_key: &str,
        request: &ProjectRequest,
    ) -> Result<ApiResponse<Project>> {
        let path = format!("/teams/{}/projects/{}", team, project_key);
        let url = self.client.request_url(&path, &[])?;
        self.client.put(&url, request).await
    }

    pub async fn delete_project(&self, team: &str, project_key: &str) -> Result<ApiResponse<()>> {
        let path = format!("/teams/{}/projects/{}", team, project_key);
        let url = self.client.request_url(&path, &[])?;
        self.client.delete(&url).await
    }

    /// Repositories owned by the team.
    pub async fn repositories(
        &self,
        team: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Repositories>> {
        self.get_path(&format!("/teams/{}/repositories", team), opts)
            .await
    }

    /// Searches code across the team's repositories.
    pub async fn search_code(
        &self,
        team: &str,
        opts: &CodeSearchOpts,
    ) -> Result<ApiResponse<SearchCodeResults>> {
        self.get_path(&format!("/teams/{}/search/code", team), &[opts])
            .await
    }
}
