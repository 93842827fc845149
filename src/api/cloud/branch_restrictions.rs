//
//  bitbucket-cloud
//  api/cloud/branch_restrictions.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Branch permissions and merge checks.

use serde::{Deserialize, Serialize};

use crate::api::client::BitbucketClient;
use crate::api::common::{ApiResponse, PaginatedResponse, QueryOpts, Result, SelfLinks, User};

/// A rule restricting pushes, merges or deletion on matching branches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchRestriction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// e.g. `push`, `force`, `delete`, `require_approvals_to_merge`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// `glob` or `branching_model`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_match_kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Threshold for numeric kinds such as required approvals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<User>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<SelfLinks>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub restriction_type: Option<String>,
}

/// Page of branch restrictions.
pub type BranchRestrictions = PaginatedResponse<BranchRestriction>;

/// Body for creating or updating a branch restriction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchRestrictionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_match_kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<User>,
}

/// Filters for [`BranchRestrictionsService::list`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchRestrictionListOpts {
    /// Only restrictions of this kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Only restrictions applied to this branch pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Endpoints under `/repositories/{owner}/{repo_slug}/branch-restrictions`.
#[derive(Debug, Clone, Copy)]
pub struct BranchRestrictionsService<'a> {
    client: &'a BitbucketClient,
}

impl<'a> BranchRestrictionsService<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    fn path(owner: &str, repo_slug: &str) -> String {
        format!("/repositories/{}/{}/branch-restrictions", owner, repo_slug)
    }

    pub async fn list(
        &self,
        owner: &str,
        repo_slug: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<BranchRestrictions>> {
        let url = self
            .client
            .request_url(&Self::path(owner, repo_slug), opts)?;
        self.client.get(&url).await
    }

    pub async fn get(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<BranchRestriction>> {
        let path = format!("{}/{}", Self::path(owner, repo_slug), id);
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }

    pub async fn create(
        &self,
        owner: &str,
        repo_slug: &str,
        request: &BranchRestrictionRequest,
    ) -> Result<ApiResponse<BranchRestriction>> {
        let url = self
            .client
            .request_url(&Self::path(owner, repo_slug), &[])?;
        self.client.post(&url, request).await
    }

    pub async fn update(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
        request: &BranchRestrictionRequest,
    ) -> Result<ApiResponse<BranchRestriction>> {
        let path = format!("{}/{}", Self::path(owner, repo_slug), id);
        let url = self.client.request_url(&path, &[])?;
        self.client.put(&url, request).await
    }

    pub async fn delete(&self, owner: &str, repo_slug: &str, id: i64) -> Result<ApiResponse<()>> {
        let path = format!("{}/{}", Self::path(owner, repo_slug), id);
        let url = self.client.request_url(&path, &[])?;
        self.client.delete(&url).await
    }
}
