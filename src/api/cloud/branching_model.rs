//
//  bitbucket-cloud
//  api/cloud/branching_model.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Branching model (development/production branches and branch prefixes).
//!
//! [`BranchingModelService::get`] shows the model resolved against the
//! repository's actual branches. The settings endpoints read and write the
//! raw configuration.

use serde::{Deserialize, Serialize};

use crate::api::client::BitbucketClient;
use crate::api::common::{ApiResponse, QueryOpts, Result, SelfLinks};

/// A repository's branching model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchingModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub development: Option<ModelBranch>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub production: Option<ModelBranch>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub branch_types: Vec<BranchType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<SelfLinks>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
}

/// The development or production branch of a model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelBranch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_mainbranch: Option<bool>,

    /// Settings only: whether this branch is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Settings only: whether the configured branch exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_valid: Option<bool>,

    /// Resolved branch, on the read-only view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<super::refs::Ref>,
}

/// A branch category and its name prefix, e.g. `feature` / `feature/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Body for [`BranchingModelService::update_settings`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchingModelRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub development: Option<ModelBranchSettings>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub production: Option<ModelBranchSettings>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub branch_types: Vec<BranchType>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelBranchSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_mainbranch: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Endpoints under `/repositories/{owner}/{repo_slug}/branching-model`.
#[derive(Debug, Clone, Copy)]
pub struct BranchingModelService<'a> {
    client: &'a BitbucketClient,
}

impl<'a> BranchingModelService<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    fn path(owner: &str, repo_slug: &str) -> String {
        format!("/repositories/{}/{}/branching-model", owner, repo_slug)
    }

    /// Gets the effective branching model. Read-only.
    pub async fn get(
        &self,
        owner: &str,
        repo_slug: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<BranchingModel>> {
        let url = self
            .client
            .request_url(&Self::path(owner, repo_slug), opts)?;
        self.client.get(&url).await
    }

    /// Gets the raw branching model configuration.
    pub async fn get_settings(
        &self,
        owner: &str,
        repo_slug: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<BranchingModel>> {
        let path = format!("{}/settings", Self::path(owner, repo_slug));
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }

    /// Updates the branching model configuration.
    pub async fn update_settings(
        &self,
        owner: &str,
        repo_slug: &str,
        request: &BranchingModelRequest,
    ) -> Result<ApiResponse<BranchingModel>> {
        let path = format!("{}/settings", Self::path(owner, repo_slug));
        let url = self.client.request_url(&path, &[])?;
        self.client.put(&url, request).await
    }
}
