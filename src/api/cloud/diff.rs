//
//  bitbucket-cloud
//  api/cloud/diff.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Raw diffs, patches and diffstats between two revisions.
//!
//! A revision spec is either a single commit (compared with its first
//! parent) or `A..B`. Raw diffs and patches are returned as text, not JSON.

use serde::{Deserialize, Serialize};

use crate::api::client::BitbucketClient;
use crate::api::common::{ApiResponse, PaginatedResponse, QueryOpts, Result, SelfLinks};

/// Per-file change summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffStat {
    /// `added`, `removed`, `modified` or `renamed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_added: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_removed: Option<i64>,

    /// File before the change; absent for added files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old: Option<CommitFile>,

    /// File after the change; absent for removed files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new: Option<CommitFile>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub diffstat_type: Option<String>,
}

/// A file at a given commit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub escaped_path: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<SelfLinks>,
}

/// Page of diffstat entries.
pub type DiffStats = PaginatedResponse<DiffStat>;

/// Options for [`DiffService::get_raw`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiffOpts {
    /// Lines of context around each change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<u32>,

    /// Limit the diff to this path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_whitespace: Option<bool>,

    /// Include binary files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary: Option<bool>,
}

/// Diff endpoints.
#[derive(Debug, Clone, Copy)]
pub struct DiffService<'a> {
    client: &'a BitbucketClient,
}

impl<'a> DiffService<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    /// Raw unified diff for `spec`. Accepts [`DiffOpts`].
    pub async fn get_raw(
        &self,
        owner: &str,
        repo_slug: &str,
        spec: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<String>> {
        let path = format!("/repositories/{}/{}/diff/{}", owner, repo_slug, spec);
        let url = self.client.request_url(&path, opts)?;
        self.client.get_text(&url).await
    }

    /// Per-file summary of the changes in `spec`.
    pub async fn get_diffstat(
        &self,
        owner: &str,
        repo_slug: &str,
        spec: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<DiffStats>> {
        let path = format!("/repositories/{}/{}/diffstat/{}", owner, repo_slug, spec);
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }
}

/// Patch endpoints.
#[derive(Debug, Clone, Copy)]
pub struct PatchService<'a> {
    client: &'a BitbucketClient,
}

impl<'a> PatchService<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    /// Raw `git format-patch` output for `spec`.
    pub async fn get_raw(
        &self,
        owner: &str,
        repo_slug: &str,
        spec: &str,
    ) -> Result<ApiResponse<String>> {
        let path = format!("/repositories/{}/{}/patch/{}", owner, repo_slug, spec);
        let url = self.client.request_url(&path, &[])?;
        self.client.get_text(&url).await
    }
}
