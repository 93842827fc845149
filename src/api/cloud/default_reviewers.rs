//
//  bitbucket-cloud
//  api/cloud/default_reviewers.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Default reviewers added to every new pull request.
//!
//! Users are addressed by username, UUID (braces included) or account ID.

use crate::api::client::{escape_segment, BitbucketClient};
use crate::api::common::{ApiResponse, QueryOpts, Result, User, Users};

#[derive(Debug, Clone, Copy)]
pub struct DefaultReviewersService<'a> {
    client: &'a BitbucketClient,
}

impl<'a> DefaultReviewersService<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    fn path(owner: &str, repo_slug: &str) -> String {
        format!("/repositories/{}/{}/default-reviewers", owner, repo_slug)
    }

    fn user_path(owner: &str, repo_slug: &str, user: &str) -> String {
        format!("{}/{}", Self::path(owner, repo_slug), escape_segment(user))
    }

    pub async fn list(
        &self,
        owner: &str,
        repo_slug: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Users>> {
        let url = self
            .client
            .request_url(&Self::path(owner, repo_slug), opts)?;
        self.client.get(&url).await
    }

    /// Gets a default reviewer. Fails with 404 when `user` is not one.
    pub async fn get(
        &self,
        owner: &str,
        repo_slug: &str,
        user: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<User>> {
        let url = self
            .client
            .request_url(&Self::user_path(owner, repo_slug, user), opts)?;
        self.client.get(&url).await
    }

    pub async fn add(&self, owner: &str, repo_slug: &str, user: &str) -> Result<ApiResponse<User>> {
        let url = self
            .client
            .request_url(&Self::user_path(owner, repo_slug, user), &[])?;
        self.client.put_empty(&url).await
    }

    pub async fn remove(&self, owner: &str, repo_slug: &str, user: &str) -> Result<ApiResponse<()>> {
        let url = self
            .client
            .request_url(&Self::user_path(owner, repo_slug, user), &[])?;
        self.client.delete(&url).await
    }
}
