//
//  bitbucket-cloud
//  api/cloud/pullrequest_comments.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pull request comments.

use super::comment::{Comment, CommentRequest, Comments};
use super::pullrequests::PullRequestsService;
use crate::api::common::{ApiResponse, QueryOpts, Result};

impl PullRequestsService<'_> {
    fn comments_path(owner: &str, repo_slug: &str, id: i64) -> String {
        format!("{}/comments", Self::pr_path(owner, repo_slug, id))
    }

    /// Lists comments on a pull request, including inline ones.
    pub async fn list_comments(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Comments>> {
        let url = self
            .client
            .request_url(&Self::comments_path(owner, repo_slug, id), opts)?;
        self.client.get(&url).await
    }

    /// Comments on a pull request.
    pub async fn create_comment(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
        request: &CommentRequest,
    ) -> Result<ApiResponse<Comment>> {
        let url = self
            .client
            .request_url(&Self::comments_path(owner, repo_slug, id), &[])?;
        self.client.post(&url, request).await
    }

    /// Gets a single pull request comment.
    pub async fn get_comment(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
        comment_id: i64,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Comment>> {
        let path = format!("{}/{}", Self::comments_path(owner, repo_slug, id), comment_id);
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }

    /// Edits a pull request comment.
    pub async fn update_comment(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
        comment_id: i64,
        request: &CommentRequest,
    ) -> Result<ApiResponse<Comment>> {
        let path = format!("{}/{}", Self::comments_path(owner, repo_slug, id), comment_id);
        let url = self.client.request_url(&path, &[])?;
        self.client.put(&url, request).await
    }

    /// Deletes a pull request comment.
    pub async fn delete_comment(
        &self,
        owner: &str,
        repo_slug: &str,
        id: i64,
        comment_id: i64,
    ) -> Result<ApiResponse<()>> {
        let path = format!("{}/{}", Self::comments_path(owner, repo_slug, id), comment_id);
        let url = self.client.request_url(&path, &[])?;
        self.client.delete(&url).await
    }
}
