//
//  bitbucket-cloud
//  api/cloud/comment.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Comment types shared by pull requests, issues and commits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::common::{Content, PaginatedResponse, SelfLinks, User};

/// A comment on a pull request, issue or commit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,

    /// Set on pull request comments that were removed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,

    /// File and line for inline review comments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline: Option<CommentInline>,

    /// Comment this one replies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<CommentParent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<SelfLinks>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub comment_type: Option<String>,
}

/// Anchor of an inline comment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentInline {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Line in the old version of the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<i64>,

    /// Line in the new version of the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<i64>,
}

/// Reference to a parent comment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentParent {
    pub id: i64,
}

/// Page of comments.
pub type Comments = PaginatedResponse<Comment>;

/// Body for creating or updating a comment.
///
/// # Example
///
/// ```rust
/// use bitbucket_cloud::api::cloud::CommentRequest;
///
/// let reply = CommentRequest::new("Looks good").reply_to(42);
/// let json = serde_json::to_value(&reply).unwrap();
/// assert_eq!(json["content"]["raw"], "Looks good");
/// assert_eq!(json["parent"]["id"], 42);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentRequest {
    pub content: Content,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline: Option<CommentInline>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<CommentParent>,
}

impl CommentRequest {
    /// A top-level comment with raw markdown text.
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            content: Content::raw(raw),
            inline: None,
            parent: None,
        }
    }

    /// Makes this comment a reply to comment `id`.
    pub fn reply_to(mut self, id: i64) -> Self {
        self.parent = Some(CommentParent { id });
        self
    }

    /// Anchors this comment to a line of `path` in the new version.
    pub fn inline(mut self, path: impl Into<String>, line: i64) -> Self {
        self.inline = Some(CommentInline {
            path: Some(path.into()),
            from: None,
            to: Some(line),
        });
        self
    }
}
