//
//  bitbucket-cloud
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for Bitbucket Cloud
//!
//! This module provides the types shared by every resource service: the error
//! type, the response wrapper, the pagination envelope, query options, and the
//! small DTOs (links, rendered content, users) embedded in most payloads.
//!
//! # Overview
//!
//! - [`ApiError`] - Error type for all API operations
//! - [`ApiResponse`] - Decoded data plus HTTP status and headers
//! - [`PaginatedResponse`] - List envelope (re-exported from [`pagination`])
//! - [`QueryOptions`] / [`add_query_params`] - Options struct merging
//! - [`parse_resource_id`] - Numeric ID recovery from `self` links
//! - [`Link`], [`Content`], [`User`], [`Participant`] - Shared DTOs
//!
//! # Example
//!
//! ```rust
//! use bitbucket_cloud::api::common::ApiError;
//!
//! fn describe(result: Result<(), ApiError>) -> String {
//!     match result {
//!         Ok(()) => "ok".to_string(),
//!         Err(ApiError::Accepted { .. }) => "not ready yet, retry later".to_string(),
//!         Err(e) if e.is_not_found() => "missing".to_string(),
//!         Err(e) => e.to_string(),
//!     }
//! }
//! ```
//!
//! # Notes
//!
//! - Errors are classified by HTTP status only
//! - Every DTO field is optional; Bitbucket omits fields freely

use std::ops::Deref;

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

mod pagination;
mod query;
mod resource_id;

pub use pagination::*;
pub use query::*;
pub use resource_id::*;

/// Result alias used by every library operation.
pub type Result<T, E = ApiError> = std::result::Result<T, E>;

/// Unified error type for all Bitbucket API operations.
///
/// # Variants
///
/// | Variant | Cause |
/// |---------|-------|
/// | `Accepted` | 202 with an empty body; Bitbucket scheduled a background job |
/// | `Response` | Any status other than 200, 201, 202, 204 and 304 |
/// | `Network` | Transport failure from `reqwest` |
/// | `Url` | A URL could not be parsed |
/// | `Json` | A body could not be encoded or decoded |
/// | `Query` | An options value is not map-shaped |
/// | `Config` | Invalid client configuration |
/// | `AuthFailed` | OAuth token exchange failed |
///
/// # Example
///
/// ```rust
/// use bitbucket_cloud::api::common::ApiError;
///
/// let err = ApiError::Accepted { raw: Vec::new() };
/// assert_eq!(err.to_string(), "job scheduled on Bitbucket side; try again later");
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bitbucket accepted the request but the result is not ready yet.
    ///
    /// Returned for `202 Accepted` with an empty body. Repeating the same
    /// request later is expected to succeed.
    #[error("job scheduled on Bitbucket side; try again later")]
    Accepted {
        /// The response body as received.
        raw: Vec<u8>,
    },

    /// The API answered with a non-success status.
    ///
    /// `message` is the error body flattened into one line by
    /// [`parse_error_message`]; `body` keeps the raw bytes.
    #[error("{method} {url}: {} {message}", .status.as_u16())]
    Response {
        /// Request method.
        method: Method,
        /// Request URL without its query string.
        url: String,
        /// Response status.
        status: StatusCode,
        /// Flattened error message.
        message: String,
        /// Raw response body.
        body: Vec<u8>,
    },

    /// A network-level error occurred during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A request or response body could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An options value could not be turned into query parameters.
    #[error("Invalid query options: {0}")]
    Query(String),

    /// The client was configured with invalid values.
    #[error("{0}")]
    Config(String),

    /// An OAuth token request was rejected.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),
}

impl ApiError {
    /// HTTP status for [`ApiError::Response`] and [`ApiError::Accepted`].
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Response { status, .. } => Some(*status),
            Self::Accepted { .. } => Some(StatusCode::ACCEPTED),
            Self::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Returns `true` for a 404 response.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Returns `true` for the 202 "try again later" condition.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Raw response body, when the error came from a response.
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            Self::Response { body, .. } => Some(body),
            Self::Accepted { raw } => Some(raw),
            _ => None,
        }
    }
}

/// Flattens a Bitbucket error body into one display string.
///
/// - JSON string: returned as is
/// - JSON array: `[a, b]`
/// - JSON object: `{key: value}` entries, sorted, joined by `, `
/// - other JSON values: `failed to parse unexpected error type: <type>`
/// - non-JSON bodies: the body text
///
/// # Example
///
/// ```rust
/// use bitbucket_cloud::api::common::parse_error_message;
///
/// let body = br#"{"type": "error", "error": {"message": "Repository not found"}}"#;
/// assert_eq!(
///     parse_error_message(body),
///     "{error: {message: Repository not found}}, {type: error}"
/// );
/// ```
pub fn parse_error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => flatten_error(&value),
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}

fn flatten_error(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(flatten_error).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Object(map) => {
            let mut parts: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{{{}: {}}}", k, flatten_error(v)))
                .collect();
            parts.sort();
            parts.join(", ")
        }
        other => format!(
            "failed to parse unexpected error type: {}",
            query::json_type_name(other)
        ),
    }
}

/// A decoded API response together with its HTTP metadata.
///
/// Every service method returns one of these. It dereferences to the decoded
/// data, so fields can be read directly.
///
/// # Type Parameters
///
/// * `T` - The type of data contained in the response
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_cloud::BitbucketClient;
///
/// # async fn example() -> bitbucket_cloud::api::common::Result<()> {
/// let client = BitbucketClient::new()?;
/// let repo = client.repositories().get("atlassian", "python-bitbucket").await?;
/// println!("{} ({})", repo.full_name.as_deref().unwrap_or("?"), repo.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// The decoded payload.
    pub data: T,

    /// Response status.
    pub status: StatusCode,

    /// Response headers.
    pub headers: HeaderMap,
}

impl<T> ApiResponse<T> {
    /// Consumes the response and returns the payload.
    pub fn into_data(self) -> T {
        self.data
    }

    /// Maps the payload while keeping status and headers.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            data: f(self.data),
            status: self.status,
            headers: self.headers,
        }
    }
}

impl<T> Deref for ApiResponse<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

/// HATEOAS-style link.
///
/// # Notes
///
/// - Common link names include: `self`, `html`, `avatar`, `clone`
/// - `name` is set on clone links (`https`, `ssh`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Link {
    /// The URL of the linked resource.
    #[serde(default)]
    pub href: String,

    /// Optional descriptive name for the link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The `self` / `html` link pair found on most small resources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfLinks {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<Link>,
}

/// Rendered text as Bitbucket returns it: raw markup plus rendered HTML.
///
/// Also used as the request body for pull request comments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Content {
    /// Text as entered by the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,

    /// Markup language of `raw`, usually `markdown`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,

    /// Rendered HTML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl Content {
    /// Content holding only raw text.
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            raw: Some(text.into()),
            ..Default::default()
        }
    }
}

/// A Bitbucket account: a user or a team.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

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
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_staff: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<UserLinks>,
}

/// Links attached to a [`User`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserLinks {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hooks: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repositories: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub following: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippets: Option<Link>,
}

impl User {
    /// Best available human-readable name.
    pub fn name(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.nickname.as_deref())
            .or(self.username.as_deref())
            .unwrap_or("unknown")
    }
}

/// Page of users, as returned by watchers, followers and default reviewers.
pub type Users = PaginatedResponse<User>;

/// A participant in a pull request or commit review, returned by approvals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Participant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    /// `PARTICIPANT` or `REVIEWER`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,

    /// `approved`, `changes_requested` or unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub participated_on: Option<DateTime<Utc>>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub participant_type: Option<String>,
}
