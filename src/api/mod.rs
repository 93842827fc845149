//
//  bitbucket-cloud
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! HTTP client and resource bindings for the Bitbucket Cloud REST API v2.0.
//!
//! ## Architecture
//!
//! - [`client`]: [`BitbucketClient`], its builder and the request plumbing
//! - [`cloud`]: One module per resource family, each with a service struct
//! - [`common`]: Errors, response wrapper, pagination, query options
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bitbucket_cloud::api::BitbucketClient;
//! use bitbucket_cloud::auth::AuthCredential;
//!
//! # async fn example() -> bitbucket_cloud::api::common::Result<()> {
//! let client = BitbucketClient::new()?.with_auth(AuthCredential::bearer("your-token"));
//! let repo = client.repositories().get("atlassian", "python-bitbucket").await?;
//! println!("{}", repo.full_name.as_deref().unwrap_or_default());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every call returns [`ApiError`] on failure. Only the HTTP status is
//! interpreted: 200, 201, 202, 204 and 304 succeed, an empty 202 becomes
//! [`ApiError::Accepted`], and anything else becomes [`ApiError::Response`]
//! carrying the raw body and a flattened message.

/// Core HTTP client.
///
/// Provides the [`BitbucketClient`] struct which handles:
/// - Base URL and default page length
/// - Authentication header injection
/// - Request/response serialization
/// - Status classification
pub mod client;

/// Bitbucket Cloud resources.
pub mod cloud;

/// Types shared by every resource module.
///
/// Includes:
/// - [`ApiError`]: Error type
/// - [`ApiResponse`]: Data plus status and headers
/// - [`PaginatedResponse`](common::PaginatedResponse): List envelope
/// - [`Link`](common::Link): HATEOAS link type
pub mod common;

pub use client::BitbucketClient;

pub use common::{ApiError, ApiResponse};
