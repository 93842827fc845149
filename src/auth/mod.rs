//
//  bitbucket-cloud
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Credentials understood by Bitbucket Cloud and the helpers that obtain
//! OAuth tokens.
//!
//! ## Supported Authentication Methods
//!
//! - **Basic**: username plus app password (or account password)
//! - **Bearer**: repository, project or workspace access tokens
//! - **OAuth 2.0**: access tokens obtained through [`OAuthClient`]
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_cloud::auth::AuthCredential;
//!
//! let credential = AuthCredential::basic("jdoe", "app-password");
//! assert_eq!(
//!     credential.authorization_header(),
//!     "Basic amRvZTphcHAtcGFzc3dvcmQ="
//! );
//! ```

mod oauth;

pub use oauth::*;

use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;

/// Credentials attached to every request made by a client.
///
/// # Variants
///
/// - `Basic`: HTTP Basic authentication, typically with an app password.
/// - `Bearer`: A static bearer token such as a repository access token.
/// - `OAuth`: An OAuth 2.0 access token with optional refresh data.
///
/// # Example
///
/// ```rust
/// use bitbucket_cloud::auth::AuthCredential;
/// use chrono::{Duration, Utc};
///
/// let oauth = AuthCredential::OAuth {
///     access_token: "token".to_string(),
///     refresh_token: Some("refresh".to_string()),
///     expires_at: Some(Utc::now() + Duration::hours(2)),
/// };
///
/// assert!(!oauth.is_expired());
/// assert!(oauth.can_refresh());
/// ```
#[derive(Clone)]
pub enum AuthCredential {
    /// HTTP Basic credentials.
    Basic {
        /// Bitbucket username.
        username: String,
        /// App password or account password.
        password: String,
    },

    /// Static bearer token.
    Bearer {
        /// The token value.
        token: String,
    },

    /// OAuth 2.0 access token.
    OAuth {
        /// Token sent as `Authorization: Bearer ...`.
        access_token: String,
        /// Token used to obtain a new access token.
        refresh_token: Option<String>,
        /// When the access token stops being valid.
        expires_at: Option<chrono::DateTime<chrono::Utc>>,
    },
}

impl std::fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"***").finish(),
            Self::OAuth { expires_at, .. } => f
                .debug_struct("OAuth")
                .field("access_token", &"***")
                .field("expires_at", expires_at)
                .finish(),
        }
    }
}

impl AuthCredential {
    /// Basic credentials from a username and password.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Bearer credentials from a token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Value of the `Authorization` header for these credentials.
    pub fn authorization_header(&self) -> String {
        match self {
            Self::Basic { username, password } => {
                let encoded = STANDARD.encode(format!("{}:{}", username, password));
                format!("Basic {}", encoded)
            }
            Self::Bearer { token } => format!("Bearer {}", token),
            Self::OAuth { access_token, .. } => format!("Bearer {}", access_token),
        }
    }

    /// Adds the `Authorization` header to `request`.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, self.authorization_header())
    }

    /// Returns `true` for an OAuth token whose expiry has passed.
    pub fn is_expired(&self) -> bool {
        match self {
            Self::OAuth {
                expires_at: Some(exp),
                ..
            } => *exp < chrono::Utc::now(),
            _ => false,
        }
    }

    /// Returns `true` for an OAuth token that carries a refresh token.
    pub fn can_refresh(&self) -> bool {
        matches!(
            self,
            Self::OAuth {
                refresh_token: Some(_),
                ..
            }
        )
    }
}
