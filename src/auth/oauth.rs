//
//  bitbucket-cloud
//  auth/oauth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # OAuth 2.0 Token Helpers
//!
//! Bitbucket Cloud issues OAuth access tokens to *consumers* (a key and a
//! secret created in workspace settings). This module talks to the token
//! endpoint for the three grants a library needs:
//!
//! 1. **Client credentials**: the consumer acts on its own behalf
//! 2. **Authorization code**: exchange a code the user obtained from
//!    [`OAuthClient::authorize_url`]
//! 3. **Refresh token**: renew an expired access token
//!
//! ## Example
//!
//! ```rust,no_run
//! use bitbucket_cloud::auth::OAuthClient;
//! use bitbucket_cloud::BitbucketClient;
//!
//! # async fn example() -> bitbucket_cloud::api::common::Result<()> {
//! let oauth = OAuthClient::new("consumer-key", "consumer-secret");
//! let token = oauth.client_credentials().await?;
//!
//! let client = BitbucketClient::builder()
//!     .auth(token.into_credential())
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Notes
//!
//! - The consumer key and secret are sent as HTTP Basic credentials
//! - Browser interaction for the authorization code grant is left to callers

use chrono::{Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::AuthCredential;
use crate::api::common::{ApiError, Result};

/// Bitbucket's authorization endpoint.
pub const AUTHORIZE_URL: &str = "https://bitbucket.org/site/oauth2/authorize";

/// Bitbucket's token endpoint.
pub const TOKEN_URL: &str = "https://bitbucket.org/site/oauth2/access_token";

/// Tokens returned by the token endpoint.
///
/// # Fields
///
/// - `access_token`: The bearer token for API authentication.
/// - `refresh_token`: Token for obtaining new access tokens.
/// - `token_type`: Usually `bearer`.
/// - `expires_in`: Token lifetime in seconds.
/// - `scopes`: Scopes actually granted.
#[derive(Debug, Clone)]
pub struct OAuthTokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: String,
    pub expires_in: Option<u64>,
    pub scopes: Vec<String>,
}

impl OAuthTokenResponse {
    /// Converts the response into a credential, computing the expiry from
    /// `expires_in` relative to now.
    pub fn into_credential(self) -> AuthCredential {
        let expires_at = self
            .expires_in
            .and_then(|secs| i64::try_from(secs).ok())
            .map(|secs| Utc::now() + Duration::seconds(secs));

        AuthCredential::OAuth {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
        }
    }
}

#[derive(Deserialize)]
struct TokenResponseRaw {
    access_token: String,
    refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    token_type: String,
    expires_in: Option<u64>,
    scopes: Option<String>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl From<TokenResponseRaw> for OAuthTokenResponse {
    fn from(raw: TokenResponseRaw) -> Self {
        let scopes = raw
            .scopes
            .map(|s| s.split_whitespace().map(String::from).collect())
            .unwrap_or_default();

        Self {
            access_token: raw.access_token,
            refresh_token: raw.refresh_token,
            token_type: raw.token_type,
            expires_in: raw.expires_in,
            scopes,
        }
    }
}

/// An OAuth consumer able to request tokens from Bitbucket.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    client_id: String,
    client_secret: String,
    authorize_url: String,
    token_url: String,
    http: Client,
}

impl OAuthClient {
    /// Creates a consumer from its key and secret.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            authorize_url: AUTHORIZE_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Overrides the token endpoint.
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Overrides the authorization endpoint.
    pub fn with_authorize_url(mut self, url: impl Into<String>) -> Self {
        self.authorize_url = url.into();
        self
    }

    /// Uses a preconfigured HTTP client for token requests.
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// URL the user visits to grant access and receive an authorization code.
    pub fn authorize_url(&self, state: Option<&str>) -> Result<String> {
        let mut url = Url::parse(&self.authorize_url)?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "code");
        if let Some(state) = state {
            url.query_pairs_mut().append_pair("state", state);
        }
        Ok(url.to_string())
    }

    /// Requests a token with the client credentials grant.
    pub async fn client_credentials(&self) -> Result<OAuthTokenResponse> {
        self.request_token(&[("grant_type", "client_credentials")])
            .await
    }

    /// Exchanges an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<OAuthTokenResponse> {
        self.request_token(&[("grant_type", "authorization_code"), ("code", code)])
            .await
    }

    /// Obtains a new access token from a refresh token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<OAuthTokenResponse> {
        self.request_token(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    async fn request_token(&self, params: &[(&str, &str)]) -> Result<OAuthTokenResponse> {
        tracing::debug!("POST {} ({})", self.token_url, params[0].1);

        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::AuthFailed(format!(
                "token request failed ({}): {}",
                status, body
            )));
        }

        let raw: TokenResponseRaw = response.json().await?;
        Ok(raw.into())
    }
}
