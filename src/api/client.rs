//
//  bitbucket-cloud
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the Bitbucket Cloud API
//!
//! This module provides [`BitbucketClient`], the single HTTP client shared by
//! every resource service, and [`ClientBuilder`] to configure it.
//!
//! ## Features
//!
//! - Configurable base URL, user agent, timeout and custom headers
//! - Authentication header injection
//! - Options struct merging into query strings
//! - JSON serialization/deserialization
//! - Status classification into [`ApiError`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use bitbucket_cloud::BitbucketClient;
//! use bitbucket_cloud::api::common::ListOpts;
//!
//! # async fn example() -> bitbucket_cloud::api::common::Result<()> {
//! let client = BitbucketClient::builder()
//!     .basic_auth("jdoe", "app-password")
//!     .pagelen(50)
//!     .build()?;
//!
//! let page = ListOpts { page: Some(1), pagelen: None };
//! let repos = client.repositories().list("jdoe", &[&page]).await?;
//! for repo in &repos.values {
//!     println!("{}", repo.full_name.as_deref().unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use super::cloud::{
    BranchRestrictionsService, BranchingModelService, CommitService, CommitsService,
    ComponentsService, DefaultReviewersService, DeployKeysService, DiffService,
    DownloadsService, FileHistoryService, ForksService, HookEventsService, IssuesService,
    MilestonesService, PatchService, PullRequestsService, RefsService, RepositoriesService,
    SrcService, TeamsService, UserService, UsersService, VersionsService, WatchersService,
};
use super::common::{
    add_query_params, parse_error_message, ApiError, ApiResponse, ListOpts, QueryOpts, Result,
};
use crate::auth::AuthCredential;

/// Bitbucket Cloud API root.
pub const DEFAULT_BASE_URL: &str = "https://api.bitbucket.org/2.0";

/// Page length Bitbucket applies when none is requested.
pub const DEFAULT_PAGE_LENGTH: u32 = 10;

/// Request timeout applied to clients built without a custom HTTP client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// `User-Agent` sent when none is configured.
pub fn default_user_agent() -> String {
    format!("bitbucket-cloud/{}", crate::VERSION)
}

/// Percent-encodes a single path segment (file names, attachment paths).
///
/// `/` becomes `%2F` and a space becomes `%20`. Form encoding writes a
/// literal `+` as `%2B`, so any `+` left in its output stands for a space.
pub(crate) fn escape_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Checks a response status and returns the body on success.
///
/// 200, 201, 202, 204 and 304 pass. A 202 whose body is empty becomes
/// [`ApiError::Accepted`]. Everything else becomes [`ApiError::Response`]
/// with the body flattened by [`parse_error_message`].
pub(crate) fn check_response(
    method: &Method,
    url: &str,
    status: StatusCode,
    body: Vec<u8>,
) -> Result<Vec<u8>> {
    match status.as_u16() {
        202 if body.iter().all(u8::is_ascii_whitespace) => Err(ApiError::Accepted { raw: body }),
        200 | 201 | 202 | 204 | 304 => Ok(body),
        _ => {
            let url = url.split('?').next().unwrap_or(url).to_string();
            Err(ApiError::Response {
                method: method.clone(),
                url,
                status,
                message: parse_error_message(&body),
                body,
            })
        }
    }
}

fn decode<T: DeserializeOwned + Default>(raw: RawResponse) -> Result<ApiResponse<T>> {
    let data = if raw.body.iter().all(u8::is_ascii_whitespace) {
        T::default()
    } else {
        serde_json::from_slice(&raw.body)?
    };

    Ok(ApiResponse {
        data,
        status: raw.status,
        headers: raw.headers,
    })
}

/// A response whose status has been checked and whose body was read.
pub(crate) struct RawResponse {
    pub(crate) status: StatusCode,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Vec<u8>,
}

/// Configures and builds a [`BitbucketClient`].
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use bitbucket_cloud::BitbucketClient;
///
/// let client = BitbucketClient::builder()
///     .base_url("https://api.bitbucket.org/2.0")
///     .user_agent("my-tool/1.0")
///     .header("X-Request-Source", "docs")
///     .timeout(Duration::from_secs(10))
///     .bearer_token("repository-access-token")
///     .build()
///     .unwrap();
///
/// assert_eq!(client.base_url(), "https://api.bitbucket.org/2.0");
/// ```
///
/// # Notes
///
/// - The base URL must not end with `/`
/// - When several credentials are set, the last one wins
/// - `timeout` only applies when no custom HTTP client is given
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: String,
    user_agent: String,
    headers: Vec<(String, String)>,
    timeout: Duration,
    pagelen: u32,
    auth: Option<AuthCredential>,
    http: Option<Client>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: default_user_agent(),
            headers: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            pagelen: DEFAULT_PAGE_LENGTH,
            auth: None,
            http: None,
        }
    }
}

impl ClientBuilder {
    /// Sets the API root, e.g. a proxy in front of `api.bitbucket.org/2.0`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the `User-Agent` header.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Adds a header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Adds several headers sent with every request.
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the default page length for repository endpoints.
    pub fn pagelen(mut self, pagelen: u32) -> Self {
        self.pagelen = pagelen;
        self
    }

    /// Sets the credentials.
    pub fn auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Uses HTTP Basic credentials.
    pub fn basic_auth(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth(AuthCredential::basic(username, password))
    }

    /// Uses a static bearer token.
    pub fn bearer_token(self, token: impl Into<String>) -> Self {
        self.auth(AuthCredential::bearer(token))
    }

    /// Uses an OAuth access token obtained elsewhere.
    pub fn oauth_token(self, access_token: impl Into<String>) -> Self {
        self.auth(AuthCredential::OAuth {
            access_token: access_token.into(),
            refresh_token: None,
            expires_at: None,
        })
    }

    /// Uses a preconfigured `reqwest` client.
    pub fn http_client(mut self, http: Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Validates the configuration and builds the client.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Config`] for a trailing slash, a zero page length or an
    ///   invalid header
    /// - [`ApiError::Url`] for a base URL that does not parse
    /// - [`ApiError::Network`] when the HTTP client cannot be created
    pub fn build(self) -> Result<BitbucketClient> {
        if self.base_url.ends_with('/') {
            return Err(ApiError::Config(
                "custom base URL cannot contain a trailing slash".to_string(),
            ));
        }
        Url::parse(&self.base_url)?;

        if self.pagelen == 0 {
            return Err(ApiError::Config("page length must be positive".to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.user_agent)
                .map_err(|e| ApiError::Config(format!("invalid user agent: {}", e)))?,
        );

        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::Config(format!("invalid header name {:?}: {}", name, e)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::Config(format!("invalid value for header {}: {}", name, e)))?;
            headers.insert(header_name, header_value);
        }

        let http = match self.http {
            Some(http) => http,
            None => Client::builder().timeout(self.timeout).build()?,
        };

        Ok(BitbucketClient {
            http,
            base_url: self.base_url,
            headers,
            auth: self.auth,
            pagelen: self.pagelen,
        })
    }
}

/// HTTP client for the Bitbucket Cloud REST API.
///
/// Holds the connection pool, base URL, default headers, credentials and
/// default page length. Resource services borrow it through accessor
/// methods such as [`BitbucketClient::repositories`].
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_cloud::BitbucketClient;
///
/// # async fn example() -> bitbucket_cloud::api::common::Result<()> {
/// let client = BitbucketClient::new()?;
/// let repos = client.repositories().list_public(&[]).await?;
/// println!("{} public repositories on this page", repos.values.len());
///
/// if let Some(next) = repos.next_url() {
///     let more = client
///         .get::<bitbucket_cloud::api::common::PaginatedResponse<serde_json::Value>>(next)
///         .await?;
///     println!("{} more", more.values.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BitbucketClient {
    http: Client,
    base_url: String,
    headers: HeaderMap,
    auth: Option<AuthCredential>,
    pagelen: u32,
}

impl BitbucketClient {
    /// Creates an anonymous client with default settings.
    pub fn new() -> Result<Self> {
        ClientBuilder::default().build()
    }

    /// Starts configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Replaces the credentials of this client.
    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    /// The API root every path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Default page length for repository endpoints.
    pub fn pagelen(&self) -> u32 {
        self.pagelen
    }

    /// The configured credentials, if any.
    pub fn auth(&self) -> Option<&AuthCredential> {
        self.auth.as_ref()
    }

    fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Builds the full URL for `path` with `opts` merged into the query.
    ///
    /// Absolute URLs (such as `next` links) are used as they are. When the
    /// client page length differs from [`DEFAULT_PAGE_LENGTH`] and the URL
    /// targets `/repositories/`, `pagelen` is added unless already present.
    pub fn request_url(&self, path: &str, opts: QueryOpts<'_>) -> Result<String> {
        let url = add_query_params(&self.resolve(path), opts)?;

        if self.pagelen == DEFAULT_PAGE_LENGTH || !url.contains("/repositories/") {
            return Ok(url);
        }

        let has_pagelen = Url::parse(&url)?
            .query_pairs()
            .any(|(key, _)| key == "pagelen");
        if has_pagelen {
            return Ok(url);
        }

        let page = ListOpts {
            page: None,
            pagelen: Some(self.pagelen),
        };
        add_query_params(&url, &[&page])
    }

    /// Like [`request_url`](Self::request_url) with `tail` appended as path
    /// segments, each percent-encoded and `/` kept as the separator.
    ///
    /// A `tail` ending in `/` keeps its trailing slash, which Bitbucket uses
    /// to address directories.
    pub(crate) fn request_url_with_path(
        &self,
        prefix: &str,
        tail: &str,
        opts: QueryOpts<'_>,
    ) -> Result<String> {
        let mut url = Url::parse(&self.resolve(prefix))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Config(format!("{} cannot take path segments", self.base_url)))?
            .pop_if_empty()
            .extend(tail.split('/').filter(|s| !s.is_empty()));
        if tail.ends_with('/') {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.push("");
            }
        }
        self.request_url(url.as_str(), opts)
    }

    pub(crate) async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
    ) -> Result<RawResponse> {
        let url = self.resolve(url);
        let mut request = self
            .http
            .request(method.clone(), &url)
            .headers(self.headers.clone());

        if let Some(auth) = &self.auth {
            request = auth.apply_to_request(request);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        tracing::debug!("{} {}", method, url);
        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?.to_vec();
        tracing::debug!("{} {} -> {}", method, url, status);

        let body = check_response(&method, &url, status, bytes)?;
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }

    /// Makes a GET request and decodes the JSON response.
    ///
    /// `url` is either a path relative to the base URL or an absolute URL.
    /// An empty success body decodes to `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The network request fails
    /// - The status is not 200, 201, 202, 204 or 304
    /// - The body cannot be deserialized to type `T`
    pub async fn get<T: DeserializeOwned + Default>(&self, url: &str) -> Result<ApiResponse<T>> {
        decode(self.execute(Method::GET, url, None).await?)
    }

    /// Makes a POST request with a JSON body and decodes the JSON response.
    pub async fn post<T, B>(&self, url: &str, body: &B) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned + Default,
        B: Serialize + Sync + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        decode(self.execute(Method::POST, url, Some(body)).await?)
    }

    /// Makes a POST request without a body.
    pub async fn post_empty<T: DeserializeOwned + Default>(&self, url: &str) -> Result<ApiResponse<T>> {
        decode(self.execute(Method::POST, url, None).await?)
    }

    /// Makes a PUT request with a JSON body and decodes the JSON response.
    pub async fn put<T, B>(&self, url: &str, body: &B) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned + Default,
        B: Serialize + Sync + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        decode(self.execute(Method::PUT, url, Some(body)).await?)
    }

    /// Makes a PUT request without a body.
    pub async fn put_empty<T: DeserializeOwned + Default>(&self, url: &str) -> Result<ApiResponse<T>> {
        decode(self.execute(Method::PUT, url, None).await?)
    }

    /// Makes a DELETE request, discarding any response body.
    pub async fn delete(&self, url: &str) -> Result<ApiResponse<()>> {
        let raw = self.execute(Method::DELETE, url, None).await?;
        Ok(ApiResponse {
            data: (),
            status: raw.status,
            headers: raw.headers,
        })
    }

    /// Makes a GET request and returns the raw body bytes.
    pub async fn get_bytes(&self, url: &str) -> Result<ApiResponse<Vec<u8>>> {
        let raw = self.execute(Method::GET, url, None).await?;
        Ok(ApiResponse {
            data: raw.body,
            status: raw.status,
            headers: raw.headers,
        })
    }

    /// Makes a GET request and returns the body as text.
    pub async fn get_text(&self, url: &str) -> Result<ApiResponse<String>> {
        Ok(self
            .get_bytes(url)
            .await?
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Makes a GET request where 204 means `true` and 404 means `false`.
    ///
    /// Used by the vote and watch endpoints.
    pub(crate) async fn get_flag(&self, url: &str) -> Result<ApiResponse<bool>> {
        match self.execute(Method::GET, url, None).await {
            Ok(raw) => Ok(ApiResponse {
                data: raw.status == StatusCode::NO_CONTENT,
                status: raw.status,
                headers: raw.headers,
            }),
            Err(e) if e.is_not_found() => Ok(ApiResponse {
                data: false,
                status: StatusCode::NOT_FOUND,
                headers: HeaderMap::new(),
            }),
            Err(e) => Err(e),
        }
    }

    /// Repository endpoints, including webhooks.
    pub fn repositories(&self) -> RepositoriesService<'_> {
        RepositoriesService::new(self)
    }

    /// Pull request endpoints.
    pub fn pull_requests(&self) -> PullRequestsService<'_> {
        PullRequestsService::new(self)
    }

    /// Issue tracker endpoints.
    pub fn issues(&self) -> IssuesService<'_> {
        IssuesService::new(self)
    }

    /// Issue tracker components.
    pub fn components(&self) -> ComponentsService<'_> {
        ComponentsService::new(self)
    }

    /// Issue tracker milestones.
    pub fn milestones(&self) -> MilestonesService<'_> {
        MilestonesService::new(self)
    }

    /// Issue tracker versions.
    pub fn versions(&self) -> VersionsService<'_> {
        VersionsService::new(self)
    }

    /// Branch permissions.
    pub fn branch_restrictions(&self) -> BranchRestrictionsService<'_> {
        BranchRestrictionsService::new(self)
    }

    /// Branching model and its settings.
    pub fn branching_model(&self) -> BranchingModelService<'_> {
        BranchingModelService::new(self)
    }

    /// Single commit endpoints: approvals, comments, build statuses.
    pub fn commit(&self) -> CommitService<'_> {
        CommitService::new(self)
    }

    /// Commit listings.
    pub fn commits(&self) -> CommitsService<'_> {
        CommitsService::new(self)
    }

    /// Default reviewers.
    pub fn default_reviewers(&self) -> DefaultReviewersService<'_> {
        DefaultReviewersService::new(self)
    }

    /// Repository access keys.
    pub fn deploy_keys(&self) -> DeployKeysService<'_> {
        DeployKeysService::new(self)
    }

    /// Diffs and diffstats between revisions.
    pub fn diff(&self) -> DiffService<'_> {
        DiffService::new(self)
    }

    /// Patches between revisions.
    pub fn patch(&self) -> PatchService<'_> {
        PatchService::new(self)
    }

    /// Repository downloads.
    pub fn downloads(&self) -> DownloadsService<'_> {
        DownloadsService::new(self)
    }

    /// History of a single file.
    pub fn file_history(&self) -> FileHistoryService<'_> {
        FileHistoryService::new(self)
    }

    /// Repository forks.
    pub fn forks(&self) -> ForksService<'_> {
        ForksService::new(self)
    }

    /// Source browsing.
    pub fn src(&self) -> SrcService<'_> {
        SrcService::new(self)
    }

    /// Branches and tags.
    pub fn refs(&self) -> RefsService<'_> {
        RefsService::new(self)
    }

    /// Repository watchers.
    pub fn watchers(&self) -> WatchersService<'_> {
        WatchersService::new(self)
    }

    /// Webhook event catalogue.
    pub fn hook_events(&self) -> HookEventsService<'_> {
        HookEventsService::new(self)
    }

    /// Team endpoints.
    pub fn teams(&self) -> TeamsService<'_> {
        TeamsService::new(self)
    }

    /// The authenticated user.
    pub fn user(&self) -> UserService<'_> {
        UserService::new(self)
    }

    /// Other users.
    pub fn users(&self) -> UsersService<'_> {
        UsersService::new(self)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use mockito::Matcher;
    use serde::Deserialize;

    /// Client pointed at a mock server with Basic credentials `user:pass`.
    pub(crate) fn mock_client(server: &mockito::ServerGuard) -> BitbucketClient {
        BitbucketClient::builder()
            .base_url(server.url())
            .basic_auth("user", "pass")
            .build()
            .unwrap()
    }

    #[derive(Debug, Default, Deserialize)]
    struct Thing {
        #[serde(default)]
        name: Option<String>,
    }

    #[test]
    fn test_builder_rejects_trailing_slash() {
        let err = BitbucketClient::builder()
            .base_url("https://api.bitbucket.org/2.0/")
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "custom base URL cannot contain a trailing slash");
    }

    #[test]
    fn test_builder_rejects_relative_base_url() {
        let err = BitbucketClient::builder()
            .base_url("api.bitbucket.org")
            .build()
            .unwrap_err();
        assert!(matches!(err, ApiError::Url(_)));
    }

    #[test]
    fn test_builder_rejects_bad_header() {
        let err = BitbucketClient::builder()
            .header("bad header", "x")
            .build()
            .unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_defaults() {
        let client = BitbucketClient::new().unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        assert_eq!(client.pagelen(), DEFAULT_PAGE_LENGTH);
        assert!(client.auth().is_none());
    }

    #[test]
    fn test_request_url_relative_and_absolute() {
        let client = BitbucketClient::new().unwrap();
        assert_eq!(
            client.request_url("/user", &[]).unwrap(),
            "https://api.bitbucket.org/2.0/user"
        );
        assert_eq!(
            client
                .request_url("https://api.bitbucket.org/2.0/repositories?page=2", &[])
                .unwrap(),
            "https://api.bitbucket.org/2.0/repositories?page=2"
        );
    }

    #[test]
    fn test_request_url_adds_pagelen_for_repositories() {
        let client = BitbucketClient::builder().pagelen(30).build().unwrap();
        assert_eq!(
            client.request_url("/repositories/team/repo/commits", &[]).unwrap(),
            "https://api.bitbucket.org/2.0/repositories/team/repo/commits?pagelen=30"
        );
        // Explicit page length wins.
        let explicit = ListOpts {
            page: None,
            pagelen: Some(5),
        };
        assert_eq!(
            client
                .request_url("/repositories/team/repo/commits", &[&explicit])
                .unwrap(),
            "https://api.bitbucket.org/2.0/repositories/team/repo/commits?pagelen=5"
        );
        // Only repository endpoints are affected.
        assert_eq!(
            client.request_url("/teams", &[]).unwrap(),
            "https://api.bitbucket.org/2.0/teams"
        );
    }

    #[test]
    fn test_request_url_with_path_encodes_segments() {
        let client = BitbucketClient::new().unwrap();
        let url = client
            .request_url_with_path("/repositories/a/b/src/main", "docs/read me.md", &[])
            .unwrap();
        assert_eq!(
            url,
            "https://api.bitbucket.org/2.0/repositories/a/b/src/main/docs/read%20me.md"
        );
    }

    #[test]
    fn test_request_url_with_path_keeps_directory_slash() {
        let client = BitbucketClient::new().unwrap();
        assert_eq!(
            client
                .request_url_with_path("/repositories/a/b/src", "main/", &[])
                .unwrap(),
            "https://api.bitbucket.org/2.0/repositories/a/b/src/main/"
        );
        assert_eq!(
            client
                .request_url_with_path("/repositories/a/b/src", "main/docs/", &[])
                .unwrap(),
            "https://api.bitbucket.org/2.0/repositories/a/b/src/main/docs/"
        );
    }

    #[test]
    fn test_escape_segment() {
        assert_eq!(escape_segment("my file/v1.zip"), "my%20file%2Fv1.zip");
        assert_eq!(escape_segment("a+b {x}"), "a%2Bb%20%7Bx%7D");
    }

    #[test]
    fn test_check_response_success_codes() {
        for code in [200u16, 201, 204, 304] {
            let status = StatusCode::from_u16(code).unwrap();
            assert!(check_response(&Method::GET, "https://x", status, Vec::new()).is_ok());
        }
        let ok = check_response(&Method::GET, "https://x", StatusCode::ACCEPTED, b"{}".to_vec());
        assert!(ok.is_ok());
    }

    #[test]
    fn test_check_response_accepted_empty_body() {
        let err =
            check_response(&Method::GET, "https://x", StatusCode::ACCEPTED, Vec::new()).unwrap_err();
        assert!(err.is_accepted());
    }

    #[test]
    fn test_check_response_other_codes_are_errors() {
        let err = check_response(
            &Method::POST,
            "https://api.bitbucket.org/2.0/repositories/a/b?fields=x",
            StatusCode::PARTIAL_CONTENT,
            br#"{"error": {"message": "nope"}}"#.to_vec(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "POST https://api.bitbucket.org/2.0/repositories/a/b: 206 {error: {message: nope}}"
        );
    }

    #[tokio::test]
    async fn test_get_sends_default_headers_and_auth() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/thing")
            .match_header("authorization", "Basic dXNlcjpwYXNz")
            .match_header("accept", "application/json")
            .match_header("content-type", "application/json")
            .match_header("user-agent", default_user_agent().as_str())
            .match_header("x-trace", "abc")
            .with_status(200)
            .with_body(r#"{"name": "widget"}"#)
            .create_async()
            .await;

        let client = BitbucketClient::builder()
            .base_url(server.url())
            .basic_auth("user", "pass")
            .header("X-Trace", "abc")
            .build()
            .unwrap();
        let thing: ApiResponse<Thing> = client.get("/thing").await.unwrap();

        mock.assert_async().await;
        assert_eq!(thing.status, StatusCode::OK);
        assert_eq!(thing.name.as_deref(), Some("widget"));
    }

    #[tokio::test]
    async fn test_empty_body_decodes_to_default() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/thing")
            .with_status(204)
            .create_async()
            .await;

        let client = mock_client(&server);
        let thing: ApiResponse<Thing> = client.put_empty("/thing").await.unwrap();
        assert_eq!(thing.status, StatusCode::NO_CONTENT);
        assert!(thing.name.is_none());
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/thing")
            .match_body(Matcher::Json(serde_json::json!({"name": "new"})))
            .with_status(201)
            .with_body(r#"{"name": "new"}"#)
            .create_async()
            .await;

        let client = mock_client(&server);
        let created: ApiResponse<Thing> = client
            .post("/thing", &serde_json::json!({"name": "new"}))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(created.status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_accepted_without_body_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/slow")
            .with_status(202)
            .create_async()
            .await;

        let client = mock_client(&server);
        let err = client.get::<Thing>("/slow").await.unwrap_err();
        assert!(matches!(err, ApiError::Accepted { .. }));
    }

    #[tokio::test]
    async fn test_error_response_carries_body_and_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/thing")
            .with_status(403)
            .with_body(r#"{"type": "error", "error": {"message": "Forbidden"}}"#)
            .create_async()
            .await;

        let client = mock_client(&server);
        let err = client.delete("/thing").await.unwrap_err();

        match &err {
            ApiError::Response {
                status, message, ..
            } => {
                assert_eq!(*status, StatusCode::FORBIDDEN);
                assert_eq!(message, "{error: {message: Forbidden}}, {type: error}");
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(err.body().unwrap().starts_with(b"{\"type\""));
    }

    #[tokio::test]
    async fn test_get_text_returns_raw_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/raw")
            .with_status(200)
            .with_header("content-type", "text/plain")
            .with_body("diff --git a/x b/x\n")
            .create_async()
            .await;

        let client = mock_client(&server);
        let text = client.get_text("/raw").await.unwrap();
        assert_eq!(text.data, "diff --git a/x b/x\n");
    }

    #[tokio::test]
    async fn test_get_flag() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/yes")
            .with_status(204)
            .create_async()
            .await;
        server
            .mock("GET", "/no")
            .with_status(404)
            .create_async()
            .await;
        server
            .mock("GET", "/broken")
            .with_status(500)
            .create_async()
            .await;

        let client = mock_client(&server);
        assert!(client.get_flag("/yes").await.unwrap().data);
        assert!(!client.get_flag("/no").await.unwrap().data);
        assert!(client.get_flag("/broken").await.is_err());
    }
}
