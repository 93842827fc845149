//
//  bitbucket-cloud
//  api/cloud/source.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository source browsing (`/src`) and file history.
//!
//! The same `/src/{node}/{path}` endpoint returns raw bytes for a file and a
//! paginated JSON listing for a directory. [`SrcService::get_raw`] tells the
//! two apart and returns a [`SourceContent`].
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_cloud::api::cloud::SourceContent;
//! use bitbucket_cloud::BitbucketClient;
//!
//! # async fn example() -> bitbucket_cloud::api::common::Result<()> {
//! let client = BitbucketClient::new()?;
//!
//! match client.src().get_raw("team", "repo", "main", "src", &[]).await?.into_data() {
//!     SourceContent::File(bytes) => println!("{} bytes", bytes.len()),
//!     SourceContent::Directory(listing) => {
//!         for entry in &listing.values {
//!             println!("{}", entry.path.as_deref().unwrap_or_default());
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::commits::Commit;
use crate::api::client::BitbucketClient;
use crate::api::common::{ApiResponse, Link, PaginatedResponse, QueryOptions, QueryOpts, Result};

/// Metadata of a file or directory at a revision.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// `commit_file` or `commit_directory`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,

    /// e.g. `binary`, `executable`, `link`, `lfs`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub escaped_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<Commit>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<SourceLinks>,
}

impl SourceMetadata {
    pub fn is_directory(&self) -> bool {
        self.source_type.as_deref() == Some("commit_directory")
    }
}

/// Links attached to [`SourceMetadata`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceLinks {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Link>,
}

/// Page of source entries, also used for file history.
pub type SourceListing = PaginatedResponse<SourceMetadata>;

/// What `/src/{node}/{path}` returned.
#[derive(Debug, Clone)]
pub enum SourceContent {
    /// Raw file bytes.
    File(Vec<u8>),
    /// One page of directory entries.
    Directory(SourceListing),
}

impl SourceContent {
    // A directory listing is a JSON object with a `values` array. Anything
    // else, JSON files included, is file content.
    fn from_body(body: Vec<u8>) -> Self {
        let is_listing = serde_json::from_slice::<Value>(&body)
            .ok()
            .and_then(|v| v.get("values").map(Value::is_array))
            .unwrap_or(false);

        if is_listing {
            if let Ok(listing) = serde_json::from_slice::<SourceListing>(&body) {
                return SourceContent::Directory(listing);
            }
        }
        SourceContent::File(body)
    }
}

/// Options for `/src` requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SrcOpts {
    /// Recurse into subdirectories up to this depth. Bitbucket defaults to 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
}

#[derive(Serialize)]
struct MetaFormat {
    format: &'static str,
}

/// Options for [`FileHistoryService::get`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileHistoryOpts {
    /// Follow the file across renames. Bitbucket defaults to `true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renames: Option<bool>,
}

#[derive(Debug, Clone, Copy)]
pub struct SrcService<'a> {
    client: &'a BitbucketClient,
}

impl<'a> SrcService<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    fn url(&self, owner: &str, repo_slug: &str, node: &str, path: &str, opts: QueryOpts<'_>) -> Result<String> {
        let prefix = format!("/repositories/{}/{}/src", owner, repo_slug);
        let tail = format!("{}/{}", node, path);
        self.client.request_url_with_path(&prefix, &tail, opts)
    }

    /// Gets a file's raw contents or a directory listing at `node`.
    ///
    /// `node` is a commit hash, branch or tag. An empty `path` lists the root
    /// at `/src/{node}/`; a `path` ending in `/` keeps its trailing slash.
    pub async fn get_raw(
        &self,
        owner: &str,
        repo_slug: &str,
        node: &str,
        path: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<SourceContent>> {
        let url = self.url(owner, repo_slug, node, path, opts)?;
        Ok(self
            .client
            .get_bytes(&url)
            .await?
            .map(SourceContent::from_body))
    }

    /// Gets metadata describing a file or directory instead of its contents.
    pub async fn get_metadata(
        &self,
        owner: &str,
        repo_slug: &str,
        node: &str,
        path: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<SourceMetadata>> {
        let format = MetaFormat { format: "meta" };
        let mut all: Vec<&(dyn QueryOptions + Sync)> = opts.to_vec();
        all.push(&format);
        let url = self.url(owner, repo_slug, node, path, &all)?;
        self.client.get(&url).await
    }
}

/// Commits that modified a file, newest first.
#[derive(Debug, Clone, Copy)]
pub struct FileHistoryService<'a> {
    client: &'a BitbucketClient,
}

impl<'a> FileHistoryService<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    pub async fn get(
        &self,
        owner: &str,
        repo_slug: &str,
        node: &str,
        path: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<SourceListing>> {
        let prefix = format!("/repositories/{}/{}/filehistory", owner, repo_slug);
        let tail = format!("{}/{}", node, path);
        let url = self.client.request_url_with_path(&prefix, &tail, opts)?;
        self.client.get(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::tests::mock_client;
    use mockito::Matcher;

    #[test]
    fn test_body_classification() {
        let file = SourceContent::from_body(b"fn main() {}\n".to_vec());
        assert!(matches!(file, SourceContent::File(ref b) if b.starts_with(b"fn main")));

        let json_file = SourceContent::from_body(br#"{"name": "pkg", "values": 3}"#.to_vec());
        assert!(matches!(json_file, SourceContent::File(_)));

        let dir = SourceContent::from_body(
            br#"{"values": [{"path": "src/lib.rs", "type": "commit_file"}, {"path": "src/api", "type": "commit_directory"}]}"#
                .to_vec(),
        );
        match dir {
            SourceContent::Directory(listing) => {
                assert_eq!(listing.len(), 2);
                assert!(listing.values[1].is_directory());
            }
            SourceContent::File(_) => panic!("expected a directory listing"),
        }
    }

    #[tokio::test]
    async fn test_get_raw_file() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repositories/team/repo/src/main/docs/read%20me.md")
            .with_status(200)
            .with_header("content-type", "text/plain")
            .with_body("# Hello\n")
            .create_async()
            .await;

        let client = mock_client(&server);
        let content = client
            .src()
            .get_raw("team", "repo", "main", "docs/read me.md", &[])
            .await
            .unwrap();

        mock.assert_async().await;
        match content.into_data() {
            SourceContent::File(bytes) => assert_eq!(bytes, b"# Hello\n"),
            SourceContent::Directory(_) => panic!("expected file content"),
        }
    }

    #[tokio::test]
    async fn test_get_raw_root_and_directory_keep_slash() {
        let mut server = mockito::Server::new_async().await;
        let root = server
            .mock("GET", "/repositories/team/repo/src/main/")
            .with_status(200)
            .with_body(r#"{"values": [{"path": "docs", "type": "commit_directory"}]}"#)
            .create_async()
            .await;
        let docs = server
            .mock("GET", "/repositories/team/repo/src/main/docs/")
            .with_status(200)
            .with_body(r#"{"values": [{"path": "docs/index.md", "type": "commit_file"}]}"#)
            .create_async()
            .await;

        let client = mock_client(&server);
        let src = client.src();

        let listing = src.get_raw("team", "repo", "main", "", &[]).await.unwrap();
        assert!(matches!(
            listing.into_data(),
            SourceContent::Directory(ref l) if l.values[0].is_directory()
        ));

        let listing = src.get_raw("team", "repo", "main", "docs/", &[]).await.unwrap();
        assert!(matches!(listing.into_data(), SourceContent::Directory(_)));

        root.assert_async().await;
        docs.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_raw_directory_with_depth() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repositories/team/repo/src/abc123/src")
            .match_query(Matcher::UrlEncoded("max_depth".into(), "2".into()))
            .with_status(200)
            .with_body(r#"{"values": [{"path": "src/main.rs", "type": "commit_file", "size": 42}], "pagelen": 10}"#)
            .create_async()
            .await;

        let client = mock_client(&server);
        let opts = SrcOpts { max_depth: Some(2) };
        let content = client
            .src()
            .get_raw("team", "repo", "abc123", "src", &[&opts])
            .await
            .unwrap();

        mock.assert_async().await;
        match content.into_data() {
            SourceContent::Directory(listing) => assert_eq!(listing.values[0].size, Some(42)),
            SourceContent::File(_) => panic!("expected a directory listing"),
        }
    }

    #[tokio::test]
    async fn test_get_metadata_adds_format() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repositories/team/repo/src/main/Cargo.toml")
            .match_query(Matcher::UrlEncoded("format".into(), "meta".into()))
            .with_status(200)
            .with_body(r#"{"path": "Cargo.toml", "type": "commit_file", "mimetype": "text/x-toml", "attributes": []}"#)
            .create_async()
            .await;

        let client = mock_client(&server);
        let meta = client
            .src()
            .get_metadata("team", "repo", "main", "Cargo.toml", &[])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(meta.mimetype.as_deref(), Some("text/x-toml"));
        assert!(!meta.is_directory());
    }

    #[tokio::test]
    async fn test_file_history_renames() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repositories/team/repo/filehistory/main/src/lib.rs")
            .match_query(Matcher::UrlEncoded("renames".into(), "false".into()))
            .with_status(200)
            .with_body(r#"{"values": [{"path": "src/lib.rs", "commit": {"hash": "abc"}}]}"#)
            .create_async()
            .await;

        let client = mock_client(&server);
        let opts = FileHistoryOpts {
            renames: Some(false),
        };
        let history = client
            .file_history()
            .get("team", "repo", "main", "src/lib.rs", &[&opts])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            history.values[0].commit.as_ref().and_then(|c| c.hash.as_deref()),
            Some("abc")
        );
    }
}
