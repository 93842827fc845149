//
//  bitbucket-cloud
//  api/cloud/issue_tracker.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Issue tracker metadata: components, milestones and versions.
//!
//! These resources do not carry a numeric `id` in their payload. Each type
//! offers an `id()` method that recovers it from `links.self.href`.
//!
//! # Example
//!
//! ```rust
//! use bitbucket_cloud::api::cloud::Version;
//!
//! let version: Version = serde_json::from_str(r#"{
//!     "name": "1.0",
//!     "links": {"self": {"href": "https://api.bitbucket.org/2.0/repositories/team/repo/versions/354035"}}
//! }"#).unwrap();
//!
//! assert_eq!(version.id(), 354035);
//! ```

use serde::{Deserialize, Serialize};

use crate::api::client::BitbucketClient;
use crate::api::common::{
    parse_resource_id, ApiResponse, PaginatedResponse, QueryOpts, Result, SelfLinks,
    COMPONENT_ID_PATTERN, MILESTONE_ID_PATTERN, VERSION_ID_PATTERN,
};

fn self_href(links: Option<&SelfLinks>) -> &str {
    links
        .and_then(|l| l.self_link.as_ref())
        .map(|l| l.href.as_str())
        .unwrap_or_default()
}

/// An issue tracker component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Component {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<SelfLinks>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
}

impl Component {
    /// Numeric ID parsed from the self link, or `0`.
    pub fn id(&self) -> i64 {
        parse_resource_id(&COMPONENT_ID_PATTERN, self_href(self.links.as_ref()))
    }
}

/// An issue tracker milestone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Milestone {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<SelfLinks>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub milestone_type: Option<String>,
}

impl Milestone {
    /// Numeric ID parsed from the self link, or `0`.
    pub fn id(&self) -> i64 {
        parse_resource_id(&MILESTONE_ID_PATTERN, self_href(self.links.as_ref()))
    }
}

/// An issue tracker version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Version {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<SelfLinks>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub version_type: Option<String>,
}

impl Version {
    /// Numeric ID parsed from the self link, or `0`.
    pub fn id(&self) -> i64 {
        parse_resource_id(&VERSION_ID_PATTERN, self_href(self.links.as_ref()))
    }
}

pub type Components = PaginatedResponse<Component>;
pub type Milestones = PaginatedResponse<Milestone>;
pub type Versions = PaginatedResponse<Version>;

macro_rules! tracker_service {
    ($(#[$meta:meta])* $service:ident, $item:ty, $page:ty, $segment:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $service<'a> {
            client: &'a BitbucketClient,
        }

        impl<'a> $service<'a> {
            pub(crate) fn new(client: &'a BitbucketClient) -> Self {
                Self { client }
            }

            #[doc = concat!("Lists the ", $segment, " of a repository's issue tracker.")]
            pub async fn list(
                &self,
                owner: &str,
                repo_slug: &str,
                opts: QueryOpts<'_>,
            ) -> Result<ApiResponse<$page>> {
                let path = format!("/repositories/{}/{}/{}", owner, repo_slug, $segment);
                let url = self.client.request_url(&path, opts)?;
                self.client.get(&url).await
            }

            #[doc = concat!("Gets one of the ", $segment, " by numeric ID.")]
            pub async fn get(
                &self,
                owner: &str,
                repo_slug: &str,
                id: i64,
                opts: QueryOpts<'_>,
            ) -> Result<ApiResponse<$item>> {
                let path = format!("/repositories/{}/{}/{}/{}", owner, repo_slug, $segment, id);
                let url = self.client.request_url(&path, opts)?;
                self.client.get(&url).await
            }
        }
    };
}

tracker_service!(
    /// Issue tracker components.
    ComponentsService,
    Component,
    Components,
    "components"
);
tracker_service!(
    /// Issue tracker milestones.
    MilestonesService,
    Milestone,
    Milestones,
    "milestones"
);
tracker_service!(
    /// Issue tracker versions.
    VersionsService,
    Version,
    Versions,
    "versions"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::tests::mock_client;

    #[test]
    fn test_ids_from_self_links() {
        let component: Component = serde_json::from_str(
            r#"{"name": "api", "links": {"self": {"href": "https://api.bitbucket.org/2.0/repositories/team/repo/components/42"}}}"#,
        )
        .unwrap();
        assert_eq!(component.id(), 42);

        let milestone: Milestone = serde_json::from_str(
            r#"{"links": {"self": {"href": "http://api.bitbucket.org/2.0/repositories/team/repo/milestones/7"}}}"#,
        )
        .unwrap();
        assert_eq!(milestone.id(), 7);

        assert_eq!(Version::default().id(), 0);
    }

    #[test]
    fn test_wrong_resource_link_yields_zero() {
        let version: Version = serde_json::from_str(
            r#"{"links": {"self": {"href": "https://api.bitbucket.org/2.0/repositories/team/repo/components/42"}}}"#,
        )
        .unwrap();
        assert_eq!(version.id(), 0);
    }

    #[tokio::test]
    async fn test_list_and_get() {
        let mut server = mockito::Server::new_async().await;
        let list = server
            .mock("GET", "/repositories/team/repo/milestones")
            .with_status(200)
            .with_body(
                r#"{"values": [{"name": "M1", "links": {"self": {"href": "https://api.bitbucket.org/2.0/repositories/team/repo/milestones/11"}}}]}"#,
            )
            .create_async()
            .await;
        let get = server
            .mock("GET", "/repositories/team/repo/versions/3")
            .with_status(200)
            .with_body(r#"{"name": "2.0"}"#)
            .create_async()
            .await;

        let client = mock_client(&server);
        let milestones = client
            .milestones()
            .list("team", "repo", &[])
            .await
            .unwrap();
        assert_eq!(milestones.values[0].id(), 11);

        let version = client.versions().get("team", "repo", 3, &[]).await.unwrap();
        assert_eq!(version.name.as_deref(), Some("2.0"));

        list.assert_async().await;
        get.assert_async().await;
    }

    #[tokio::test]
    async fn test_components_list() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repositories/team/repo/components")
            .with_status(200)
            .with_body(r#"{"values": [{"name": "core"}, {"name": "ui"}]}"#)
            .create_async()
            .await;

        let client = mock_client(&server);
        let components = client
            .components()
            .list("team", "repo", &[])
            .await
            .unwrap();
        assert_eq!(components.len(), 2);
    }
}
