//
//  bitbucket-cloud
//  api/cloud/watchers.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use crate::api::client::BitbucketClient;
use crate::api::common::{ApiResponse, QueryOpts, Result, Users};

/// Users watching a repository.
#[derive(Debug, Clone, Copy)]
pub struct WatchersService<'a> {
    client: &'a BitbucketClient,
}

impl<'a> WatchersService<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        owner: &str,
        repo_slug: &str,
        opts: QueryOpts<'_>,
    ) -> Result<ApiResponse<Users>> {
        let path = format!("/repositories/{}/{}/watchers", owner, repo_slug);
        let url = self.client.request_url(&path, opts)?;
        self.client.get(&url).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::client::tests::mock_client;
    use crate::api::common::ListOpts;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_list_watchers_page() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repositories/team/repo/watchers")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "2".into()),
                Matcher::UrlEncoded("pagelen".into(), "50".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"values": [{"display_name": "Alice"}], "page": 2, "pagelen": 50, "previous": "https://api.bitbucket.org/2.0/repositories/team/repo/watchers?page=1"}"#)
            .create_async()
            .await;

        let client = mock_client(&server);
        let page = ListOpts {
            page: Some(2),
            pagelen: Some(50),
        };
        let watchers = client
            .watchers()
            .list("team", "repo", &[&page])
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(watchers.has_previous());
        assert!(!watchers.has_next());
        assert_eq!(watchers.values[0].name(), "Alice");
    }
}
