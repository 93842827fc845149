//
//  bitbucket-cloud
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination envelope for Bitbucket Cloud list responses.
//!
//! Every list endpoint of the Bitbucket Cloud API wraps its items in the same
//! envelope: the current `page`, the `pagelen`, the total `size`, and absolute
//! `next` / `previous` links.
//!
//! # Example
//!
//! ```rust
//! use bitbucket_cloud::api::common::PaginatedResponse;
//!
//! let json = r#"{
//!     "values": [1, 2, 3],
//!     "page": 1,
//!     "pagelen": 3,
//!     "size": 7,
//!     "next": "https://api.bitbucket.org/2.0/repositories?page=2"
//! }"#;
//!
//! let page: PaginatedResponse<u32> = serde_json::from_str(json).unwrap();
//! assert!(page.has_next());
//! assert_eq!(page.len(), 3);
//! ```
//!
//! # Notes
//!
//! - The library fetches exactly one page per call. A `next` link can be passed
//!   straight to [`BitbucketClient::get`](crate::api::BitbucketClient::get).
//! - Some endpoints omit `size` and `page`; those fields are optional.

use serde::{Deserialize, Serialize};

/// A single page of results from a Bitbucket Cloud list endpoint.
///
/// # Type Parameters
///
/// * `T` - The item type contained in `values`
///
/// # Fields
///
/// * `values` - Items on this page (empty when the API omits the field)
/// * `page` - 1-based page number
/// * `pagelen` - Number of items requested per page
/// * `size` - Total number of items across all pages
/// * `next` - Absolute URL of the next page
/// * `previous` - Absolute URL of the previous page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,

    /// 1-based page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Requested page length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagelen: Option<u32>,

    /// Total number of items, when the endpoint reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Link to the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,

    /// Link to the previous page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
}

impl<T> Default for PaginatedResponse<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            page: None,
            pagelen: None,
            size: None,
            next: None,
            previous: None,
        }
    }
}

impl<T> PaginatedResponse<T> {
    /// Returns `true` when the API reported a next page.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns `true` when the API reported a previous page.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Absolute URL of the next page, if any.
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref()
    }

    /// Absolute URL of the previous page, if any.
    pub fn previous_url(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when this page holds no items.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T> IntoIterator for PaginatedResponse<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_envelope() {
        let json = r#"{
            "values": ["a", "b"],
            "page": 2,
            "pagelen": 2,
            "size": 6,
            "next": "https://api.bitbucket.org/2.0/x?page=3",
            "previous": "https://api.bitbucket.org/2.0/x?page=1"
        }"#;

        let page: PaginatedResponse<String> = serde_json::from_str(json).unwrap();
        assert_eq!(page.values, vec!["a", "b"]);
        assert_eq!(page.page, Some(2));
        assert_eq!(page.size, Some(6));
        assert!(page.has_next());
        assert!(page.has_previous());
        assert_eq!(page.next_url(), Some("https://api.bitbucket.org/2.0/x?page=3"));
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let page: PaginatedResponse<u8> = serde_json::from_str("{}").unwrap();
        assert!(page.is_empty());
        assert!(!page.has_next());
        assert!(page.previous_url().is_none());
    }

    #[test]
    fn test_into_iter_yields_values() {
        let page = PaginatedResponse {
            values: vec![1, 2, 3],
            ..Default::default()
        };
        let collected: Vec<i32> = page.into_iter().collect();
        assert_eq!(collected, vec![1, 2, 3]);
    }
}
