//
//  bitbucket-cloud
//  api/common/resource_id.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Recovering numeric IDs from `self` links.
//!
//! A few Bitbucket resources (components, milestones, versions) do not carry
//! their numeric ID in the payload, only inside `links.self.href`. The
//! patterns below pull it back out.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches `.../repositories/{owner}/{repo}/components/{id}`.
pub static COMPONENT_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://.*/2\.0/repositories/.*/.*/components/(\d+)").expect("valid component regex")
});

/// Matches `.../repositories/{owner}/{repo}/milestones/{id}`.
pub static MILESTONE_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://.*/2\.0/repositories/.*/.*/milestones/(\d+)").expect("valid milestone regex")
});

/// Matches `.../repositories/{owner}/{repo}/versions/{id}`.
pub static VERSION_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://.*/2\.0/repositories/.*/.*/versions/(\d+)").expect("valid version regex")
});

/// Extracts a numeric ID from `self_link` using the first capture group of
/// `pattern`.
///
/// Returns `0` when the pattern does not match, has no capture group, or
/// the captured text is not a valid integer.
///
/// # Example
///
/// ```rust
/// use bitbucket_cloud::api::common::{parse_resource_id, VERSION_ID_PATTERN};
///
/// let id = parse_resource_id(
///     &VERSION_ID_PATTERN,
///     "https://api.bitbucket.org/2.0/repositories/user/repo/versions/354035",
/// );
/// assert_eq!(id, 354035);
/// ```
pub fn parse_resource_id(pattern: &Regex, self_link: &str) -> i64 {
    pattern
        .captures(self_link)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .unwrap_or_else(|| {
            tracing::warn!("no resource id in self link {:?}", self_link);
            0
        })
}

/// Like [`parse_resource_id`] but compiles `expression` first.
///
/// An invalid expression is treated as a non-match and yields `0`.
pub fn parse_resource_id_str(expression: &str, self_link: &str) -> i64 {
    match Regex::new(expression) {
        Ok(pattern) => parse_resource_id(&pattern, self_link),
        Err(e) => {
            tracing::warn!("invalid resource id pattern {:?}: {}", expression, e);
            0
        }
    }
}
