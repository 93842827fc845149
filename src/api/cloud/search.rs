//
//  bitbucket-cloud
//  api/cloud/search.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Code search result types, shared by the team and user search endpoints.

use serde::{Deserialize, Serialize};

use crate::api::common::{Link, PaginatedResponse};

/// Query for `/search/code`.
///
/// `search_query` uses Bitbucket's code search syntax, e.g.
/// `"fn main" lang:rust repo:tools`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeSearchOpts {
    pub search_query: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagelen: Option<u32>,
}

impl CodeSearchOpts {
    pub fn new(search_query: impl Into<String>) -> Self {
        Self {
            search_query: search_query.into(),
            ..Default::default()
        }
    }
}

/// One file matching a code search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCodeResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_match_count: Option<i64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content_matches: Vec<SearchContentMatch>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path_matches: Vec<SearchSegment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<SearchCodeFile>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub result_type: Option<String>,
}

/// A block of matching lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchContentMatch {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<SearchLine>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<i64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<SearchSegment>,
}

/// A run of text; `matched` marks the parts that hit the query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSegment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub matched: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCodeFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<SearchCodeFileLinks>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCodeFileLinks {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,
}

/// Page of code search results.
///
/// `query_substituted` is not part of the envelope; read it from the raw
/// body when needed.
pub type SearchCodeResults = PaginatedResponse<SearchCodeResult>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opts_serialize_to_query_keys() {
        let mut opts = CodeSearchOpts::new("fn main");
        opts.pagelen = Some(5);

        let value = serde_json::to_value(&opts).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"search_query": "fn main", "pagelen": 5})
        );
    }

    #[test]
    fn test_decode_result() {
        let results: SearchCodeResults = serde_json::from_str(
            r#"{
                "size": 1,
                "values": [{
                    "type": "code_search_result",
                    "content_match_count": 1,
                    "content_matches": [{"lines": [{"line": 3, "segments": [{"text": "fn "}, {"text": "main", "match": true}]}]}],
                    "path_matches": [{"text": "src/main.rs"}],
                    "file": {"path": "src/main.rs", "type": "commit_file"}
                }]
            }"#,
        )
        .unwrap();

        let result = &results.values[0];
        let line = &result.content_matches[0].lines[0];
        assert_eq!(line.line, Some(3));
        assert_eq!(line.segments[1].matched, Some(true));
        assert_eq!(
            result.file.as_ref().and_then(|f| f.path.as_deref()),
            Some("src/main.rs")
        );
    }
}
