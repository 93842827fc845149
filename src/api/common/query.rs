//
//  bitbucket-cloud
//  api/common/query.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Query-parameter merging for options structs.
//!
//! Most list and get endpoints accept one or more *options structs*: plain
//! `Serialize` types whose fields become URL query parameters. This module
//! turns any number of them into a single encoded query string.
//!
//! # Overview
//!
//! - [`QueryOptions`] is implemented for every `Serialize` type
//! - [`add_query_params`] merges options into a URL
//! - [`ListOpts`], [`FilterSortOpts`], [`PartialRespOpts`] and [`GenericOpts`]
//!   cover the parameters Bitbucket supports on most collections
//!
//! # Example
//!
//! ```rust
//! use bitbucket_cloud::api::common::{add_query_params, FilterSortOpts, ListOpts};
//!
//! let list = ListOpts { page: Some(2), pagelen: Some(5) };
//! let filter = FilterSortOpts {
//!     q: Some("state = \"OPEN\"".to_string()),
//!     sort: Some("-updated_on".to_string()),
//! };
//!
//! let url = add_query_params(
//!     "https://api.bitbucket.org/2.0/repositories/team/repo/pullrequests",
//!     &[&list, &filter],
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     url,
//!     "https://api.bitbucket.org/2.0/repositories/team/repo/pullrequests\
//!      ?page=2&pagelen=5&q=state+%3D+%22OPEN%22&sort=-updated_on"
//! );
//! ```
//!
//! # Notes
//!
//! - Later options overwrite earlier ones key by key
//! - `None` fields and empty strings are skipped
//! - Keys are emitted in sorted order so the output is deterministic

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::{ApiError, Result};

/// A value that can contribute query parameters to a request URL.
///
/// Every type implementing [`Serialize`] gets this trait for free. The value
/// must serialize to a map (a struct or a map type); anything else yields
/// [`ApiError::Query`].
pub trait QueryOptions {
    /// Returns the query parameters this value contributes, in field order.
    fn query_pairs(&self) -> Result<Vec<(String, String)>>;
}

impl<T: Serialize + ?Sized> QueryOptions for T {
    fn query_pairs(&self) -> Result<Vec<(String, String)>> {
        let value = serde_json::to_value(self)?;
        let map = match value {
            Value::Object(map) => map,
            Value::Null => return Ok(Vec::new()),
            other => {
                return Err(ApiError::Query(format!(
                    "options must serialize to a map, got {}",
                    json_type_name(&other)
                )))
            }
        };

        let mut pairs = Vec::new();
        flatten_into(&mut pairs, map)?;
        Ok(pairs)
    }
}

fn flatten_into(pairs: &mut Vec<(String, String)>, map: serde_json::Map<String, Value>) -> Result<()> {
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::String(s) if s.is_empty() => {}
            Value::String(s) => pairs.push((key, s)),
            Value::Bool(b) => pairs.push((key, b.to_string())),
            Value::Number(n) => pairs.push((key, n.to_string())),
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::Null => {}
                        Value::String(s) => pairs.push((key.clone(), s)),
                        Value::Bool(b) => pairs.push((key.clone(), b.to_string())),
                        Value::Number(n) => pairs.push((key.clone(), n.to_string())),
                        other => {
                            return Err(ApiError::Query(format!(
                                "unsupported {} inside list parameter '{}'",
                                json_type_name(&other),
                                key
                            )))
                        }
                    }
                }
            }
            // Nested structs contribute their own fields at the top level.
            Value::Object(inner) => flatten_into(pairs, inner)?,
        }
    }
    Ok(())
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A list of options values, as accepted by every service method.
///
/// Pass `&[]` for none, or `&[&list_opts, &filter_opts]`.
pub type QueryOpts<'a> = &'a [&'a (dyn QueryOptions + Sync)];

/// Merges `opts` into the query string of `url`.
///
/// Query parameters already present on `url` form the lowest layer; each
/// options value then overwrites the keys it sets. The result is encoded as
/// `application/x-www-form-urlencoded` with keys in sorted order.
///
/// # Parameters
///
/// * `url` - An absolute URL
/// * `opts` - Options values, applied in order
///
/// # Errors
///
/// Returns [`ApiError::Url`] when `url` cannot be parsed and
/// [`ApiError::Query`] when an options value is not map-shaped.
pub fn add_query_params(url: &str, opts: QueryOpts<'_>) -> Result<String> {
    if opts.is_empty() {
        return Ok(url.to_string());
    }

    let mut parsed = Url::parse(url)?;

    let mut merged: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in parsed.query_pairs() {
        merged
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }

    for opt in opts {
        let mut layer: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, value) in opt.query_pairs()? {
            layer.entry(key).or_default().push(value);
        }
        merged.extend(layer);
    }

    if merged.is_empty() {
        parsed.set_query(None);
        return Ok(parsed.to_string());
    }

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, values) in &merged {
        for value in values {
            serializer.append_pair(key, value);
        }
    }
    let query = serializer.finish();
    parsed.set_query(Some(&query));

    Ok(parsed.to_string())
}

/// Pagination parameters supported by every list endpoint.
///
/// Bitbucket accepts a `pagelen` between 10 and 100 on most collections;
/// some endpoints use a different range.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListOpts {
    /// Page of results to retrieve (1-based).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Number of results per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagelen: Option<u32>,
}

/// Filtering and sorting using Bitbucket's query language.
///
/// `q` holds the raw, unencoded BBQL expression such as
/// `state = "OPEN" AND author.nickname = "jane"`. Prefix a `sort` field with
/// `-` to reverse the order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSortOpts {
    /// Raw filter expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    /// Field to sort by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

/// Partial response selector, e.g. `owner.username,uuid,links.self.href`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialRespOpts {
    /// Comma separated field list; prefix with `+` or `-` to add or remove.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

/// All generic collection parameters in one value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenericOpts {
    #[serde(flatten)]
    pub list: ListOpts,

    #[serde(flatten)]
    pub filter: FilterSortOpts,

    #[serde(flatten)]
    pub partial: PartialRespOpts,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Serialize)]
    struct RoleOpts {
        role: &'static str,
    }

    #[derive(Serialize)]
    struct EmbeddedOpts {
        #[serde(flatten)]
        list: ListOpts,
        role: Option<String>,
    }

    #[test]
    fn test_no_options_returns_url_unchanged() {
        let url = "https://api.bitbucket.org/2.0/repositories?b=2&a=1";
        assert_eq!(add_query_params(url, &[]).unwrap(), url);
    }

    #[test]
    fn test_merges_and_encodes_sorted() {
        let list = ListOpts {
            page: Some(2),
            pagelen: Some(5),
        };
        let filter = FilterSortOpts {
            q: Some(r#"source.repository.full_name != "main/repo" AND state = "OPEN""#.to_string()),
            sort: Some("updated_on".to_string()),
        };

        let url = add_query_params(
            "https://api.bitbucket.org/2.0/repositories/bOrg/bRepo",
            &[&list, &filter],
        )
        .unwrap();

        assert_eq!(
            url,
            "https://api.bitbucket.org/2.0/repositories/bOrg/bRepo?page=2&pagelen=5\
             &q=source.repository.full_name+%21%3D+%22main%2Frepo%22+AND+state+%3D+%22OPEN%22\
             &sort=updated_on"
        );
    }

    #[test]
    fn test_later_options_overwrite_earlier_keys() {
        let first = ListOpts {
            page: Some(1),
            pagelen: Some(10),
        };
        let second = ListOpts {
            page: Some(4),
            pagelen: None,
        };

        let url = add_query_params("https://example.com/items", &[&first, &second]).unwrap();
        assert_eq!(url, "https://example.com/items?page=4&pagelen=10");
    }

    #[test]
    fn test_existing_query_is_lowest_layer() {
        let opts = RoleOpts { role: "owner" };
        let url = add_query_params("https://example.com/items?role=member&page=3", &[&opts]).unwrap();
        assert_eq!(url, "https://example.com/items?page=3&role=owner");
    }

    #[test]
    fn test_skips_none_and_empty_strings() {
        let filter = FilterSortOpts {
            q: Some(String::new()),
            sort: None,
        };
        let url = add_query_params("https://example.com/items", &[&filter]).unwrap();
        assert_eq!(url, "https://example.com/items");
    }

    #[test]
    fn test_flattened_structs_contribute_fields() {
        let opts = EmbeddedOpts {
            list: ListOpts {
                page: None,
                pagelen: Some(50),
            },
            role: Some("admin".to_string()),
        };
        let url = add_query_params("https://example.com/teams", &[&opts]).unwrap();
        assert_eq!(url, "https://example.com/teams?pagelen=50&role=admin");
    }

    #[test]
    fn test_generic_opts_flatten() {
        let opts = GenericOpts {
            list: ListOpts {
                page: Some(1),
                pagelen: None,
            },
            filter: FilterSortOpts::default(),
            partial: PartialRespOpts {
                fields: Some("values.uuid".to_string()),
            },
        };
        let url = add_query_params("https://example.com/r", &[&opts]).unwrap();
        assert_eq!(url, "https://example.com/r?fields=values.uuid&page=1");
    }

    #[test]
    fn test_map_options_and_bools() {
        let mut map = HashMap::new();
        map.insert("renames", true);
        let url = add_query_params("https://example.com/h", &[&map]).unwrap();
        assert_eq!(url, "https://example.com/h?renames=true");
    }

    #[test]
    fn test_list_values_repeat_key() {
        #[derive(Serialize)]
        struct Multi {
            state: Vec<&'static str>,
        }
        let opts = Multi {
            state: vec!["OPEN", "MERGED"],
        };
        let url = add_query_params("https://example.com/prs", &[&opts]).unwrap();
        assert_eq!(url, "https://example.com/prs?state=OPEN&state=MERGED");
    }

    #[test]
    fn test_malformed_url_is_parse_error() {
        let list = ListOpts::default();
        let err = add_query_params("not a url", &[&list]).unwrap_err();
        assert!(matches!(err, ApiError::Url(_)));
    }

    #[test]
    fn test_non_map_options_rejected() {
        let err = add_query_params("https://example.com", &[&"page=1"]).unwrap_err();
        assert!(matches!(err, ApiError::Query(_)));
    }
}
