//! Collection query parameters.

use serde_json::Value;

use crate::types::Page;

/// Sort order used for collection listings: newest upload first.
pub const ORDER_NEWEST_FIRST: &str = "-uploadDate";

/// Largest `limit` the collection endpoint accepts.
pub const MAX_LIMIT: u32 = 1000;

/// A GET against the collection endpoint.
///
/// # Example
///
/// ```
/// use lncld_core::{CollectionQuery, Page};
/// use serde_json::json;
///
/// let query = CollectionQuery::page(json!({"genre": "scifi"}), Page::new(2));
/// assert_eq!(query.limit(), 50);
/// assert_eq!(query.skip(), 100);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionQuery {
    filter: Option<Value>,
    limit: u32,
    skip: u64,
}

impl CollectionQuery {
    /// One page of records matching `filter`, newest first.
    pub fn page(filter: Value, page: Page) -> Self {
        Self {
            filter: Some(filter),
            limit: page.limit(),
            skip: page.skip(),
        }
    }

    /// The newest `limit` records, unfiltered. `limit` is clamped to
    /// `1..=MAX_LIMIT`.
    pub fn latest(limit: u32) -> Self {
        Self {
            filter: None,
            limit: limit.clamp(1, MAX_LIMIT),
            skip: 0,
        }
    }

    pub fn filter(&self) -> Option<&Value> {
        self.filter.as_ref()
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn skip(&self) -> u64 {
        self.skip
    }

    /// Query string parameters, in the order they are sent.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(4);
        if let Some(filter) = &self.filter {
            params.push(("where", filter.to_string()));
        }
        params.push(("order", ORDER_NEWEST_FIRST.to_string()));
        params.push(("limit", self.limit.to_string()));
        params.push(("skip", self.skip.to_string()));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_params() {
        let query = CollectionQuery::page(json!({"id": "x"}), Page::new(2));
        assert_eq!(
            query.params(),
            vec![
                ("where", r#"{"id":"x"}"#.to_string()),
                ("order", "-uploadDate".to_string()),
                ("limit", "50".to_string()),
                ("skip", "100".to_string()),
            ]
        );
    }

    #[test]
    fn latest_clamps_limit() {
        assert_eq!(CollectionQuery::latest(0).limit(), 1);
        assert_eq!(CollectionQuery::latest(5000).limit(), MAX_LIMIT);
        let params = CollectionQuery::latest(10).params();
        assert!(params.iter().all(|(k, _)| *k != "where"));
    }
}
