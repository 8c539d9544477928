//! Full-text search query building and rank-order restoration.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::batch::{BatchOutcome, OperationFailure, Outcome, into_record};
use crate::error::FailureKind;
use crate::record::{Record, kind_of};
use crate::types::{ObjectId, Page};

/// Sort order for search results: relevance. The search endpoint cannot
/// combine this with a date order.
pub const ORDER_BY_SCORE: &str = "score";

/// A field-scoped full-text query over `title` and `subtitle`.
///
/// A single-word keyword is quoted to request an exact phrase match;
/// multi-word keywords are passed through and matched token by token.
/// Unquoted keywords are interpolated raw, so they may use query syntax.
///
/// # Example
///
/// ```
/// use lncld_core::SearchQuery;
///
/// let query = SearchQuery::new("  hello ", None).unwrap();
/// assert_eq!(query.to_query_string(), r#"((title: "hello") OR (subtitle: "hello"))"#);
///
/// let query = SearchQuery::new("hello world", Some("genre:scifi")).unwrap();
/// assert_eq!(
///     query.to_query_string(),
///     "((title: hello world) OR (subtitle: hello world)) AND genre:scifi"
/// );
///
/// assert!(SearchQuery::new("   ", None).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    keyword: String,
    genre_filter: Option<String>,
}

impl SearchQuery {
    /// Build a query, or `None` when the keyword is blank.
    pub fn new(keyword: &str, genre_filter: Option<&str>) -> Option<Self> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return None;
        }

        let keyword = if keyword.contains(char::is_whitespace) {
            keyword.to_string()
        } else {
            quote(keyword)
        };

        let genre_filter = genre_filter
            .filter(|g| !g.trim().is_empty())
            .map(str::to_string);

        Some(Self {
            keyword,
            genre_filter,
        })
    }

    /// Returns the keyword exactly as it is interpolated into the query.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn genre_filter(&self) -> Option<&str> {
        self.genre_filter.as_deref()
    }

    pub fn to_query_string(&self) -> String {
        let q = format!(
            "((title: {k}) OR (subtitle: {k}))",
            k = self.keyword
        );
        match &self.genre_filter {
            Some(genre) => format!("{} AND {}", q, genre),
            None => q,
        }
    }

    /// Query string parameters for one page of hits.
    pub fn params(&self, page: Page) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.to_query_string()),
            ("limit", page.limit().to_string()),
            ("skip", page.skip().to_string()),
            ("order", ORDER_BY_SCORE.to_string()),
        ]
    }
}

fn quote(keyword: &str) -> String {
    let mut quoted = String::with_capacity(keyword.len() + 2);
    quoted.push('"');
    for c in keyword.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Read the object ids of search hits, in ranked order.
pub fn hit_object_ids(hits: Vec<Value>) -> Result<Vec<ObjectId>, FailureKind> {
    hits.into_iter()
        .enumerate()
        .map(|(rank, hit)| {
            let id = hit.get("objectId").and_then(Value::as_str);
            match id.map(ObjectId::new) {
                Some(Ok(id)) => Ok(id),
                Some(Err(e)) => Err(FailureKind::Malformed {
                    reason: format!("hit {}: {}", rank, e),
                    body: hit.to_string(),
                }),
                None => Err(FailureKind::Malformed {
                    reason: format!("hit {} has no string `objectId` ({})", rank, kind_of(&hit)),
                    body: hit.to_string(),
                }),
            }
        })
        .collect()
}

/// Line rehydrated records up with the ranked ids they were fetched for.
///
/// Records are matched by their `objectId`, never by response position.
/// A ranked id with no matching record gets the failure reported at its
/// own position, or [`OperationFailure::NotFound`] if there was none.
pub fn restore_rank_order(
    ranked: &[ObjectId],
    outcomes: Vec<BatchOutcome>,
) -> Vec<Outcome<Record>> {
    let mut by_id: HashMap<String, Record> = HashMap::with_capacity(outcomes.len());
    let mut failures: Vec<Option<OperationFailure>> = Vec::with_capacity(outcomes.len());

    for outcome in outcomes {
        match outcome.and_then(into_record) {
            Ok(record) => {
                match record.object_id().map(str::to_string) {
                    Some(id) => {
                        by_id.insert(id, record);
                        failures.push(None);
                    }
                    None => failures.push(Some(OperationFailure::Malformed {
                        reason: "record has no `objectId`".to_string(),
                        raw: record.into_value(),
                    })),
                }
            }
            Err(failure) => failures.push(Some(failure)),
        }
    }

    ranked
        .iter()
        .enumerate()
        .map(|(rank, id)| {
            by_id.get(id.as_str()).cloned().ok_or_else(|| {
                failures
                    .get_mut(rank)
                    .and_then(Option::take)
                    .unwrap_or(OperationFailure::NotFound)
            })
        })
        .collect()
}

/// Search results, one outcome per ranked hit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub records: Vec<Outcome<Record>>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Iterate over the records that were rehydrated, in ranked order.
    pub fn found(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().filter_map(|r| r.as_ref().ok())
    }
}

/// Serialized form: records in ranked order, `null` where rehydration failed.
impl Serialize for SearchResults {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let records: Vec<Option<&Record>> =
            self.records.iter().map(|r| r.as_ref().ok()).collect();
        let mut state = serializer.serialize_struct("SearchResults", 1)?;
        state.serialize_field("records", &records)?;
        state.end()
    }
}
