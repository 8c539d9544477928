//! The table trait.

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::Result;
use crate::batch::{BatchOutcome, Operation, Outcome, first_result};
use crate::query::CollectionQuery;
use crate::record::{Record, RecordPage};
use crate::search::{SearchQuery, SearchResults, restore_rank_order};
use crate::types::{Endpoints, ObjectId, Page};

/// A partial update for one object.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub object_id: ObjectId,
    pub body: Value,
}

impl Patch {
    pub fn new(object_id: ObjectId, body: Value) -> Self {
        Self { object_id, body }
    }
}

/// Read, write and search access to a single remote table.
///
/// Implementations supply the three network primitives. The derived
/// operations are provided on top of them, so every implementation
/// shares the same batching, unwrapping and ordering rules.
#[async_trait]
pub trait Table: Send + Sync {
    /// Returns the endpoints this table talks to.
    fn endpoints(&self) -> &Endpoints;

    /// Send `operations` as one batch.
    ///
    /// The result has exactly one outcome per operation, in the same
    /// order. Per-item failures are outcomes; only whole-call failures
    /// are errors.
    async fn execute_batch(&self, operations: &[Operation]) -> Result<Vec<BatchOutcome>>;

    /// Run a single GET against the collection endpoint.
    async fn query_collection(&self, query: &CollectionQuery) -> Result<RecordPage>;

    /// Run a search and return the object ids of the hits, in ranked order.
    async fn search_object_ids(&self, query: &SearchQuery, page: Page) -> Result<Vec<ObjectId>>;

    /// One page of records matching `filter`, newest upload first.
    async fn query_by_where(&self, filter: &Value, page: Page) -> Result<RecordPage> {
        self.query_collection(&CollectionQuery::page(filter.clone(), page))
            .await
    }

    /// The newest `limit` records (at most 1000).
    async fn latest(&self, limit: u32) -> Result<RecordPage> {
        self.query_collection(&CollectionQuery::latest(limit)).await
    }

    /// The record whose application-level `id` equals `id`, if any.
    async fn get_by_id(&self, id: &Value) -> Result<Option<Record>> {
        let page = self
            .query_by_where(&json!({ "id": id }), Page::FIRST)
            .await?;
        Ok(page.records.into_iter().next())
    }

    /// Fetch records by application-level `id`, one filtered read each.
    ///
    /// Each outcome is the single matching record, or a failure marker
    /// when the read failed or matched nothing.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn query_by_ids(&self, ids: &[Value]) -> Result<Vec<Outcome<Record>>> {
        let operations: Vec<Operation> =
            ids.iter().cloned().map(Operation::get_by_app_id).collect();
        let outcomes = self.execute_batch(&operations).await?;
        Ok(outcomes.into_iter().map(first_result).collect())
    }

    /// Fetch records directly by object id. Outcomes are returned as the
    /// server sent them.
    #[instrument(skip(self, object_ids), fields(count = object_ids.len()))]
    async fn query_by_object_ids(&self, object_ids: &[ObjectId]) -> Result<Vec<BatchOutcome>> {
        let operations: Vec<Operation> = object_ids
            .iter()
            .cloned()
            .map(Operation::GetById)
            .collect();
        self.execute_batch(&operations).await
    }

    /// Apply each patch to its object.
    #[instrument(skip(self, patches), fields(count = patches.len()))]
    async fn batch_update(&self, patches: &[Patch]) -> Result<Vec<BatchOutcome>> {
        let operations: Vec<Operation> = patches
            .iter()
            .map(|p| Operation::Update(p.object_id.clone(), p.body.clone()))
            .collect();
        self.execute_batch(&operations).await
    }

    /// Create one object per item.
    #[instrument(skip(self, items), fields(count = items.len()))]
    async fn batch_create(&self, items: &[Value]) -> Result<Vec<BatchOutcome>> {
        let operations: Vec<Operation> = items.iter().cloned().map(Operation::Create).collect();
        self.execute_batch(&operations).await
    }

    /// Full-text search over `title` and `subtitle`, optionally narrowed
    /// by a genre query fragment.
    ///
    /// Runs in two sequential stages: the search endpoint ranks hits and
    /// returns their ids, then one batch rehydrates the full records. The
    /// result follows the ranked order. A blank keyword returns nothing
    /// without touching the network.
    #[instrument(skip(self))]
    async fn full_text_search(
        &self,
        keyword: &str,
        genre_filter: Option<&str>,
        page: Page,
    ) -> Result<SearchResults> {
        let Some(query) = SearchQuery::new(keyword, genre_filter) else {
            debug!("Blank keyword, skipping search");
            return Ok(SearchResults::default());
        };
        debug!(q = %query.to_query_string(), "Full-text search");

        let ranked = self.search_object_ids(&query, page).await?;
        if ranked.is_empty() {
            return Ok(SearchResults::default());
        }

        let outcomes = self.query_by_object_ids(&ranked).await?;
        Ok(SearchResults {
            records: restore_rank_order(&ranked, outcomes),
        })
    }
}
