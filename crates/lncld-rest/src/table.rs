//! REST-backed table implementation.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use tracing::{debug, instrument, trace};

use lncld_core::batch::{BatchOutcome, BatchRequest, Operation, reconcile};
use lncld_core::error::{Error, FailureKind, InvalidInputError, RequestFailure};
use lncld_core::record::{Record, RecordPage};
use lncld_core::response::{parse_body, results};
use lncld_core::search::{SearchQuery, hit_object_ids};
use lncld_core::{CollectionQuery, Config, Endpoints, ObjectId, Page, Result, Table};

use crate::client::{RawResponse, RestClient};

/// A table reached over the REST API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct RestTable {
    config: Config,
    client: RestClient,
}

impl RestTable {
    /// Create a table client from configuration.
    ///
    /// # Errors
    ///
    /// Fails if a credential cannot be sent as a header value or the HTTP
    /// client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let client = RestClient::new(&config)?;
        Ok(Self { config, client })
    }

    /// Create a table client on top of an existing `reqwest` client, e.g. one
    /// with custom timeouts or proxies.
    pub fn with_http_client(config: Config, client: reqwest::Client) -> Result<Self> {
        let client = RestClient::with_client(client, &config)?;
        Ok(Self { config, client })
    }

    /// Returns the configuration this table was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[async_trait]
impl Table for RestTable {
    fn endpoints(&self) -> &Endpoints {
        self.config.endpoints()
    }

    #[instrument(skip(self, operations), fields(count = operations.len()))]
    async fn execute_batch(&self, operations: &[Operation]) -> Result<Vec<BatchOutcome>> {
        if operations.is_empty() {
            return Ok(Vec::new());
        }

        let request = BatchRequest::new(operations, self.endpoints());
        let headers = if request.has_writes() {
            RestClient::session_headers(self.config.require_session_token()?)?
        } else {
            HeaderMap::new()
        };

        let endpoint = self.endpoints().batch();
        let serialized =
            serde_json::to_string(&request).map_err(|e| InvalidInputError::Request {
                reason: e.to_string(),
            })?;
        debug!(writes = request.has_writes(), "Executing batch");
        trace!(request = %serialized, "batch request");

        let response = self
            .client
            .post(endpoint, serialized.clone(), headers)
            .await?;
        let status = response.status;
        let outcomes = parse_body(&response.body)
            .and_then(|body| reconcile(body, request.len()))
            .map_err(|kind| {
                Error::BatchRequestFailed(RequestFailure::new(endpoint, serialized, status, kind))
            })?;

        debug!(
            failed = outcomes.iter().filter(|o| o.is_err()).count(),
            "Batch reconciled"
        );
        Ok(outcomes)
    }

    #[instrument(skip(self, query), fields(skip = query.skip(), limit = query.limit()))]
    async fn query_collection(&self, query: &CollectionQuery) -> Result<RecordPage> {
        debug!(filter = ?query.filter(), "Querying collection");

        let response = self
            .client
            .get(self.endpoints().collection(), &query.params(), HeaderMap::new())
            .await?;

        let records = envelope_results(&response)
            .and_then(|items| {
                items
                    .into_iter()
                    .map(|item| {
                        Record::new(item).map_err(|e| FailureKind::Malformed {
                            reason: e.to_string(),
                            body: response.body.clone(),
                        })
                    })
                    .collect::<std::result::Result<Vec<_>, _>>()
            })
            .map_err(|kind| Error::QueryFailed(failure(&response, kind)))?;

        debug!(count = records.len(), "Query returned");
        Ok(RecordPage { records })
    }

    #[instrument(skip(self, query), fields(page = page.number()))]
    async fn search_object_ids(&self, query: &SearchQuery, page: Page) -> Result<Vec<ObjectId>> {
        let response = self
            .client
            .get(self.endpoints().search(), &query.params(page), HeaderMap::new())
            .await?;

        let ids = envelope_results(&response)
            .and_then(hit_object_ids)
            .map_err(|kind| Error::SearchFailed(failure(&response, kind)))?;

        debug!(hits = ids.len(), "Search returned");
        Ok(ids)
    }
}

fn envelope_results(
    response: &RawResponse,
) -> std::result::Result<Vec<serde_json::Value>, FailureKind> {
    parse_body(&response.body).and_then(results)
}

/// Describe a failed GET. The request is fully captured by its URL.
fn failure(response: &RawResponse, kind: FailureKind) -> RequestFailure {
    let (endpoint, request) = match response.url.split_once('?') {
        Some((endpoint, query)) => (endpoint.to_string(), query.to_string()),
        None => (response.url.clone(), String::new()),
    };
    RequestFailure::new(endpoint, request, response.status, kind)
}
