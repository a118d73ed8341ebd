//! Query execution seam
//!
//! The concept service never talks to the network itself. It is handed a
//! [`QueryExecutor`] and receives already-fetched result sets. Implementations:
//! - [`HttpSparqlClient`](super::client::HttpSparqlClient) (remote endpoint)
//! - [`LocalDataset`](super::local::LocalDataset) (in-memory store)

use async_trait::async_trait;

use super::query::SparqlQuery;
use super::results::SparqlResults;
use crate::errors::Result;

/// Executes SELECT queries and returns SPARQL JSON result sets
///
/// Failures (transport, status, payload) must come back as errors, never as
/// an empty result set.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn select(&self, query: &SparqlQuery) -> Result<SparqlResults>;

    /// Short description for logs (endpoint URL, dataset path)
    fn describe(&self) -> String;
}
