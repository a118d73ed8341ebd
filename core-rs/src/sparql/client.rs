//! HttpSparqlClient - SPARQL 1.1 protocol over HTTP
//!
//! Sends queries as `application/x-www-form-urlencoded` POST bodies and asks
//! for `application/sparql-results+json`.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::{debug, warn};

use super::executor::QueryExecutor;
use super::query::SparqlQuery;
use super::results::SparqlResults;
use crate::errors::{Result, UnitsError};

pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Longest upstream error body kept in an error message
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Clone)]
pub struct HttpSparqlClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSparqlClient {
    /// Create a client for `endpoint` with a per-request timeout
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use units_core::sparql::HttpSparqlClient;
    ///
    /// let client = HttpSparqlClient::new("http://localhost:3030/vocab/sparql", Duration::from_secs(30)).unwrap();
    /// assert_eq!(client.endpoint(), "http://localhost:3030/vocab/sparql");
    /// ```
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("units-rs/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl QueryExecutor for HttpSparqlClient {
    async fn select(&self, query: &SparqlQuery) -> Result<SparqlResults> {
        debug!(endpoint = %self.endpoint, query = query.as_str(), "Executing SPARQL query");

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .form(&[("query", query.as_str())])
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint = %self.endpoint, error = %e, "SPARQL request failed");
                UnitsError::UpstreamTransport(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(endpoint = %self.endpoint, status = status.as_u16(), "SPARQL endpoint returned an error");
            let mut body = body;
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(UnitsError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        SparqlResults::from_json(&body)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}
