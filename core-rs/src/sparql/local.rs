//! LocalDataset - in-memory SPARQL evaluation with Oxigraph
//!
//! Loads a quad file (TriG or N-Quads) so the vocabulary graphs keep their
//! names and `FROM <graph>` clauses resolve the same way they do against
//! the remote endpoint. Solutions are converted into the SPARQL JSON model.

use async_trait::async_trait;
use oxigraph::io::RdfFormat;
use oxigraph::model::Term as RdfTerm;
use oxigraph::sparql::QueryResults;
use oxigraph::store::Store;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::executor::QueryExecutor;
use super::query::SparqlQuery;
use super::results::SparqlResults;
use crate::concepts::Term;
use crate::errors::{Result, UnitsError};

pub struct LocalDataset {
    store: Store,
    source: String,
}

impl LocalDataset {
    /// Load a dataset from a string in a quad format
    pub fn from_data(data: &str, format: RdfFormat, source: impl Into<String>) -> Result<Self> {
        if !matches!(format, RdfFormat::TriG | RdfFormat::NQuads) {
            return Err(UnitsError::Config(format!(
                "Local datasets must be TriG or N-Quads, got {}",
                format.name()
            )));
        }

        let store = Store::new().map_err(|e| UnitsError::LocalStore(e.to_string()))?;
        store
            .load_from_reader(format, data.as_bytes())
            .map_err(|e| UnitsError::LocalStore(e.to_string()))?;

        let source = source.into();
        info!(source = %source, quads = store.len().unwrap_or(0), "Loaded local dataset");
        Ok(Self { store, source })
    }

    /// Load a `.trig` or `.nq` file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = match path.extension().and_then(|ext| ext.to_str()) {
            Some("trig") => RdfFormat::TriG,
            Some("nq") | Some("nquads") => RdfFormat::NQuads,
            _ => {
                return Err(UnitsError::Config(format!(
                    "Unsupported local dataset extension: {} (expected .trig or .nq)",
                    path.display()
                )))
            }
        };

        if !path.exists() {
            return Err(UnitsError::Config(format!(
                "Local dataset not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        Self::from_data(&content, format, path.display().to_string())
    }
}

fn to_term(term: &RdfTerm) -> Term {
    match term {
        RdfTerm::NamedNode(node) => Term::plain(node.as_str()),
        RdfTerm::BlankNode(node) => Term::plain(node.as_str()),
        RdfTerm::Literal(literal) => Term {
            value: literal.value().to_string(),
            language: literal.language().map(str::to_string),
        },
        #[allow(unreachable_patterns)]
        other => Term::plain(other.to_string()),
    }
}

/// Evaluate a SELECT query against the store, synchronously
fn evaluate(store: &Store, query: &str) -> Result<SparqlResults> {
    let results = store
        .query(query)
        .map_err(|e| UnitsError::LocalStore(e.to_string()))?;

    match results {
        QueryResults::Solutions(solutions) => {
            let vars: Vec<String> = solutions
                .variables()
                .iter()
                .map(|var| var.as_str().to_string())
                .collect();

            let mut rows = Vec::new();
            for solution in solutions {
                let solution = solution.map_err(|e| UnitsError::LocalStore(e.to_string()))?;
                let row: HashMap<String, Term> = solution
                    .iter()
                    .map(|(var, term)| (var.as_str().to_string(), to_term(term)))
                    .collect();
                rows.push(row);
            }

            let var_refs: Vec<&str> = vars.iter().map(String::as_str).collect();
            Ok(SparqlResults::from_rows(&var_refs, rows))
        }
        QueryResults::Boolean(_) | QueryResults::Graph(_) => Err(UnitsError::MalformedResponse(
            "only SELECT queries are supported".to_string(),
        )),
    }
}

#[async_trait]
impl QueryExecutor for LocalDataset {
    async fn select(&self, query: &SparqlQuery) -> Result<SparqlResults> {
        debug!(source = %self.source, query = query.as_str(), "Evaluating SPARQL query locally");

        // Store clones share one dataset.
        let store = self.store.clone();
        let query = query.as_str().to_string();
        tokio::task::spawn_blocking(move || evaluate(&store, &query))
            .await
            .map_err(|e| UnitsError::LocalStore(format!("query task failed: {}", e)))?
    }

    fn describe(&self) -> String {
        self.source.clone()
    }
}
