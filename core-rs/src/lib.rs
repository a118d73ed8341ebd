//! # Units Core - QUDT/SKOS concept information over HTTP
//!
//! Exposes quantity kinds and units from a SPARQL endpoint. The heart of the
//! crate is the triple reshaping engine in [`concepts`]: it takes flat
//! subject/predicate/object bindings and turns them into compact,
//! namespace-normalised, language-filtered nested records.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   SparqlQuery   ┌─────────────────┐
//! │ ConceptService│ ─────────────▶ │  QueryExecutor  │  HttpSparqlClient
//! │              │ ◀───────────── │                 │  LocalDataset
//! └──────┬───────┘  SparqlResults  └─────────────────┘
//!        │ Vec<Binding>
//!        ▼
//! ┌──────────────────────────────────────────────────┐
//! │ TripleGrouper                                    │
//! │  language filter → reformat → group → collapse   │
//! └──────────────────────────────────────────────────┘
//! ```

pub mod concepts;
pub mod config;
pub mod errors;
pub mod server;
pub mod service;
pub mod sparql;
pub mod telemetry;

pub use concepts::{
    Binding, BindingReformatter, Collapsed, ConceptCatalog, ConceptRecord, LanguageFilter, Term,
    NamespaceStripper, NormalizedTriple, ObjectValue, ReformatOptions, SubjectTriples, TripleGrouper,
};
pub use config::Settings;
pub use errors::{Result, UnitsError};
pub use service::{ConceptQuery, ConceptService, UnitData, Vocabulary};
pub use sparql::{HttpSparqlClient, LocalDataset, QueryExecutor, SparqlQuery, SparqlResults};

use std::sync::Arc;
use tracing::info;

/// Version of the Units API
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the executor the settings ask for: a local dataset if one is
/// configured, the remote endpoint otherwise
pub fn executor_from_settings(settings: &Settings) -> Result<Arc<dyn QueryExecutor>> {
    match &settings.local_dataset {
        Some(path) => Ok(Arc::new(LocalDataset::load(path)?)),
        None => Ok(Arc::new(HttpSparqlClient::new(
            settings.sparql_url.clone(),
            settings.request_timeout(),
        )?)),
    }
}

/// Validate settings and build a ready-to-use concept service
pub fn service_from_settings(settings: &Settings) -> Result<ConceptService> {
    settings.validate()?;
    let executor = executor_from_settings(settings)?;
    info!(executor = %executor.describe(), "Query executor ready");
    Ok(ConceptService::new(executor, Vocabulary::from_settings(settings)))
}
