//! ConceptService - quantity kind and unit lookups
//!
//! Ties the query builders, the injected [`QueryExecutor`] and the
//! [`TripleGrouper`] together. Every call is independent: bindings are
//! fetched, reshaped and returned, nothing is kept between requests.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::concepts::{
    BindingReformatter, ConceptCatalog, LanguageFilter, ReformatOptions, SubjectTriples, TripleGrouper,
};
use crate::config::Settings;
use crate::errors::{Result, UnitsError};
use crate::sparql::{graph_iri, validate_iri, QueryExecutor, SparqlQuery};

/// Where the vocabulary graphs live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    pub vocab_prefix: String,
    pub graph_namespaces: Vec<String>,
}

impl Vocabulary {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            vocab_prefix: settings.vocab_prefix.clone(),
            graph_namespaces: settings.graph_namespaces.clone(),
        }
    }
}

/// Per-request options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptQuery {
    pub lang: Option<String>,
    pub remove_namespaces: bool,
    pub strip_lang_codes: bool,
    /// Graph namespaces to read; `None` or empty uses the configured ones
    pub graph_namespaces: Option<Vec<String>>,
}

impl Default for ConceptQuery {
    fn default() -> Self {
        Self {
            lang: None,
            remove_namespaces: true,
            strip_lang_codes: false,
            graph_namespaces: None,
        }
    }
}

impl ConceptQuery {
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    fn grouper(&self) -> Result<TripleGrouper> {
        let filter = LanguageFilter::parse_optional(self.lang.as_deref())?;
        let reformatter = BindingReformatter::new(ReformatOptions {
            remove_namespaces: self.remove_namespaces,
            strip_lang_codes: self.strip_lang_codes,
        });
        Ok(TripleGrouper::new(filter, reformatter))
    }
}

/// A unit, its quantity kind and the data of every unit sharing it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitData {
    pub iri: String,
    pub quantity_kind: String,
    pub data: SubjectTriples,
}

#[derive(Clone)]
pub struct ConceptService {
    executor: Arc<dyn QueryExecutor>,
    vocabulary: Vocabulary,
}

impl ConceptService {
    pub fn new(executor: Arc<dyn QueryExecutor>, vocabulary: Vocabulary) -> Self {
        Self { executor, vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Quantity kind IRI of a unit
    ///
    /// Absence is always reported as [`UnitsError::NotFound`].
    pub async fn quantity_kind_for_unit(&self, unit_iri: &str) -> Result<String> {
        let query = SparqlQuery::quantity_kind_for_unit(unit_iri, &self.vocabulary.vocab_prefix)?;
        let results = self.executor.select(&query).await?;
        info!(unit = unit_iri, results = results.len(), "Retrieved quantity kind results");

        results
            .column("qk")
            .into_iter()
            .next()
            .ok_or_else(|| UnitsError::NotFound(format!("no quantity kind for unit {}", unit_iri)))
    }

    /// Catalog of all quantity kinds, grouped per subject and predicate
    pub async fn quantity_kinds(&self, request: &ConceptQuery) -> Result<ConceptCatalog> {
        let grouper = request.grouper()?;
        let query = SparqlQuery::quantity_kind_catalog(&self.vocabulary.vocab_prefix)?;

        let bindings = self.executor.select(&query).await?.into_bindings()?;
        let catalog = grouper.group_by_predicate(&bindings);
        info!(
            bindings = bindings.len(),
            quantity_kinds = catalog.len(),
            "Retrieved quantity kinds"
        );
        Ok(catalog)
    }

    /// Every triple of every unit having `quantity_kind_iri`, grouped per unit
    ///
    /// One query is issued per distinct graph namespace; the bindings are concatenated
    /// in namespace order before grouping.
    pub async fn quantity_kind_data(
        &self,
        quantity_kind_iri: &str,
        request: &ConceptQuery,
    ) -> Result<SubjectTriples> {
        let grouper = request.grouper()?;
        validate_iri(quantity_kind_iri)?;
        let namespaces = self.graph_namespaces(request)?;

        let mut bindings = Vec::new();
        for namespace in namespaces {
            let graph = graph_iri(&self.vocabulary.vocab_prefix, namespace);
            let query = SparqlQuery::units_for_quantity_kind(quantity_kind_iri, &graph)?;
            let rows = self.executor.select(&query).await?.into_bindings()?;
            info!(
                results = rows.len(),
                quantity_kind = quantity_kind_iri,
                graph = %graph,
                "Retrieved results for quantity kind"
            );
            bindings.extend(rows);
        }

        let groups = grouper.group_by_subject(&bindings);
        debug!(units = groups.len(), quantity_kind = quantity_kind_iri, "Grouped units");
        Ok(groups)
    }

    /// Graph namespaces for a request: validated, duplicates dropped, first-seen order kept
    fn graph_namespaces<'a>(&'a self, request: &'a ConceptQuery) -> Result<Vec<&'a str>> {
        let requested = match &request.graph_namespaces {
            Some(namespaces) if !namespaces.is_empty() => namespaces,
            _ => &self.vocabulary.graph_namespaces,
        };

        let mut namespaces: Vec<&str> = Vec::with_capacity(requested.len());
        for namespace in requested {
            if namespace.is_empty() || namespace.contains('/') {
                return Err(UnitsError::InvalidRequest(format!(
                    "invalid graph namespace '{}'",
                    namespace
                )));
            }
            if !namespaces.contains(&namespace.as_str()) {
                namespaces.push(namespace.as_str());
            }
        }
        Ok(namespaces)
    }

    /// Resolve a unit's quantity kind and return the data of that quantity kind
    pub async fn unit_data(&self, unit_iri: &str, request: &ConceptQuery) -> Result<UnitData> {
        // Reject bad options before touching the endpoint.
        LanguageFilter::parse_optional(request.lang.as_deref())?;
        self.graph_namespaces(request)?;

        let quantity_kind = self.quantity_kind_for_unit(unit_iri).await?;
        let data = self.quantity_kind_data(&quantity_kind, request).await?;
        Ok(UnitData {
            iri: unit_iri.to_string(),
            quantity_kind,
            data,
        })
    }
}
