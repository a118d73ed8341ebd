/**
 * query.rs
 * Query types and builders for SPARQL
 */

use crate::errors::{Result, UnitsError};

/// Characters that may not appear inside `<...>` in a SPARQL IRI reference
const FORBIDDEN_IRI_CHARS: &[char] = &['<', '>', '"', '{', '}', '|', '^', '`', '\\'];

/// Reject IRIs that cannot be interpolated into `<...>` safely
pub fn validate_iri(iri: &str) -> Result<&str> {
    if iri.is_empty() {
        return Err(UnitsError::InvalidIri("IRI cannot be empty".to_string()));
    }
    if iri
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || FORBIDDEN_IRI_CHARS.contains(&c))
    {
        return Err(UnitsError::InvalidIri(iri.to_string()));
    }
    Ok(iri)
}

/// Named graph for a namespace under the vocabulary prefix
///
/// `graph_iri("https://vocab.sentier.dev/", "qudt")` → `https://vocab.sentier.dev/qudt/`
pub fn graph_iri(vocab_prefix: &str, namespace: &str) -> String {
    format!("{}{}/", vocab_prefix, namespace)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparqlQuery {
    query: String,
}

impl SparqlQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.query
    }

    /// Quantity kind of a unit (zero or one row, variable `?qk`)
    pub fn quantity_kind_for_unit(unit_iri: &str, vocab_prefix: &str) -> Result<Self> {
        let unit_iri = validate_iri(unit_iri)?;
        Ok(Self::new(format!(
            r#"
            PREFIX qudt: <http://qudt.org/schema/qudt/>

            SELECT ?qk
            FROM <{}>
            FROM <{}>
            WHERE {{
                <{}> qudt:hasQuantityKind ?qk .
            }}
            LIMIT 1
            "#,
            validate_iri(&graph_iri(vocab_prefix, "qudt"))?,
            validate_iri(&graph_iri(vocab_prefix, "simapro"))?,
            unit_iri
        )))
    }

    /// Labels and references of every quantity kind (`?s ?p ?o`)
    pub fn quantity_kind_catalog(vocab_prefix: &str) -> Result<Self> {
        let graph = graph_iri(vocab_prefix, "qudt");
        Ok(Self::new(format!(
            r#"
            PREFIX qudt: <http://qudt.org/schema/qudt/>
            PREFIX skos: <http://www.w3.org/2004/02/skos/core#>

            SELECT ?s ?p ?o
            FROM <{}>
            WHERE {{
                ?s ?p ?o
                FILTER (
                    contains(STR(?s), "{}quantity-kind/")
                )
                FILTER (
                    ?p IN (skos:prefLabel, skos:altLabel, skos:exactMatch, skos:related, skos:definition, qudt:informativeReference)
                )
            }}
            "#,
            validate_iri(&graph)?,
            graph
        )))
    }

    /// Every triple of every unit with the given quantity kind, in one graph
    pub fn units_for_quantity_kind(quantity_kind_iri: &str, graph: &str) -> Result<Self> {
        let quantity_kind_iri = validate_iri(quantity_kind_iri)?;
        Ok(Self::new(format!(
            r#"
            PREFIX qudt: <http://qudt.org/schema/qudt/>

            SELECT ?s ?p ?o
            FROM <{}>
            WHERE {{
                ?s ?p ?o .
                ?s qudt:hasQuantityKind <{}>
            }}
            "#,
            validate_iri(graph)?,
            quantity_kind_iri
        )))
    }
}
