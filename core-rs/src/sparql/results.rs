//! SPARQL 1.1 JSON results model
//!
//! Only SELECT result sets are modelled. Each row maps variable names to
//! terms; a term keeps its `value` and optional `xml:lang`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::concepts::{Binding, Term};
use crate::errors::{Result, UnitsError};

pub type Row = HashMap<String, Term>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Head {
    #[serde(default)]
    pub vars: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub bindings: Vec<Row>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparqlResults {
    #[serde(default)]
    pub head: Head,
    pub results: ResultSet,
}

impl SparqlResults {
    pub fn from_rows(vars: &[&str], rows: Vec<Row>) -> Self {
        Self {
            head: Head {
                vars: vars.iter().map(|v| v.to_string()).collect(),
            },
            results: ResultSet { bindings: rows },
        }
    }

    /// Decode a response body
    ///
    /// Anything that is not a SELECT result set is a malformed response.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| UnitsError::MalformedResponse(format!("not a SPARQL JSON result set: {}", e)))
    }

    pub fn len(&self) -> usize {
        self.results.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.bindings.is_empty()
    }

    /// Values of one variable, skipping rows where it is unbound
    pub fn column(&self, var: &str) -> Vec<String> {
        self.results
            .bindings
            .iter()
            .filter_map(|row| row.get(var).map(|term| term.value.clone()))
            .collect()
    }

    /// Convert `?s ?p ?o` rows into bindings, keeping row order
    ///
    /// A row missing any of the three variables is a malformed response.
    pub fn into_bindings(self) -> Result<Vec<Binding>> {
        self.results
            .bindings
            .into_iter()
            .enumerate()
            .map(|(index, mut row)| {
                let mut take = |var: &str| {
                    row.remove(var).ok_or_else(|| {
                        UnitsError::MalformedResponse(format!("row {} has no ?{} binding", index, var))
                    })
                };
                let subject = take("s")?;
                let predicate = take("p")?;
                let object = take("o")?;
                Ok(Binding::new(subject.value, predicate.value, object))
            })
            .collect()
    }
}
