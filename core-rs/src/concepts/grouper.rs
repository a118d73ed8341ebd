//! Triple grouping
//!
//! Turns a flat, unsorted list of bindings into nested records. Two modes:
//!
//! - **per subject** ([`TripleGrouper::group_by_subject`]): subject IRI →
//!   list of `(predicate, object[, lang])` in input order.
//! - **per subject and predicate** ([`TripleGrouper::group_by_predicate`]):
//!   subject IRI → predicate key → scalar or list of values.
//!
//! Both modes bucket by key equality in one full pass over the input, so
//! equal subjects are merged no matter where they appear in the list.
//! Subject keys are never namespace-stripped.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use super::binding::{Binding, BindingReformatter, NormalizedTriple};
use super::collapse::{collapse, Collapsed};
use super::language::LanguageFilter;

/// Mode A output: subject IRI → triples in encounter order
pub type SubjectTriples = BTreeMap<String, Vec<NormalizedTriple>>;

/// Predicate key → collapsed values for one subject
pub type ConceptRecord = BTreeMap<String, Collapsed<ObjectValue>>;

/// Mode B output: subject IRI → record
pub type ConceptCatalog = BTreeMap<String, ConceptRecord>;

/// A value in a [`ConceptRecord`]
///
/// `Plain` serialises as a string, `Tagged` as `[object, lang]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ObjectValue {
    Plain(String),
    Tagged(String, String),
}

impl ObjectValue {
    pub fn value(&self) -> &str {
        match self {
            ObjectValue::Plain(value) | ObjectValue::Tagged(value, _) => value,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match self {
            ObjectValue::Plain(_) => None,
            ObjectValue::Tagged(_, language) => Some(language),
        }
    }
}

impl From<NormalizedTriple> for ObjectValue {
    fn from(triple: NormalizedTriple) -> Self {
        match triple.language {
            Some(language) => ObjectValue::Tagged(triple.object, language),
            None => ObjectValue::Plain(triple.object),
        }
    }
}

/// Filters, reformats and groups bindings
#[derive(Debug, Clone, Default)]
pub struct TripleGrouper {
    filter: Option<LanguageFilter>,
    reformatter: BindingReformatter,
}

impl TripleGrouper {
    pub fn new(filter: Option<LanguageFilter>, reformatter: BindingReformatter) -> Self {
        Self { filter, reformatter }
    }

    pub fn filter(&self) -> Option<&LanguageFilter> {
        self.filter.as_ref()
    }

    fn passing<'a>(&'a self, bindings: &'a [Binding]) -> impl Iterator<Item = &'a Binding> + 'a {
        bindings
            .iter()
            .filter(move |binding| binding.object.passes(self.filter.as_ref()))
    }

    /// Mode A: subject → `(predicate, object[, lang])` list
    pub fn group_by_subject(&self, bindings: &[Binding]) -> SubjectTriples {
        let mut groups = SubjectTriples::new();
        for binding in self.passing(bindings) {
            groups
                .entry(binding.subject.clone())
                .or_default()
                .push(self.reformatter.reformat(binding));
        }

        debug!(
            bindings = bindings.len(),
            subjects = groups.len(),
            "Grouped bindings by subject"
        );
        groups
    }

    /// Mode B: subject → predicate → scalar-or-list
    ///
    /// A predicate with no value passing the language filter is absent.
    pub fn group_by_predicate(&self, bindings: &[Binding]) -> ConceptCatalog {
        let mut buckets: BTreeMap<String, BTreeMap<String, Vec<ObjectValue>>> = BTreeMap::new();
        for binding in self.passing(bindings) {
            let triple = self.reformatter.reformat(binding);
            buckets
                .entry(binding.subject.clone())
                .or_default()
                .entry(triple.predicate.clone())
                .or_default()
                .push(ObjectValue::from(triple));
        }

        let catalog: ConceptCatalog = buckets
            .into_iter()
            .map(|(subject, predicates)| {
                let record = predicates
                    .into_iter()
                    .filter_map(|(key, values)| collapse(values).map(|value| (key, value)))
                    .collect();
                (subject, record)
            })
            .collect();

        debug!(
            bindings = bindings.len(),
            subjects = catalog.len(),
            "Grouped bindings by subject and predicate"
        );
        catalog
    }
}
