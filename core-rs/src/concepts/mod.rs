/**
 * concepts module
 *
 * - namespaces: known-prefix stripping for IRIs
 * - language: language tag filters
 * - binding: raw SPARQL bindings and their normalised form
 * - collapse: absent/scalar/list value collapsing
 * - grouper: per-subject and per-predicate grouping
 */

pub mod binding;
pub mod collapse;
pub mod grouper;
pub mod language;
pub mod namespaces;

pub use binding::{Binding, BindingReformatter, Term, NormalizedTriple, ReformatOptions};
pub use collapse::{collapse, Collapsed};
pub use grouper::{ConceptCatalog, ConceptRecord, ObjectValue, SubjectTriples, TripleGrouper};
pub use language::{language_matches, normalize_tag, LanguageFilter};
pub use namespaces::{strip_namespace, NamespaceStripper, KNOWN_PREFIXES, QUDT_SCHEMA, RDF_SYNTAX, SKOS_CORE};
