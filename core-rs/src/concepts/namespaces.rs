/**
 * namespaces.rs
 * Maps full IRIs to short local names by removing a known prefix
 */

use once_cell::sync::Lazy;

/// QUDT schema namespace
pub const QUDT_SCHEMA: &str = "http://qudt.org/schema/qudt/";

/// RDF syntax namespace
pub const RDF_SYNTAX: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// SKOS core namespace
pub const SKOS_CORE: &str = "http://www.w3.org/2004/02/skos/core#";

/// Known prefixes in priority order. The first prefix an IRI starts with wins.
pub const KNOWN_PREFIXES: [&str; 3] = [QUDT_SCHEMA, RDF_SYNTAX, SKOS_CORE];

/// Removes known namespace prefixes from IRIs
///
/// Prefixes are tried in the order they were given. Stripping repeats until
/// no prefix matches, so `strip(strip(x)) == strip(x)` for every input.
///
/// This differs from removing only the first matching prefix when an IRI
/// nests another known namespace:
/// `http://qudt.org/schema/qudt/http://www.w3.org/2004/02/skos/core#x`
/// becomes `x`, not `http://www.w3.org/2004/02/skos/core#x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceStripper {
    prefixes: Vec<String>,
}

impl Default for NamespaceStripper {
    fn default() -> Self {
        Self::with_prefixes(KNOWN_PREFIXES)
    }
}

impl NamespaceStripper {
    /// Create a stripper with an explicit, ordered prefix list
    ///
    /// Empty prefixes are dropped; they would match everything and strip nothing.
    pub fn with_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Return the local name of `iri`, or `iri` unchanged when no prefix matches
    ///
    /// # Example
    ///
    /// ```
    /// use units_core::concepts::NamespaceStripper;
    ///
    /// let stripper = NamespaceStripper::default();
    /// assert_eq!(stripper.strip("http://www.w3.org/2004/02/skos/core#notation"), "notation");
    /// assert_eq!(stripper.strip("/skos/core#notation"), "/skos/core#notation");
    /// ```
    pub fn strip<'a>(&self, iri: &'a str) -> &'a str {
        let mut current = iri;
        while let Some(rest) = self
            .prefixes
            .iter()
            .find_map(|prefix| current.strip_prefix(prefix.as_str()))
        {
            current = rest;
        }
        current
    }
}

static DEFAULT_STRIPPER: Lazy<NamespaceStripper> = Lazy::new(NamespaceStripper::default);

/// Strip with the default prefix set
pub fn strip_namespace(iri: &str) -> &str {
    DEFAULT_STRIPPER.strip(iri)
}
