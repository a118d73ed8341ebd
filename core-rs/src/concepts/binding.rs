//! Raw bindings and their normalised form
//!
//! A [`Binding`] is one `?s ?p ?o` row of a SPARQL JSON result set. The
//! [`BindingReformatter`] turns it into a [`NormalizedTriple`]: predicate and
//! object with known namespaces optionally stripped, plus the lower-cased
//! language tag when the literal had one.

use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize, Serializer};

use super::language::{language_matches, LanguageFilter};
use super::namespaces::NamespaceStripper;

/// An RDF term (IRI, blank node or literal) as it appears in SPARQL JSON results
///
/// IRIs and blank nodes never carry a language. Only `value` and `xml:lang` are kept; `type` and `datatype` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub value: String,
    #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Term {
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: None,
        }
    }

    pub fn tagged(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: Some(language.into()),
        }
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Does this term pass a language filter?
    pub fn passes(&self, filter: Option<&LanguageFilter>) -> bool {
        language_matches(self.language(), filter)
    }
}

#[derive(Deserialize)]
struct RawBinding {
    s: Term,
    p: Term,
    o: Term,
}

/// One subject/predicate/object row
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawBinding")]
pub struct Binding {
    pub subject: String,
    pub predicate: String,
    pub object: Term,
}

impl From<RawBinding> for Binding {
    fn from(raw: RawBinding) -> Self {
        Self {
            subject: raw.s.value,
            predicate: raw.p.value,
            object: raw.o,
        }
    }
}

impl Binding {
    pub fn new(subject: impl Into<String>, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
        }
    }
}

/// `(predicate, object[, language])`
///
/// Serialises as a 2- or 3-element JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedTriple {
    pub predicate: String,
    pub object: String,
    pub language: Option<String>,
}

impl NormalizedTriple {
    pub fn new(predicate: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            predicate: predicate.into(),
            object: object.into(),
            language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

impl Serialize for NormalizedTriple {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.language.is_some() { 3 } else { 2 };
        let mut tuple = serializer.serialize_tuple(len)?;
        tuple.serialize_element(&self.predicate)?;
        tuple.serialize_element(&self.object)?;
        if let Some(language) = &self.language {
            tuple.serialize_element(language)?;
        }
        tuple.end()
    }
}

/// Flags controlling [`BindingReformatter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReformatOptions {
    pub remove_namespaces: bool,
    pub strip_lang_codes: bool,
}

impl Default for ReformatOptions {
    fn default() -> Self {
        Self {
            remove_namespaces: true,
            strip_lang_codes: false,
        }
    }
}

/// Converts raw bindings into normalised triples
#[derive(Debug, Clone, Default)]
pub struct BindingReformatter {
    options: ReformatOptions,
    stripper: NamespaceStripper,
}

impl BindingReformatter {
    pub fn new(options: ReformatOptions) -> Self {
        Self {
            options,
            stripper: NamespaceStripper::default(),
        }
    }

    pub fn with_stripper(mut self, stripper: NamespaceStripper) -> Self {
        self.stripper = stripper;
        self
    }

    pub fn options(&self) -> ReformatOptions {
        self.options
    }

    /// Shorten a predicate key the same way predicates are shortened in triples
    pub fn predicate_key(&self, predicate: &str) -> String {
        if self.options.remove_namespaces {
            self.stripper.strip(predicate).to_string()
        } else {
            predicate.to_string()
        }
    }

    /// Shorten an object value
    ///
    /// Applied to literals as well as IRIs. Plain text never starts with one
    /// of the known namespace IRIs, so literals pass through unchanged.
    pub fn object_value(&self, object: &str) -> String {
        if self.options.remove_namespaces {
            self.stripper.strip(object).to_string()
        } else {
            object.to_string()
        }
    }

    /// Language component for the output, if any
    pub fn language_component(&self, literal: &Term) -> Option<String> {
        if self.options.strip_lang_codes {
            return None;
        }
        literal.language().map(str::to_lowercase)
    }

    /// Reformat one binding
    ///
    /// # Example
    ///
    /// ```
    /// use units_core::concepts::{Binding, BindingReformatter, Term, NormalizedTriple};
    ///
    /// let binding = Binding::new(
    ///     "https://vocab.sentier.dev/qudt/unit/M-SEC",
    ///     "http://www.w3.org/2004/02/skos/core#notation",
    ///     Term::tagged("w00t", "en-GB"),
    /// );
    /// let triple = BindingReformatter::default().reformat(&binding);
    /// assert_eq!(triple, NormalizedTriple::new("notation", "w00t").with_language("en-gb"));
    /// ```
    pub fn reformat(&self, binding: &Binding) -> NormalizedTriple {
        NormalizedTriple {
            predicate: self.predicate_key(&binding.predicate),
            object: self.object_value(&binding.object.value),
            language: self.language_component(&binding.object),
        }
    }
}
