//! End-to-end tests for ConceptService over a local dataset
//!
//! The fixture in `tests/fixtures/vocab.trig` holds a small slice of the
//! vocabulary in two named graphs (`qudt` and `simapro`), so the same
//! queries run as against the remote endpoint.

use std::path::PathBuf;
use std::sync::Arc;

use units_core::concepts::{Collapsed, NormalizedTriple, ObjectValue};
use units_core::config::Settings;
use units_core::service::{ConceptQuery, ConceptService, Vocabulary};
use units_core::sparql::LocalDataset;
use units_core::UnitsError;

const M_SEC: &str = "https://vocab.sentier.dev/qudt/unit/M-SEC";
const CENTIM_SEC: &str = "https://vocab.sentier.dev/qudt/unit/CentiM-SEC";
const SIMAPRO_MS: &str = "https://vocab.sentier.dev/simapro/unit/ms";
const M_PER_SEC2: &str = "https://vocab.sentier.dev/qudt/unit/M-PER-SEC2";
const LENGTH_TIME: &str = "https://vocab.sentier.dev/qudt/quantity-kind/LengthTime";
const ACCELERATION: &str = "https://vocab.sentier.dev/qudt/quantity-kind/Acceleration";
const ENTHALPY: &str = "https://vocab.sentier.dev/qudt/quantity-kind/Enthalpy";

// ==================== Test Helper Functions ====================

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("core-rs/tests/fixtures/vocab.trig")
}

fn service() -> ConceptService {
    let dataset = LocalDataset::load(fixture_path()).unwrap();
    ConceptService::new(Arc::new(dataset), Vocabulary::from_settings(&Settings::default()))
}

fn tagged(value: &str, lang: &str) -> ObjectValue {
    ObjectValue::Tagged(value.to_string(), lang.to_string())
}

// ==================== Unit → Quantity Kind ====================

#[tokio::test]
async fn test_quantity_kind_for_unit() {
    let qk = service().quantity_kind_for_unit(M_SEC).await.unwrap();
    assert_eq!(qk, LENGTH_TIME);
}

#[tokio::test]
async fn test_quantity_kind_for_simapro_unit() {
    let qk = service().quantity_kind_for_unit(SIMAPRO_MS).await.unwrap();
    assert_eq!(qk, LENGTH_TIME);
}

#[tokio::test]
async fn test_quantity_kind_for_unknown_unit() {
    let err = service()
        .quantity_kind_for_unit("https://vocab.sentier.dev/qudt/unit/W00T")
        .await
        .unwrap_err();
    assert!(matches!(err, UnitsError::NotFound(_)));
}

#[tokio::test]
async fn test_quantity_kind_for_malformed_iri() {
    let err = service().quantity_kind_for_unit("a> <b").await.unwrap_err();
    assert!(matches!(err, UnitsError::InvalidIri(_)));
}

// ==================== Quantity Kind Data (Mode A) ====================

#[tokio::test]
async fn test_quantity_kind_data_default_options() {
    let data = service()
        .quantity_kind_data(LENGTH_TIME, &ConceptQuery::default())
        .await
        .unwrap();

    assert!(data.contains_key(M_SEC));
    assert!(data.contains_key(CENTIM_SEC));
    assert!(data.contains_key(SIMAPRO_MS));
    assert!(!data.contains_key(M_PER_SEC2));

    let m_sec = &data[M_SEC];
    assert!(m_sec.contains(&NormalizedTriple::new("prefLabel", "Metre second")));
    assert!(m_sec.contains(&NormalizedTriple::new("prefLabel", "Meter Sekunde").with_language("de")));
    assert!(m_sec.contains(&NormalizedTriple::new("hasQuantityKind", LENGTH_TIME)));
    assert!(m_sec.contains(&NormalizedTriple::new("type", "Unit")));
}

#[tokio::test]
async fn test_quantity_kind_data_merges_graphs() {
    let data = service()
        .quantity_kind_data(LENGTH_TIME, &ConceptQuery::default())
        .await
        .unwrap();

    // M-SEC has triples in both graphs; they land under the same key.
    let m_sec = &data[M_SEC];
    assert!(m_sec.contains(&NormalizedTriple::new("related", SIMAPRO_MS)));
    assert!(m_sec.contains(&NormalizedTriple::new("symbol", "m·s")));
}

#[tokio::test]
async fn test_quantity_kind_data_single_graph() {
    let request = ConceptQuery {
        graph_namespaces: Some(vec!["simapro".to_string()]),
        ..ConceptQuery::default()
    };
    let data = service().quantity_kind_data(LENGTH_TIME, &request).await.unwrap();

    assert!(data.contains_key(SIMAPRO_MS));
    assert!(!data.contains_key(CENTIM_SEC));
    assert!(!data[M_SEC].contains(&NormalizedTriple::new("prefLabel", "Metre second")));
}

#[tokio::test]
async fn test_quantity_kind_data_repeated_graph_counted_once() {
    let request = ConceptQuery {
        graph_namespaces: Some(vec!["qudt".to_string(), "qudt".to_string()]),
        ..ConceptQuery::default()
    };
    let data = service().quantity_kind_data(LENGTH_TIME, &request).await.unwrap();

    let label = NormalizedTriple::new("prefLabel", "Metre second");
    assert_eq!(data[M_SEC].iter().filter(|t| **t == label).count(), 1);
}

#[tokio::test]
async fn test_quantity_kind_data_rejects_graph_with_slash() {
    let request = ConceptQuery {
        graph_namespaces: Some(vec!["qudt/unit".to_string()]),
        ..ConceptQuery::default()
    };
    let err = service().quantity_kind_data(LENGTH_TIME, &request).await.unwrap_err();
    assert!(matches!(err, UnitsError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_quantity_kind_data_keep_namespaces() {
    let request = ConceptQuery {
        remove_namespaces: false,
        ..ConceptQuery::default()
    };
    let data = service().quantity_kind_data(LENGTH_TIME, &request).await.unwrap();

    let m_sec = &data[M_SEC];
    assert!(m_sec.contains(&NormalizedTriple::new(
        "http://www.w3.org/2004/02/skos/core#prefLabel",
        "Metre second"
    )));
    assert!(m_sec.contains(&NormalizedTriple::new(
        "http://www.w3.org/1999/02/22-rdf-syntax-ns#type",
        "http://qudt.org/schema/qudt/Unit"
    )));
}

#[tokio::test]
async fn test_quantity_kind_data_language_filter() {
    let data = service()
        .quantity_kind_data(LENGTH_TIME, &ConceptQuery::default().with_lang("en"))
        .await
        .unwrap();

    let m_sec = &data[M_SEC];
    assert!(m_sec.contains(&NormalizedTriple::new("prefLabel", "Metre second")));
    assert!(m_sec.iter().all(|t| t.language.is_none()));

    // en-GB normalises to en-gb and passes the "en" prefix
    assert_eq!(
        data[CENTIM_SEC]
            .iter()
            .filter(|t| t.predicate == "prefLabel")
            .collect::<Vec<_>>(),
        vec![&NormalizedTriple::new("prefLabel", "Centimetre second").with_language("en-gb")]
    );
}

#[tokio::test]
async fn test_quantity_kind_data_strip_lang_codes() {
    let request = ConceptQuery {
        strip_lang_codes: true,
        ..ConceptQuery::default()
    };
    let data = service().quantity_kind_data(LENGTH_TIME, &request).await.unwrap();

    for triples in data.values() {
        assert!(triples.iter().all(|t| t.language.is_none()));
    }
    assert!(data[M_SEC].contains(&NormalizedTriple::new("prefLabel", "Meter Sekunde")));
}

#[tokio::test]
async fn test_quantity_kind_data_unrelated_kind_is_empty() {
    let data = service()
        .quantity_kind_data(
            "https://vocab.sentier.dev/qudt/quantity-kind/Luminance",
            &ConceptQuery::default(),
        )
        .await
        .unwrap();
    assert!(data.is_empty());
}

#[tokio::test]
async fn test_quantity_kind_data_invalid_filter() {
    let err = service()
        .quantity_kind_data(LENGTH_TIME, &ConceptQuery::default().with_lang("abc"))
        .await
        .unwrap_err();
    assert!(matches!(err, UnitsError::InvalidFilter(_)));
}

// ==================== Catalog (Mode B) ====================

#[tokio::test]
async fn test_quantity_kinds_catalog() {
    let catalog = service().quantity_kinds(&ConceptQuery::default()).await.unwrap();

    assert!(catalog.contains_key(ACCELERATION));
    assert!(catalog.contains_key(ENTHALPY));
    assert!(catalog.contains_key(LENGTH_TIME));
    assert!(!catalog.contains_key(M_SEC));

    let acceleration = &catalog[ACCELERATION];
    assert_eq!(
        acceleration["informativeReference"],
        Collapsed::One(ObjectValue::Plain("http://en.wikipedia.org/wiki/Acceleration".to_string()))
    );
    assert!(acceleration["prefLabel"].contains(&tagged("accélération", "fr")));
    assert!(acceleration["prefLabel"].contains(&tagged("Acceleration", "en")));
    assert!(!acceleration.contains_key("type"));

    assert!(catalog[ENTHALPY]["prefLabel"].len() > 1);
    assert_eq!(
        catalog[LENGTH_TIME]["prefLabel"],
        Collapsed::One(tagged("Length Time", "en"))
    );
}

#[tokio::test]
async fn test_quantity_kinds_language_filter() {
    let catalog = service()
        .quantity_kinds(&ConceptQuery::default().with_lang("fr"))
        .await
        .unwrap();

    let acceleration = &catalog[ACCELERATION];
    assert_eq!(
        acceleration["prefLabel"],
        Collapsed::One(tagged("accélération", "fr"))
    );
    // untagged values always pass
    assert!(acceleration.contains_key("exactMatch"));

    // nothing of Enthalpy is French
    assert!(!catalog.contains_key(ENTHALPY));
}

#[tokio::test]
async fn test_quantity_kinds_strip_lang_codes() {
    let request = ConceptQuery {
        strip_lang_codes: true,
        ..ConceptQuery::default()
    };
    let catalog = service().quantity_kinds(&request).await.unwrap();

    assert_eq!(
        catalog[LENGTH_TIME]["prefLabel"],
        Collapsed::One(ObjectValue::Plain("Length Time".to_string()))
    );
    assert!(catalog[ACCELERATION]["prefLabel"]
        .contains(&ObjectValue::Plain("accélération".to_string())));
}

// ==================== Unit Data ====================

#[tokio::test]
async fn test_unit_data() {
    let unit = service()
        .unit_data(CENTIM_SEC, &ConceptQuery::default())
        .await
        .unwrap();

    assert_eq!(unit.iri, CENTIM_SEC);
    assert_eq!(unit.quantity_kind, LENGTH_TIME);
    assert!(unit.data.contains_key(M_SEC));
    assert!(unit.data.contains_key(CENTIM_SEC));
}

#[tokio::test]
async fn test_unit_data_unknown_unit() {
    let err = service()
        .unit_data("https://vocab.sentier.dev/qudt/unit/W00T", &ConceptQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, UnitsError::NotFound(_)));
}
