use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ApiError;
use super::AppState;
use crate::concepts::{ConceptCatalog, SubjectTriples};
use crate::config::split_list;
use crate::service::{ConceptQuery, UnitData};

/// Query-string options of `/quantity-kinds`
///
/// The catalog always reads the `qudt` graph, so `graphs` is not accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogParams {
    pub lang: Option<String>,
    pub remove_namespaces: Option<bool>,
    pub strip_lang_codes: Option<bool>,
}

impl CatalogParams {
    pub fn to_query(&self) -> ConceptQuery {
        let defaults = ConceptQuery::default();
        ConceptQuery {
            lang: self.lang.clone(),
            remove_namespaces: self.remove_namespaces.unwrap_or(defaults.remove_namespaces),
            strip_lang_codes: self.strip_lang_codes.unwrap_or(defaults.strip_lang_codes),
            graph_namespaces: None,
        }
    }
}

/// `iri` plus the options of `/quantity-kind` and `/unit`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IriParams {
    pub iri: String,
    pub lang: Option<String>,
    pub remove_namespaces: Option<bool>,
    pub strip_lang_codes: Option<bool>,
    /// Comma separated graph namespaces
    pub graphs: Option<String>,
}

impl IriParams {
    pub fn to_query(&self) -> ConceptQuery {
        let catalog = CatalogParams {
            lang: self.lang.clone(),
            remove_namespaces: self.remove_namespaces,
            strip_lang_codes: self.strip_lang_codes,
        };
        ConceptQuery {
            graph_namespaces: self.graphs.as_deref().map(split_list),
            ..catalog.to_query()
        }
    }
}

/// `/unit/quantity-kind` takes nothing but the unit IRI
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitIriParam {
    pub iri: String,
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityKindResponse {
    pub iri: String,
    pub quantity_kind: String,
}

/// GET /version
pub async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /quantity-kinds
pub async fn quantity_kinds(
    State(state): State<AppState>,
    params: Result<Query<CatalogParams>, QueryRejection>,
) -> Result<Json<ConceptCatalog>, ApiError> {
    let Query(params) = params?;
    debug!(?params, "Quantity kind catalog requested");
    let catalog = state.service.quantity_kinds(&params.to_query()).await?;
    Ok(Json(catalog))
}

/// GET /quantity-kind?iri=...
pub async fn quantity_kind_data(
    State(state): State<AppState>,
    params: Result<Query<IriParams>, QueryRejection>,
) -> Result<Json<SubjectTriples>, ApiError> {
    let Query(params) = params?;
    debug!(iri = %params.iri, "Quantity kind data requested");
    let data = state
        .service
        .quantity_kind_data(&params.iri, &params.to_query())
        .await?;
    Ok(Json(data))
}

/// GET /unit?iri=...
pub async fn unit_data(
    State(state): State<AppState>,
    params: Result<Query<IriParams>, QueryRejection>,
) -> Result<Json<UnitData>, ApiError> {
    let Query(params) = params?;
    debug!(iri = %params.iri, "Unit data requested");
    let unit = state
        .service
        .unit_data(&params.iri, &params.to_query())
        .await?;
    Ok(Json(unit))
}

/// GET /unit/quantity-kind?iri=...
pub async fn unit_quantity_kind(
    State(state): State<AppState>,
    params: Result<Query<UnitIriParam>, QueryRejection>,
) -> Result<Json<QuantityKindResponse>, ApiError> {
    let Query(params) = params?;
    let quantity_kind = state.service.quantity_kind_for_unit(&params.iri).await?;
    Ok(Json(QuantityKindResponse {
        iri: params.iri,
        quantity_kind,
    }))
}
