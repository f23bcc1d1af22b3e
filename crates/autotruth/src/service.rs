//! HTTP-facing service over the engine and a company registry.

use crate::disclosures::{CompanySummary, DisclosureInput, DisclosureRegistry};
use crate::error::AppError;
use crate::scoring::{
    AnalysisResult, ComparisonReport, Pillar, TransparencyEngine, TransparencyInsights,
};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// One scored disclosure plus the narrative built from it.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    pub result: AnalysisResult,
    pub insights: TransparencyInsights,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResponse {
    pub generated_at: DateTime<Utc>,
    /// Requested ids with no registry entry.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
    pub comparison: ComparisonReport,
}

/// Vehicle models listed for one registered company, sorted by name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyModels {
    pub company_id: String,
    pub models: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PillarInfo {
    pub key: &'static str,
    pub label: &'static str,
    pub weight: f64,
}

pub struct TransparencyService<R> {
    engine: TransparencyEngine,
    registry: Arc<R>,
}

impl<R> TransparencyService<R>
where
    R: DisclosureRegistry,
{
    pub fn new(engine: TransparencyEngine, registry: Arc<R>) -> Self {
        Self { engine, registry }
    }

    pub fn engine(&self) -> &TransparencyEngine {
        &self.engine
    }

    pub fn pillars(&self) -> Vec<PillarInfo> {
        Pillar::ordered()
            .into_iter()
            .map(|pillar| PillarInfo {
                key: pillar.key(),
                label: pillar.label(),
                weight: self.engine.config().weight(pillar),
            })
            .collect()
    }

    pub fn companies(&self) -> Result<Vec<CompanySummary>, AppError> {
        Ok(self.registry.companies()?)
    }

    pub fn models(&self, id: &str) -> Result<CompanyModels, AppError> {
        let record = self
            .registry
            .fetch(id)?
            .ok_or_else(|| AppError::NotFound(format!("company '{id}'")))?;

        let mut models = record.models;
        models.sort();
        Ok(CompanyModels {
            company_id: record.id,
            models,
        })
    }

    pub fn analyze(&self, input: &DisclosureInput) -> AnalysisResponse {
        let result = self.engine.analyze(input);
        let insights = self.engine.insights(&result);
        AnalysisResponse {
            generated_at: Utc::now(),
            company_id: None,
            result,
            insights,
        }
    }

    pub fn analyze_company(&self, id: &str) -> Result<AnalysisResponse, AppError> {
        let record = self
            .registry
            .fetch(id)?
            .ok_or_else(|| AppError::NotFound(format!("company '{id}'")))?;

        let mut response = self.analyze(&record.disclosure);
        response.company_id = Some(record.id);
        Ok(response)
    }

    pub fn compare(&self, inputs: &[DisclosureInput]) -> ComparisonResponse {
        ComparisonResponse {
            generated_at: Utc::now(),
            skipped: Vec::new(),
            comparison: self.engine.compare(inputs),
        }
    }

    /// Registered companies by id, in request order. Unknown ids are
    /// reported back in `skipped` rather than failing the request.
    pub fn compare_companies(&self, ids: &[String]) -> Result<ComparisonResponse, AppError> {
        if ids.is_empty() {
            return Err(AppError::BadRequest(
                "at least one company id is required".to_string(),
            ));
        }

        let mut records = Vec::with_capacity(ids.len());
        let mut skipped = Vec::new();
        for id in ids {
            match self.registry.fetch(id)? {
                Some(record) => records.push(record),
                None => skipped.push(id.clone()),
            }
        }

        info!(
            requested = ids.len(),
            skipped = skipped.len(),
            "comparing registered companies"
        );

        Ok(ComparisonResponse {
            generated_at: Utc::now(),
            skipped,
            comparison: self.engine.compare_registered(&records),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CompareQuery {
    #[serde(default)]
    pub ids: Option<String>,
}

impl CompareQuery {
    pub fn ids(&self) -> Vec<String> {
        self.ids
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Router builder exposing the scoring endpoints.
pub fn transparency_router<R>(service: Arc<TransparencyService<R>>) -> Router
where
    R: DisclosureRegistry + 'static,
{
    Router::new()
        .route("/api/v1/pillars", get(pillars_handler::<R>))
        .route("/api/v1/companies", get(companies_handler::<R>))
        .route(
            "/api/v1/analyze",
            axum::routing::post(analyze_handler::<R>),
        )
        .route("/api/v1/models/:company_id", get(models_handler::<R>))
        .route("/api/v1/analyze/:company_id", get(analyze_company_handler::<R>))
        .route(
            "/api/v1/compare",
            get(compare_companies_handler::<R>).post(compare_handler::<R>),
        )
        .with_state(service)
}

async fn pillars_handler<R>(State(service): State<Arc<TransparencyService<R>>>) -> Json<Vec<PillarInfo>>
where
    R: DisclosureRegistry + 'static,
{
    Json(service.pillars())
}

async fn companies_handler<R>(
    State(service): State<Arc<TransparencyService<R>>>,
) -> Result<Json<Vec<CompanySummary>>, AppError>
where
    R: DisclosureRegistry + 'static,
{
    Ok(Json(service.companies()?))
}

async fn models_handler<R>(
    State(service): State<Arc<TransparencyService<R>>>,
    Path(company_id): Path<String>,
) -> Result<Json<CompanyModels>, AppError>
where
    R: DisclosureRegistry + 'static,
{
    Ok(Json(service.models(&company_id)?))
}

async fn analyze_handler<R>(
    State(service): State<Arc<TransparencyService<R>>>,
    Json(input): Json<DisclosureInput>,
) -> Json<AnalysisResponse>
where
    R: DisclosureRegistry + 'static,
{
    Json(service.analyze(&input))
}

async fn analyze_company_handler<R>(
    State(service): State<Arc<TransparencyService<R>>>,
    Path(company_id): Path<String>,
) -> Result<Json<AnalysisResponse>, AppError>
where
    R: DisclosureRegistry + 'static,
{
    Ok(Json(service.analyze_company(&company_id)?))
}

async fn compare_companies_handler<R>(
    State(service): State<Arc<TransparencyService<R>>>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<ComparisonResponse>, AppError>
where
    R: DisclosureRegistry + 'static,
{
    Ok(Json(service.compare_companies(&query.ids())?))
}

async fn compare_handler<R>(
    State(service): State<Arc<TransparencyService<R>>>,
    Json(inputs): Json<Vec<DisclosureInput>>,
) -> Json<ComparisonResponse>
where
    R: DisclosureRegistry + 'static,
{
    info!(companies = inputs.len(), "comparing posted disclosures");
    Json(service.compare(&inputs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disclosures::{CompanyRecord, DatasetRegistry, RegistryError};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::collections::BTreeMap;
    use tower::ServiceExt;

    struct UnavailableRegistry;

    impl DisclosureRegistry for UnavailableRegistry {
        fn companies(&self) -> Result<Vec<CompanySummary>, RegistryError> {
            Err(RegistryError::Unavailable("dataset offline".to_string()))
        }

        fn fetch(&self, _id: &str) -> Result<Option<CompanyRecord>, RegistryError> {
            Err(RegistryError::Unavailable("dataset offline".to_string()))
        }
    }

    fn record(id: &str, name: &str, base: f64) -> CompanyRecord {
        let pillar_scores: BTreeMap<String, f64> = Pillar::ordered()
            .into_iter()
            .map(|pillar| (pillar.key().to_string(), base))
            .collect();

        CompanyRecord {
            id: id.to_string(),
            logo: None,
            models: vec![format!("{name} Tourer"), format!("{name} One")],
            disclosure: DisclosureInput {
                name: Some(name.to_string()),
                pillar_scores,
                ..DisclosureInput::default()
            },
        }
    }

    fn service() -> Arc<TransparencyService<DatasetRegistry>> {
        let registry = DatasetRegistry::new(vec![
            record("volta", "Volta", 82.0),
            record("ember", "Ember", 55.0),
        ])
        .expect("unique ids");
        Arc::new(TransparencyService::new(
            TransparencyEngine::default(),
            Arc::new(registry),
        ))
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.expect("router responds");
        let status = response.status();
        let body = to_bytes(response.into_body(), 1 << 20)
            .await
            .expect("read body");
        let payload = serde_json::from_slice(&body).expect("json payload");
        (status, payload)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request builds")
    }

    fn post_request(uri: &str, payload: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request builds")
    }

    #[test]
    fn compare_query_splits_and_trims_ids() {
        let query = CompareQuery {
            ids: Some(" volta, ,ember,".to_string()),
        };
        assert_eq!(query.ids(), vec!["volta".to_string(), "ember".to_string()]);
        assert!(CompareQuery::default().ids().is_empty());
    }

    #[tokio::test]
    async fn pillars_endpoint_lists_weights_in_order() {
        let (status, payload) = send(transparency_router(service()), get_request("/api/v1/pillars")).await;

        assert_eq!(status, StatusCode::OK);
        let pillars = payload.as_array().expect("array");
        assert_eq!(pillars.len(), 6);
        assert_eq!(pillars[0]["key"], "raw_materials");
        assert_eq!(pillars[5]["label"], "Offset Strategy");
        assert_eq!(pillars[5]["weight"], 0.1);
    }

    #[tokio::test]
    async fn models_endpoint_sorts_registered_models() {
        let (status, payload) =
            send(transparency_router(service()), get_request("/api/v1/models/volta")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            payload,
            json!({"company_id": "volta", "models": ["Volta One", "Volta Tourer"]})
        );
    }

    #[tokio::test]
    async fn models_for_unknown_company_is_not_found() {
        let (status, payload) =
            send(transparency_router(service()), get_request("/api/v1/models/ghost")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(payload["error"]
            .as_str()
            .unwrap_or_default()
            .contains("ghost"));
    }

    #[tokio::test]
    async fn analyze_company_returns_result_with_insights() {
        let (status, payload) =
            send(transparency_router(service()), get_request("/api/v1/analyze/volta")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["company_id"], "volta");
        assert_eq!(payload["result"]["company"], "Volta");
        assert!(payload["insights"]["observations"].is_array());
        assert!(payload["generated_at"].is_string());
    }

    #[tokio::test]
    async fn analyze_unknown_company_is_not_found() {
        let (status, payload) =
            send(transparency_router(service()), get_request("/api/v1/analyze/ghost")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(payload["error"]
            .as_str()
            .unwrap_or_default()
            .contains("ghost"));
    }

    #[tokio::test]
    async fn analyze_accepts_posted_disclosure() {
        let payload = json!({
            "name": "Posted Motors",
            "pillar_scores": {"raw_materials": 70.0, "supply_chain": 40.0},
            "claims": [
                {"text": "We are committed to a sustainable future.", "type": "VAGUE", "pillar": "supply_chain"}
            ],
            "offset_quality": "Gold Standard"
        });
        let (status, body) =
            send(transparency_router(service()), post_request("/api/v1/analyze", payload)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["claims"][0]["impact_score"], -8.0);
        assert!(body["result"]["claims"][0]["rewrite_suggestion"].is_string());
        assert!(body.get("company_id").is_none());
    }

    #[tokio::test]
    async fn compare_by_ids_skips_unknown_companies() {
        let (status, payload) = send(
            transparency_router(service()),
            get_request("/api/v1/compare?ids=ember,ghost,volta"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let entries = payload["comparison"]["entries"].as_array().expect("entries");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["result"]["company"], "Volta");
        assert_eq!(entries[0]["company_id"], "volta");
        assert_eq!(entries[0]["logo"], "V");
        assert_eq!(entries[1]["company_id"], "ember");
        assert_eq!(entries[0]["standing"], "leader");
        assert_eq!(payload["skipped"], json!(["ghost"]));
    }

    #[tokio::test]
    async fn compare_without_ids_is_bad_request() {
        let (status, _) =
            send(transparency_router(service()), get_request("/api/v1/compare?ids=")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn compare_accepts_posted_disclosures() {
        let payload = json!([
            {"name": "A", "pillar_scores": {"use_phase": 20.0}},
            {"name": "B", "pillar_scores": {"use_phase": 90.0}}
        ]);
        let (status, body) =
            send(transparency_router(service()), post_request("/api/v1/compare", payload)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["comparison"]["entries"][0]["result"]["company"], "B");
        assert_eq!(body["comparison"]["entries"][1]["rank"], 2);
        assert!(body["comparison"]["entries"][0].get("company_id").is_none());
    }

    #[tokio::test]
    async fn registry_failure_maps_to_internal_error() {
        let service = Arc::new(TransparencyService::new(
            TransparencyEngine::default(),
            Arc::new(UnavailableRegistry),
        ));
        let (status, payload) =
            send(transparency_router(service), get_request("/api/v1/companies")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(payload["error"]
            .as_str()
            .unwrap_or_default()
            .contains("dataset offline"));
    }
}
