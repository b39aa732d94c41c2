use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::aggregate::VerdictPolicy;
use crate::pipeline::{evaluate_claim, Evaluation};
use crate::rank::{RankedCandidate, Ranker};
use crate::search::Searcher;
use crate::stance::StanceScorer;
use crate::types::{Breakdown, EvidenceItem, Stance};

/// Shared state for the API: retrieval and scoring collaborators plus
/// the aggregation policy. All injected, so route tests run on fakes.
pub struct Engine {
    pub searcher: Arc<dyn Searcher>,
    pub ranker: Arc<dyn Ranker>,
    pub stance: Arc<dyn StanceScorer>,
    pub policy: VerdictPolicy,
    pub top_k: usize,
    pub serpapi_configured: bool,
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
struct TopMatch {
    publisher: Option<String>,
    url: Option<String>,
    snippet: String,
    semantic_sim: f64,
    stance: Stance,
    stance_conf: f64,
}

#[derive(Debug, Serialize)]
struct PredictResponse {
    ok: bool,
    input: String,
    verdict_percent: f64,
    verdict_label: String,
    verdict_machine_label: String,
    verdict_raw_label: String,
    verdict_summary: String,
    top_matches: Vec<TopMatch>,
    verdict_debug: DebugCounts,
}

#[derive(Debug, Serialize)]
struct DebugCounts {
    evidence_count: usize,
}

#[derive(Debug, Serialize)]
struct PredictDebugResponse {
    ok: bool,
    input: String,
    verdict_percent: f64,
    verdict_label: String,
    verdict_machine_label: String,
    verdict_raw_label: String,
    verdict_summary: String,
    ranked: Vec<RankedCandidate>,
    evidence: Vec<EvidenceItem>,
    aggregate_breakdown: Breakdown,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    ok: bool,
    serpapi_set: bool,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

fn truncate_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

type ApiError = (StatusCode, String);

async fn run_evaluation(
    engine: &Engine,
    claim: &str,
    verbose: bool,
) -> Result<Evaluation, ApiError> {
    let claim = claim.trim();
    if claim.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Empty text".to_string()));
    }
    evaluate_claim(
        engine.searcher.as_ref(),
        engine.ranker.as_ref(),
        engine.stance.as_ref(),
        &engine.policy,
        claim,
        engine.top_k,
        verbose,
    )
    .await
    .map_err(|err| {
        error!(%err, "search failed");
        (StatusCode::BAD_GATEWAY, format!("Search failed: {err}"))
    })
}

async fn health(State(engine): State<Arc<Engine>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        serpapi_set: engine.serpapi_configured,
    })
}

async fn predict(
    State(engine): State<Arc<Engine>>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let eval = run_evaluation(&engine, &req.text, false).await?;
    let top_matches = eval
        .evidence
        .iter()
        .take(5)
        .map(|e| TopMatch {
            publisher: e.publisher.clone(),
            url: e.url.clone(),
            snippet: truncate_chars(&e.snippet, 300),
            semantic_sim: round4(e.semantic_sim),
            stance: e.stance,
            stance_conf: round4(e.stance_conf),
        })
        .collect();
    info!(claim = %eval.claim, label = %eval.result.raw_label, "claim evaluated");
    Ok(Json(PredictResponse {
        ok: true,
        input: eval.claim,
        verdict_percent: round2(eval.result.percent),
        verdict_label: eval.mapping.label,
        verdict_machine_label: eval.mapping.machine_label,
        verdict_raw_label: eval.result.raw_label.to_string(),
        verdict_summary: eval.result.summary,
        top_matches,
        verdict_debug: DebugCounts {
            evidence_count: eval.evidence.len(),
        },
    }))
}

async fn predict_debug(
    State(engine): State<Arc<Engine>>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictDebugResponse>, ApiError> {
    let eval = run_evaluation(&engine, &req.text, true).await?;
    Ok(Json(PredictDebugResponse {
        ok: true,
        input: eval.claim,
        verdict_percent: round2(eval.result.percent),
        verdict_label: eval.mapping.label,
        verdict_machine_label: eval.mapping.machine_label,
        verdict_raw_label: eval.result.raw_label.to_string(),
        verdict_summary: eval.result.summary,
        ranked: eval.ranked,
        evidence: eval.evidence,
        aggregate_breakdown: eval.result.breakdown.unwrap_or_default(),
    }))
}

pub fn router(engine: Arc<Engine>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/predict", post(predict))
        .route("/predict_debug", post(predict_debug))
        .layer(CorsLayer::permissive())
        .with_state(engine)
}

pub async fn run_server(engine: Engine, addr: &str) -> anyhow::Result<()> {
    let app = router(Arc::new(engine));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
