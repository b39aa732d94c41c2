use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use super::support::{hit, FakeSearcher, FixedStance};
use crate::aggregate::VerdictPolicy;
use crate::rank::LexicalRanker;
use crate::server::{router, Engine};
use crate::types::Stance;

fn engine_with(searcher: FakeSearcher, stance: FixedStance) -> Arc<Engine> {
    Arc::new(Engine {
        searcher: Arc::new(searcher),
        ranker: Arc::new(LexicalRanker),
        stance: Arc::new(stance),
        policy: VerdictPolicy::default(),
        top_k: 10,
        serpapi_configured: true,
    })
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_search_configuration() {
    let app = router(engine_with(
        FakeSearcher::with_hits(vec![]),
        FixedStance { stance: Stance::Neutral, confidence: 0.0 },
    ));
    let resp = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let v: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(v["ok"], json!(true));
    assert_eq!(v["serpapi_set"], json!(true));
}

#[tokio::test]
async fn predict_returns_mapped_verdict_for_supporting_hits() {
    let hits = vec![
        hit("https://a.example/1", "harbor history", "the harbor froze in 1921"),
        hit("https://b.example/2", "archives", "harbor froze during the 1921 winter"),
        hit("https://c.example/3", "records", "ice closed the harbor in 1921"),
    ];
    let app = router(engine_with(
        FakeSearcher::with_hits(hits),
        FixedStance { stance: Stance::Support, confidence: 0.9 },
    ));
    let (status, v) = post_json(app, "/predict", json!({"text": "the harbor froze in 1921"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["ok"], json!(true));
    assert_eq!(v["verdict_raw_label"], json!("True"));
    let percent = v["verdict_percent"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&percent));
    assert_eq!(v["verdict_debug"]["evidence_count"], json!(3));
    assert_eq!(v["top_matches"].as_array().unwrap().len(), 3);
    assert!(v.get("aggregate_breakdown").is_none());
}

#[tokio::test]
async fn predict_debug_includes_breakdown_without_changing_verdict() {
    let hits = vec![
        hit("https://a.example/1", "t", "the harbor froze in 1921"),
        hit("https://b.example/2", "t", "harbor froze during the 1921 winter"),
    ];
    let claim = json!({"text": "the harbor froze in 1921"});

    let app = router(engine_with(
        FakeSearcher::with_hits(hits.clone()),
        FixedStance { stance: Stance::Support, confidence: 0.9 },
    ));
    let (_, compact) = post_json(app, "/predict", claim.clone()).await;

    let app = router(engine_with(
        FakeSearcher::with_hits(hits),
        FixedStance { stance: Stance::Support, confidence: 0.9 },
    ));
    let (status, debug) = post_json(app, "/predict_debug", claim).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(debug["verdict_raw_label"], compact["verdict_raw_label"]);
    assert_eq!(debug["verdict_percent"], compact["verdict_percent"]);
    assert_eq!(debug["verdict_summary"], compact["verdict_summary"]);
    let breakdown = &debug["aggregate_breakdown"];
    assert!(breakdown["items"].as_array().unwrap().len() == 2);
    assert!(breakdown["total_weight"].as_f64().unwrap() > 0.0);
    assert!(debug["ranked"].as_array().is_some());
}

#[tokio::test]
async fn empty_text_is_a_bad_request() {
    let app = router(engine_with(
        FakeSearcher::with_hits(vec![]),
        FixedStance { stance: Stance::Neutral, confidence: 0.0 },
    ));
    let (status, _) = post_json(app, "/predict", json!({"text": "   "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_failure_maps_to_bad_gateway() {
    let app = router(engine_with(
        FakeSearcher::failing(),
        FixedStance { stance: Stance::Neutral, confidence: 0.0 },
    ));
    let (status, _) = post_json(app, "/predict", json!({"text": "any claim"})).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn no_hits_yields_conservative_verdict() {
    let app = router(engine_with(
        FakeSearcher::with_hits(vec![]),
        FixedStance { stance: Stance::Neutral, confidence: 0.0 },
    ));
    let (status, v) = post_json(app, "/predict", json!({"text": "Is Florida in India?"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["verdict_raw_label"], json!("False"));
    assert_eq!(v["verdict_percent"], json!(20.0));
    assert_eq!(v["verdict_machine_label"], json!("likely_false"));
}
