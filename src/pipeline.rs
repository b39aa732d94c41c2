//! Glue between the retrieval collaborators and the aggregation core:
//! search, optional page scraping, ranking, stance scoring, and the
//! final verdict for one claim.

use anyhow::Result;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};

use crate::aggregate::{aggregate_verdict, VerdictPolicy};
use crate::config::Config;
use crate::labels::map_percent_to_label;
use crate::rank::{Candidate, RankedCandidate, Ranker};
use crate::scrape::extract_paragraphs;
use crate::search::Searcher;
use crate::stance::StanceScorer;
use crate::text::generate_queries;
use crate::types::{AggregateResult, EvidenceItem, VerdictMapping};

/// Full picture of one claim evaluation, including the intermediate
/// ranked candidates and evidence for the debug surface.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub claim: String,
    pub ranked: Vec<RankedCandidate>,
    pub evidence: Vec<EvidenceItem>,
    pub result: AggregateResult,
    pub mapping: VerdictMapping,
}

fn publisher_of(link: &str) -> Option<String> {
    url::Url::parse(link)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
}

/// Snippet mode: one search call, hits become candidates directly.
pub async fn collect_candidates(searcher: &dyn Searcher, claim: &str) -> Result<Vec<Candidate>> {
    let hits = searcher.search(claim).await?;
    Ok(hits
        .into_iter()
        .map(|h| {
            let text = format!("{} {}", h.title, h.snippet).trim().to_string();
            Candidate {
                url: Some(h.link),
                title: h.title,
                snippet: h.snippet,
                text,
            }
        })
        .collect())
}

/// How many query variants the deep path actually searches.
const DEEP_QUERY_COUNT: usize = 3;

/// Deep mode: search a few query variants, then fetch and extract the
/// result pages concurrently. Each URL gets its own timeout and any
/// individual failure just yields no evidence from that source.
pub async fn collect_deep_candidates(
    searcher: &dyn Searcher,
    http: &Client,
    claim: &str,
    cfg: &Config,
) -> Result<Vec<Candidate>> {
    let mut urls: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for query in generate_queries(claim).into_iter().take(DEEP_QUERY_COUNT) {
        match searcher.search(&query).await {
            Ok(hits) => {
                for h in hits {
                    if urls.len() >= cfg.max_urls {
                        break;
                    }
                    if seen.insert(h.link.clone()) {
                        urls.push(h.link);
                    }
                }
            }
            Err(err) => warn!(%query, %err, "search variant failed"),
        }
        if urls.len() >= cfg.max_urls {
            break;
        }
    }
    debug!(count = urls.len(), "deep candidate urls gathered");

    let timeout = Duration::from_millis(cfg.scrape_timeout_ms);
    let fetches = urls.into_iter().map(|u| async move {
        let paras = match tokio::time::timeout(timeout, extract_paragraphs(http, &u)).await {
            Ok(Ok(paras)) => paras,
            Ok(Err(err)) => {
                debug!(url = %u, %err, "scrape failed");
                Vec::new()
            }
            Err(_) => {
                debug!(url = %u, "scrape timed out");
                Vec::new()
            }
        };
        (u, paras)
    });

    let results = stream::iter(fetches)
        .buffer_unordered(cfg.scrape_concurrency)
        .collect::<Vec<_>>()
        .await;

    let mut candidates = Vec::new();
    for (u, paras) in results {
        for p in paras {
            candidates.push(Candidate {
                url: Some(u.clone()),
                title: String::new(),
                snippet: p.clone(),
                text: p,
            });
        }
    }
    Ok(candidates)
}

/// Turn ranked candidates into stance-labeled evidence. The stance
/// scorer owns both the label and its confidence.
pub fn build_evidence(
    claim: &str,
    ranked: &[RankedCandidate],
    stance: &dyn StanceScorer,
) -> Vec<EvidenceItem> {
    ranked
        .iter()
        .map(|r| {
            let snippet = if r.candidate.snippet.is_empty() {
                r.candidate.text.clone()
            } else {
                r.candidate.snippet.clone()
            };
            let verdict = stance.stance(claim, &snippet);
            EvidenceItem {
                publisher: r.candidate.url.as_deref().and_then(publisher_of),
                url: r.candidate.url.clone(),
                snippet,
                semantic_sim: r.score,
                stance: verdict.stance,
                stance_conf: verdict.confidence,
            }
        })
        .collect()
}

/// Fallback when ranking dies: first five candidates, unscored.
const UNRANKED_FALLBACK: usize = 5;

/// Rank, score stances, aggregate, and map the verdict for candidates
/// that have already been gathered.
pub fn evaluate_candidates(
    ranker: &dyn Ranker,
    stance: &dyn StanceScorer,
    policy: &VerdictPolicy,
    claim: &str,
    candidates: Vec<Candidate>,
    top_k: usize,
    verbose: bool,
) -> Evaluation {
    let top_k = top_k.min(candidates.len()).max(1);
    let ranked = match ranker.rank(claim, candidates.clone(), top_k) {
        Ok(ranked) => ranked,
        Err(err) => {
            warn!(%err, "ranking failed; using unranked candidates");
            candidates
                .into_iter()
                .take(UNRANKED_FALLBACK)
                .map(|candidate| RankedCandidate {
                    candidate,
                    score: 0.0,
                    raw_sim: 0.0,
                })
                .collect()
        }
    };

    let evidence = build_evidence(claim, &ranked, stance);
    let result = aggregate_verdict(claim, &evidence, verbose, policy);
    let mapping = map_percent_to_label(result.percent, result.raw_label);

    Evaluation {
        claim: claim.to_string(),
        ranked,
        evidence,
        result,
        mapping,
    }
}

/// End-to-end snippet-mode evaluation of one claim.
pub async fn evaluate_claim(
    searcher: &dyn Searcher,
    ranker: &dyn Ranker,
    stance: &dyn StanceScorer,
    policy: &VerdictPolicy,
    claim: &str,
    top_k: usize,
    verbose: bool,
) -> Result<Evaluation> {
    let candidates = collect_candidates(searcher, claim).await?;
    Ok(evaluate_candidates(
        ranker, stance, policy, claim, candidates, top_k, verbose,
    ))
}
