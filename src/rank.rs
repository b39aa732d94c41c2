use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One snippet candidate prior to ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub url: Option<String>,
    pub title: String,
    pub snippet: String,
    /// Title and snippet concatenated; the text the ranker scores.
    pub text: String,
}

/// A candidate with its relevance to the claim. `score` is min-max
/// normalized across the batch, `raw_sim` is the unnormalized value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub score: f64,
    pub raw_sim: f64,
}

/// Relevance ranking seam. An embedding-backed ranker can be injected
/// here; the default is lexical and cannot fail, but model-backed
/// implementations can, and callers degrade to unscored candidates.
pub trait Ranker: Send + Sync {
    fn rank(
        &self,
        claim: &str,
        candidates: Vec<Candidate>,
        top_k: usize,
    ) -> Result<Vec<RankedCandidate>>;
}

/// Word-overlap ranker. Counts claim words (longer than 3 chars) found
/// in each candidate, scaled by 0.4 so lexical matches never score as
/// high as a true semantic match would.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalRanker;

const LEXICAL_SCALE: f64 = 0.4;

impl Ranker for LexicalRanker {
    fn rank(
        &self,
        claim: &str,
        candidates: Vec<Candidate>,
        top_k: usize,
    ) -> Result<Vec<RankedCandidate>> {
        let claim_words: Vec<String> = claim
            .split_whitespace()
            .filter(|w| w.len() > 3)
            .map(|w| w.to_lowercase())
            .collect();

        let sims: Vec<f64> = candidates
            .iter()
            .map(|c| {
                if claim_words.is_empty() {
                    return 0.0;
                }
                let text = c.text.to_lowercase();
                let matches = claim_words.iter().filter(|w| text.contains(w.as_str())).count();
                (matches as f64 / claim_words.len() as f64) * LEXICAL_SCALE
            })
            .collect();

        let mn = sims.iter().copied().fold(f64::INFINITY, f64::min);
        let mx = sims.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let norm: Vec<f64> = if mx - mn > 1e-12 {
            sims.iter().map(|s| (s - mn) / (mx - mn)).collect()
        } else {
            sims.iter().map(|s| s.clamp(0.0, 1.0)).collect()
        };

        let mut order: Vec<usize> = (0..candidates.len()).collect();
        // Stable sort keeps original order among equal scores.
        order.sort_by(|&a, &b| norm[b].partial_cmp(&norm[a]).unwrap_or(std::cmp::Ordering::Equal));
        order.truncate(top_k.min(candidates.len()));

        let mut slots: Vec<Option<Candidate>> = candidates.into_iter().map(Some).collect();
        Ok(order
            .into_iter()
            .filter_map(|i| {
                slots[i].take().map(|candidate| RankedCandidate {
                    candidate,
                    score: norm[i],
                    raw_sim: sims[i],
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(text: &str) -> Candidate {
        Candidate {
            url: None,
            title: String::new(),
            snippet: text.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn relevant_candidates_rank_first() {
        let candidates = vec![
            cand("cooking pasta at home"),
            cand("florida hurricane season forecast"),
            cand("hurricane warnings issued across florida coast"),
        ];
        let ranked = LexicalRanker
            .rank("florida hurricane warnings", candidates, 3)
            .unwrap();
        assert_eq!(ranked.len(), 3);
        assert!(ranked[0].candidate.text.contains("warnings issued"));
        assert_eq!(ranked[0].score, 1.0);
        assert!(ranked[2].raw_sim <= ranked[1].raw_sim);
    }

    #[test]
    fn top_k_truncates() {
        let candidates = vec![cand("a"), cand("b"), cand("c")];
        let ranked = LexicalRanker.rank("some claim words", candidates, 2).unwrap();
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn uniform_scores_pass_through_unnormalized() {
        let candidates = vec![cand("irrelevant one"), cand("irrelevant two")];
        let ranked = LexicalRanker
            .rank("completely different topic", candidates, 2)
            .unwrap();
        assert!(ranked.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn empty_input_is_fine() {
        let ranked = LexicalRanker.rank("claim", Vec::new(), 5).unwrap();
        assert!(ranked.is_empty());
    }
}
