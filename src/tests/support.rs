use anyhow::Result;

use crate::search::{SearchHit, Searcher};
use crate::stance::{StanceScorer, StanceVerdict};
use crate::types::Stance;

/// Searcher returning canned hits, or an error when `fail` is set.
pub struct FakeSearcher {
    pub results: Vec<SearchHit>,
    pub fail: bool,
}

impl FakeSearcher {
    pub fn with_hits(results: Vec<SearchHit>) -> Self {
        Self { results, fail: false }
    }

    pub fn failing() -> Self {
        Self { results: Vec::new(), fail: true }
    }
}

#[async_trait::async_trait]
impl Searcher for FakeSearcher {
    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>> {
        if self.fail {
            anyhow::bail!("search backend unavailable")
        }
        Ok(self.results.clone())
    }
}

/// Stance scorer that always answers the same thing.
pub struct FixedStance {
    pub stance: Stance,
    pub confidence: f64,
}

impl StanceScorer for FixedStance {
    fn stance(&self, _claim: &str, _snippet: &str) -> StanceVerdict {
        StanceVerdict {
            stance: self.stance,
            confidence: self.confidence,
        }
    }
}

pub fn hit(link: &str, title: &str, snippet: &str) -> SearchHit {
    SearchHit {
        title: title.to_string(),
        link: link.to_string(),
        snippet: snippet.to_string(),
    }
}
