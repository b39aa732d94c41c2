use anyhow::Result;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::Client;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::time::Duration;

/// One web search hit.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// Web search seam; the pipeline and server only see this trait.
#[async_trait::async_trait]
pub trait Searcher: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
}

#[derive(Debug, Deserialize)]
struct SerpApiHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SerpApiResp {
    #[serde(default)]
    organic_results: Vec<SerpApiHit>,
    #[serde(default)]
    news_results: Vec<SerpApiHit>,
}

/// SerpAPI client with a direct rate limiter, so burst traffic from the
/// server's fan-out cannot blow the search quota.
pub struct SerpApi {
    http: Client,
    key: String,
    limiter: DefaultDirectRateLimiter,
    num: usize,
}

const SERPAPI_URL: &str = "https://serpapi.com/search.json";

impl SerpApi {
    pub fn new(key: String, qps: u32, num: usize, timeout_ms: u64, user_agent: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .user_agent(user_agent)
            .build()?;
        let qps = NonZeroU32::new(qps).unwrap_or(nonzero!(1u32));
        let limiter = RateLimiter::direct(Quota::per_second(qps));
        Ok(Self { http, key, limiter, num })
    }
}

#[async_trait::async_trait]
impl Searcher for SerpApi {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        self.limiter.until_ready().await;
        let num = self.num.to_string();
        let resp = self
            .http
            .get(SERPAPI_URL)
            .query(&[
                ("q", query),
                ("api_key", self.key.as_str()),
                ("num", num.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<SerpApiResp>()
            .await?;

        let raw = if resp.organic_results.is_empty() {
            resp.news_results
        } else {
            resp.organic_results
        };

        let hits = raw
            .into_iter()
            .filter_map(|h| {
                let link = h.link.or(h.url)?;
                Some(SearchHit {
                    title: h.title,
                    link,
                    snippet: h.snippet.or(h.description).unwrap_or_default(),
                })
            })
            .take(self.num)
            .collect();
        Ok(hits)
    }
}
