use std::env;

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub serpapi_key: String,
    pub max_urls: usize,
    pub top_snippets: usize,
    pub user_agent: String,
    pub search_qps: u32,
    pub search_timeout_ms: u64,
    pub scrape_timeout_ms: u64,
    pub scrape_concurrency: usize,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            serpapi_key: env::var("SERPAPI_API_KEY").unwrap_or_default(),
            max_urls: env_parse("MAX_URLS", 20),
            top_snippets: env_parse("TOP_SNIPPETS", 10),
            user_agent: env::var("USER_AGENT")
                .unwrap_or_else(|_| "Mozilla/5.0 FakeyeBot/1.0".to_string()),
            search_qps: env_parse("SEARCH_QPS", 2),
            search_timeout_ms: env_parse("SEARCH_TIMEOUT_MS", 15_000),
            scrape_timeout_ms: env_parse("SCRAPE_TIMEOUT_MS", 15_000),
            scrape_concurrency: env_parse("SCRAPE_CONCURRENCY", 8),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        // env vars are process-global; only probe keys tests never set
        let c = Config::from_env();
        assert!(c.top_snippets > 0);
        assert!(c.scrape_concurrency > 0);
        assert!(!c.user_agent.is_empty());
    }

    #[test]
    fn env_parse_falls_back_on_garbage() {
        std::env::set_var("FAKEYE_TEST_GARBAGE", "not-a-number");
        let v: usize = env_parse("FAKEYE_TEST_GARBAGE", 7);
        assert_eq!(v, 7);
        std::env::remove_var("FAKEYE_TEST_GARBAGE");
    }
}
