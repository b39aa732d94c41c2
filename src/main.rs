use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;

use fakeye::aggregate::VerdictPolicy;
use fakeye::config::Config;
use fakeye::pipeline::{collect_deep_candidates, evaluate_candidates, evaluate_claim};
use fakeye::rank::LexicalRanker;
use fakeye::search::SerpApi;
use fakeye::server::{run_server, Engine};
use fakeye::stance::LexicalStance;

#[derive(Parser)]
#[command(name = "fakeye", version, about = "Web-evidence claim verification")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run the HTTP API
    Serve {
        #[arg(long, default_value = "127.0.0.1:8000")]
        addr: String,
    },
    /// Evaluate a single claim and print the verdict as JSON
    Check {
        claim: String,
        /// Scrape result pages instead of using search snippets
        #[arg(long)]
        deep: bool,
        /// Include the full aggregation breakdown
        #[arg(long)]
        verbose: bool,
        #[arg(long, default_value_t = 10)]
        top_k: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fakeye=info")),
        )
        .init();

    let cfg = Config::from_env();
    if cfg.serpapi_key.is_empty() {
        tracing::warn!("SERPAPI_API_KEY not set; searches will fail");
    }
    let searcher = SerpApi::new(
        cfg.serpapi_key.clone(),
        cfg.search_qps,
        cfg.top_snippets,
        cfg.search_timeout_ms,
        &cfg.user_agent,
    )?;

    match Cli::parse().cmd {
        Cmd::Serve { addr } => {
            let engine = Engine {
                searcher: Arc::new(searcher),
                ranker: Arc::new(LexicalRanker),
                stance: Arc::new(LexicalStance),
                policy: VerdictPolicy::default(),
                top_k: cfg.top_snippets,
                serpapi_configured: !cfg.serpapi_key.is_empty(),
            };
            run_server(engine, &addr).await
        }
        Cmd::Check {
            claim,
            deep,
            verbose,
            top_k,
        } => {
            let policy = VerdictPolicy::default();
            let eval = if deep {
                let http = reqwest::Client::builder()
                    .timeout(Duration::from_millis(cfg.scrape_timeout_ms))
                    .user_agent(cfg.user_agent.clone())
                    .build()?;
                let candidates = collect_deep_candidates(&searcher, &http, &claim, &cfg).await?;
                evaluate_candidates(
                    &LexicalRanker,
                    &LexicalStance,
                    &policy,
                    &claim,
                    candidates,
                    top_k,
                    verbose,
                )
            } else {
                evaluate_claim(
                    &searcher,
                    &LexicalRanker,
                    &LexicalStance,
                    &policy,
                    &claim,
                    top_k,
                    verbose,
                )
                .await?
            };
            println!("{}", serde_json::to_string_pretty(&eval)?);
            Ok(())
        }
    }
}
