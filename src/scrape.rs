use anyhow::Result;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::text::clean_text;

/// Paragraphs shorter than this are boilerplate (nav text, captions).
const MIN_PARAGRAPH_LEN: usize = 30;

/// Pull `<p>` paragraphs out of an HTML document.
pub fn paragraphs_from_html(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse("p").expect("static selector");
    doc.select(&selector)
        .map(|p| clean_text(&p.text().collect::<String>()))
        .filter(|t| t.len() > MIN_PARAGRAPH_LEN)
        .collect()
}

/// Fetch a page and extract its paragraphs. Failures surface as errors;
/// the caller treats them as "no evidence from that source".
pub async fn extract_paragraphs(http: &Client, url: &str) -> Result<Vec<String>> {
    let html = http.get(url).send().await?.error_for_status()?.text().await?;
    Ok(paragraphs_from_html(&html))
}
