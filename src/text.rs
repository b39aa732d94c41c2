/// Collapse runs of whitespace and trim.
pub fn clean_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

const QUERY_TEMPLATES: &[&str] = &[
    "{} who did it",
    "{} evidence",
    "{} fact check",
    "{} true or false",
    "{} explanation",
    "{} news",
];

const MAX_QUERIES: usize = 8;

/// Search query variants for a claim: the claim itself, a handful of
/// fixed templates, and a punctuation-stripped form when it differs.
pub fn generate_queries(claim: &str) -> Vec<String> {
    let q = claim.trim();
    let mut queries = vec![q.to_string()];
    for t in QUERY_TEMPLATES {
        queries.push(t.replace("{}", q));
    }
    let short: String = q
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    if short != q {
        queries.push(short);
    }
    queries.truncate(MAX_QUERIES);
    queries
}
