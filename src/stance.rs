//! Lexical stance detection. Verifies relationships between entities
//! rather than bare keyword presence: contradiction signals are checked
//! first, then weighted phrase matching with synonym handling, with a
//! stricter path for role/position claims.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::classify::ROLE_KEYWORDS;
use crate::types::Stance;

/// Stance label plus the detector's confidence in it.
#[derive(Debug, Clone, Copy)]
pub struct StanceVerdict {
    pub stance: Stance,
    pub confidence: f64,
}

/// Classifies one snippet's stance toward a claim. The aggregator never
/// calls this directly; the pipeline does, so tests can inject fakes.
pub trait StanceScorer: Send + Sync {
    fn stance(&self, claim: &str, snippet: &str) -> StanceVerdict;
}

const SYNONYMS: &[(&str, &str)] = &[
    ("united states", "usa"),
    ("united kingdom", "uk"),
    ("great britain", "uk"),
    ("britain", "uk"),
    ("people's republic of china", "china"),
    ("russian federation", "russia"),
];

const ENTITY_STOP_WORDS: &[&str] = &[
    "the", "is", "are", "was", "were", "a", "an", "of", "in", "on", "at", "to", "for", "this",
    "that", "these", "those", "and", "or", "but",
];

const CONTRADICTION_PATTERNS: &[&str] = &[
    "not true",
    "false",
    "hoax",
    "debunk",
    "fake",
    "lies",
    "no evidence",
    "incorrect",
    "never",
    "was not",
    "is not",
    "are not",
    "disputed",
    "unverified",
    "denied",
    "not the",
    "not a",
    "former",
    "ex-",
];

const PAST_TRANSITION_PATTERNS: &[&str] =
    &["lost", "defeated", "resigned", "stepped down", "left office"];

const CURRENT_CLAIM_WORDS: &[&str] = &["current", "currently", "now", "present", "today"];

const ROLE_SUPPORT_KEYWORDS: &[&str] = &[
    "confirmed",
    "verified",
    "official",
    "announced",
    "appointed",
    "elected",
    "sworn in",
    "inaugurated",
    "serves as",
    "continues to serve",
    "currently",
    "is the",
    "is a",
    "was inaugurated",
];

const GENERAL_SUPPORT_KEYWORDS: &[&str] = &[
    "confirmed",
    "verified",
    "official",
    "announced",
    "is the",
    "is a",
    "has been",
];

const LOCATION_WORDS: &[&str] = &[
    "india", "africa", "china", "usa", "america", "europe", "asia", "australia", "canada",
    "mexico", "brazil", "russia", "japan", "france", "germany", "spain", "italy", "uk", "britain",
];

static QUESTION_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(is|are|was|were|the|a|an|of|in|on|at|to)\b").unwrap());

/// Lowercase and fold common country/location aliases so "United
/// States" and "USA" match.
pub fn normalize_for_matching(text: &str) -> String {
    let mut t = text.to_lowercase();
    for (original, replacement) in SYNONYMS {
        t = t.replace(original, replacement);
    }
    t
}

/// Capitalized words and two-word runs, lowercased. A cheap stand-in
/// for proper NER.
pub fn extract_entities(text: &str) -> HashSet<String> {
    let clean: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect();
    let words: Vec<&str> = clean.split_whitespace().collect();

    let is_cap = |w: &str| w.chars().next().is_some_and(|c| c.is_uppercase());
    let is_stop = |w: &str| ENTITY_STOP_WORDS.contains(&w.to_lowercase().as_str());

    let mut entities = HashSet::new();
    for w in &words {
        if is_cap(w) && !is_stop(w) && w.len() > 1 {
            entities.insert(w.to_lowercase());
        }
    }
    for pair in words.windows(2) {
        if is_cap(pair[0]) && is_cap(pair[1]) && !is_stop(pair[0]) {
            entities.insert(format!("{} {}", pair[0].to_lowercase(), pair[1].to_lowercase()));
        }
    }
    entities
}

/// Weighted key phrases from a claim: trigrams weigh 3, bigrams 2,
/// single words 1. Filler words and punctuation are stripped first.
fn extract_key_phrases(text: &str) -> Vec<(String, f64)> {
    let lowered = text.to_lowercase();
    let no_fillers = QUESTION_WORDS.replace_all(&lowered, " ");
    let cleaned: String = no_fillers
        .chars()
        .filter(|c| !matches!(c, '?' | '!' | '.' | ',' | ';' | ':'))
        .collect();
    let words: Vec<&str> = cleaned.split_whitespace().filter(|w| w.len() > 2).collect();

    let mut phrases = Vec::new();
    for tri in words.windows(3) {
        phrases.push((tri.join(" "), 3.0));
    }
    for bi in words.windows(2) {
        phrases.push((bi.join(" "), 2.0));
    }
    for w in &words {
        phrases.push((w.to_string(), 1.0));
    }
    phrases
}

/// How well the snippet matches the claim as a whole: matched phrase
/// weight over total phrase weight, both synonym-normalized.
pub fn contextual_match_score(snippet: &str, claim: &str) -> f64 {
    let snippet_norm = normalize_for_matching(snippet);
    let claim_norm = normalize_for_matching(claim);
    let phrases = extract_key_phrases(&claim_norm);
    if phrases.is_empty() {
        return 0.0;
    }
    let total: f64 = phrases.iter().map(|(_, w)| w).sum();
    if total == 0.0 {
        return 0.0;
    }
    let matched: f64 = phrases
        .iter()
        .filter(|(p, _)| snippet_norm.contains(p.as_str()))
        .map(|(_, w)| w)
        .sum();
    matched / total
}

/// Explicit contradiction signals: negations aimed at the claim's
/// subject, past transitions against "current" claims, or the same
/// entity placed in a different location.
fn has_contradictory_context(snippet: &str, claim: &str) -> bool {
    let snippet_lower = snippet.to_lowercase();
    let claim_lower = claim.to_lowercase();

    let is_current_claim = CURRENT_CLAIM_WORDS.iter().any(|w| claim_lower.contains(w));

    for pattern in CONTRADICTION_PATTERNS {
        if snippet_lower.contains(pattern) && contextual_match_score(snippet, claim) >= 0.10 {
            return true;
        }
    }

    if is_current_claim {
        for pattern in PAST_TRANSITION_PATTERNS {
            if snippet_lower.contains(pattern) && contextual_match_score(snippet, claim) >= 0.10 {
                return true;
            }
        }
    }

    let claim_entities = extract_entities(claim);
    let snippet_entities = extract_entities(snippet);

    let claim_locations: HashSet<&String> = claim_entities
        .iter()
        .filter(|e| LOCATION_WORDS.contains(&e.as_str()))
        .collect();
    let snippet_locations: HashSet<&String> = snippet_entities
        .iter()
        .filter(|e| LOCATION_WORDS.contains(&e.as_str()))
        .collect();

    // Same person, different location reads as a contradiction.
    if !claim_locations.is_empty()
        && !snippet_locations.is_empty()
        && claim_locations.is_disjoint(&snippet_locations)
    {
        let shared_non_location = claim_entities
            .intersection(&snippet_entities)
            .any(|e| !LOCATION_WORDS.contains(&e.as_str()));
        if shared_non_location {
            return true;
        }
    }

    false
}

/// Keyword-and-phrase stance heuristic, the default scorer when no
/// model-backed detector is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalStance;

impl LexicalStance {
    fn detect(&self, claim: &str, snippet: &str) -> (Stance, f64) {
        if snippet.is_empty() || claim.is_empty() {
            return (Stance::Neutral, 0.0);
        }

        if has_contradictory_context(snippet, claim) {
            let score = contextual_match_score(snippet, claim);
            return (Stance::Contradict, score.clamp(0.10, 1.0));
        }

        let context_score = contextual_match_score(snippet, claim);
        let snippet_lower = snippet.to_lowercase();
        let claim_lower = claim.to_lowercase();

        let claim_has_role = ROLE_KEYWORDS.iter().any(|r| claim_lower.contains(r));
        if claim_has_role {
            let claim_entities = extract_entities(claim);
            let snippet_entities = extract_entities(snippet);
            let person_mentioned = !claim_entities.is_disjoint(&snippet_entities);
            let role_mentioned = ROLE_KEYWORDS.iter().any(|r| snippet_lower.contains(r));

            // Role claims need the person AND the role together, plus a
            // confirmation signal, before they count as support.
            if person_mentioned && role_mentioned && context_score >= 0.25 {
                let keyword_hit = ROLE_SUPPORT_KEYWORDS.iter().any(|k| snippet_lower.contains(k));
                if (keyword_hit && context_score >= 0.30) || context_score >= 0.55 {
                    return (Stance::Support, context_score);
                }
            }
            return (Stance::Neutral, context_score);
        }

        if context_score >= 0.3
            && GENERAL_SUPPORT_KEYWORDS.iter().any(|k| snippet_lower.contains(k))
        {
            return (Stance::Support, context_score);
        }

        if context_score >= 0.45 {
            (Stance::Support, context_score)
        } else {
            (Stance::Neutral, context_score)
        }
    }
}

impl StanceScorer for LexicalStance {
    fn stance(&self, claim: &str, snippet: &str) -> StanceVerdict {
        let (stance, confidence) = self.detect(claim, snippet);
        StanceVerdict {
            stance,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}
