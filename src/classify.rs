use regex::Regex;
use std::sync::LazyLock;

/// Claim category, decided once per evaluation and used to select the
/// aggregation policy (see `aggregate`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimType {
    Geographic,
    Role,
    Death,
    Numeric,
    Factual,
    Opinion,
}

/// Classification result. The predicates are independent of `kind`:
/// a death claim can also be factual, a geographic claim is always
/// factual, etc.
#[derive(Debug, Clone, Copy)]
pub struct ClaimProfile {
    pub kind: ClaimType,
    pub factual: bool,
    pub geographic: bool,
    pub death_query: bool,
}

// X and Y are one or two words each.
static GEO_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\bis\s+\w+(?:\s+\w+)?\s+in\s+\w+",
        r"\bis\s+\w+(?:\s+\w+)?\s+part\s+of\s+\w+",
        r"\bis\s+\w+(?:\s+\w+)?\s+located\s+in\s+\w+",
        r"\bdoes\s+\w+(?:\s+\w+)?\s+belong\s+to\s+\w+",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static IS_A_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bis\s+\w+\s+(a|an|the)\s+\w+").unwrap());

static HAS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bdoes\s+\w+\s+(have|contain|include)").unwrap());

static NUMERIC_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").unwrap());

const DEATH_CLAIM_KEYWORDS: &[&str] = &["dead", "died", "die", "killed", "assassinated", "murdered"];

/// Role/position words, shared with the stance heuristic's role-claim
/// handling.
pub(crate) const ROLE_KEYWORDS: &[&str] = &[
    "prime minister",
    "pm",
    "president",
    "ceo",
    "chairman",
    "minister",
    "leader",
    "head",
    "governor",
    "mayor",
    "king",
    "queen",
];

/// True for "X is in/part of/located in Y" style location claims.
pub fn is_geographic(claim: &str) -> bool {
    let c = claim.to_lowercase();
    GEO_PATTERNS.iter().any(|re| re.is_match(&c))
}

/// True for claims that are objectively checkable, where absence of
/// support reads as FALSE rather than UNVERIFIABLE.
pub fn is_factual(claim: &str) -> bool {
    if is_geographic(claim) {
        return true;
    }
    let c = claim.to_lowercase();
    IS_A_PATTERN.is_match(&c) || HAS_PATTERN.is_match(&c)
}

/// True when the claim asks about someone dying or being killed.
/// Triggers the corroboration nudge in the aggregator.
pub fn is_death_query(claim: &str) -> bool {
    let c = claim.to_lowercase();
    DEATH_CLAIM_KEYWORDS.iter().any(|k| c.contains(k))
}

fn mentions_role(claim: &str) -> bool {
    let c = claim.to_lowercase();
    ROLE_KEYWORDS.iter().any(|k| c.contains(k))
}

/// Classify a claim. Pure function of the input string.
pub fn classify(claim: &str) -> ClaimProfile {
    let geographic = is_geographic(claim);
    let factual = geographic || is_factual(claim);
    let death_query = is_death_query(claim);

    let kind = if geographic {
        ClaimType::Geographic
    } else if death_query {
        ClaimType::Death
    } else if mentions_role(claim) {
        ClaimType::Role
    } else if factual {
        ClaimType::Factual
    } else if NUMERIC_PATTERN.is_match(claim) {
        ClaimType::Numeric
    } else {
        ClaimType::Opinion
    };

    ClaimProfile {
        kind,
        factual,
        geographic,
        death_query,
    }
}
