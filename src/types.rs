use serde::{Deserialize, Serialize};

/// Stance of one evidence snippet toward the claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[serde(from = "String")]
pub enum Stance {
    Support,
    Contradict,
    #[default]
    Neutral,
}

impl From<String> for Stance {
    fn from(s: String) -> Self {
        Stance::parse(&s)
    }
}

impl Stance {
    /// Case-insensitive; unknown or empty strings fall back to neutral.
    pub fn parse(s: &str) -> Stance {
        match s.trim().to_ascii_lowercase().as_str() {
            "support" => Stance::Support,
            "contradict" => Stance::Contradict,
            _ => Stance::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stance::Support => "support",
            Stance::Contradict => "contradict",
            Stance::Neutral => "neutral",
        }
    }
}

/// One retrieved snippet, as produced by the upstream scorer. Immutable
/// once built; the aggregator only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceItem {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub semantic_sim: f64,
    #[serde(default)]
    pub stance: Stance,
    #[serde(default)]
    pub stance_conf: f64,
}

/// Internal verdict category before the user-facing remapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawLabel {
    True,
    False,
    Mixture,
    Unverifiable,
}

impl RawLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RawLabel::True => "True",
            RawLabel::False => "False",
            RawLabel::Mixture => "Mixture",
            RawLabel::Unverifiable => "Unverifiable",
        }
    }
}

impl std::fmt::Display for RawLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Short pointer to the strongest item on one side of the verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRef {
    pub publisher: Option<String>,
    pub url: Option<String>,
    pub snippet: String,
}

/// Per-item detail retained for verbose output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemBreakdown {
    pub url: Option<String>,
    pub publisher: Option<String>,
    pub snippet: String,
    pub semantic_sim: f64,
    pub stance: Stance,
    pub stance_conf: f64,
    pub weight: f64,
    pub signed: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Breakdown {
    pub items: Vec<ItemBreakdown>,
    pub total_weight: f64,
    pub signed_sum: f64,
    /// None when no averaged confidence exists (empty evidence list).
    pub avg_conf: Option<f64>,
    pub support_count: usize,
    pub contradict_count: usize,
    pub neutral_count: usize,
    pub top_support: Option<SourceRef>,
    pub top_contradict: Option<SourceRef>,
    pub is_factual: bool,
    pub is_geographic: bool,
}

/// Terminal output of one claim evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateResult {
    pub raw_label: RawLabel,
    pub percent: f64,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Breakdown>,
}

/// User-facing verdict label plus its machine-readable tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictMapping {
    pub label: String,
    pub machine_label: String,
}
