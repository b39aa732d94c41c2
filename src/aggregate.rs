use crate::classify::{classify, ClaimProfile};
use crate::signal::{clamp01, weigh, WeightedSignal};
use crate::summary;
use crate::types::{
    AggregateResult, Breakdown, EvidenceItem, ItemBreakdown, RawLabel, SourceRef, Stance,
};

/// Threshold table for verdict aggregation. The original project
/// iterated on these constants repeatedly, so they are configuration
/// rather than literals buried in the fold.
#[derive(Debug, Clone)]
pub struct VerdictPolicy {
    /// Similarity above which a neutral item on a factual claim is
    /// treated as relevant-but-unconfirming.
    pub neutral_sim_gate: f64,
    /// Scale of the negative push such an item gets.
    pub neutral_penalty: f64,
    /// Factual claims: at or below this, False.
    pub factual_false_cutoff: f64,
    /// Factual claims: at or above this, True.
    pub factual_true_cutoff: f64,
    /// Non-factual claims: |avg_conf| below this is a Mixture.
    pub mixture_band: f64,
    /// Forced avg_conf when a factual claim got only neutral items and
    /// no usable weight.
    pub all_neutral_factual_conf: f64,
    /// Factual claims with zero supporting items are capped at this.
    pub factual_no_support_cap: f64,
    /// Death-claim corroboration nudge: cap and per-similarity rate.
    pub death_nudge_cap: f64,
    pub death_nudge_rate: f64,
    /// Total weight at or below this counts as degenerate.
    pub degenerate_weight: f64,
    /// |avg_conf| below this, combined with degenerate weight, remaps
    /// to the conservative no-evidence verdict.
    pub degenerate_conf_band: f64,
    /// Percent reported for the no-evidence short-circuits.
    pub no_evidence_factual_percent: f64,
    pub no_evidence_percent: f64,
}

impl Default for VerdictPolicy {
    fn default() -> Self {
        Self {
            neutral_sim_gate: 0.5,
            neutral_penalty: 0.1,
            factual_false_cutoff: -0.05,
            factual_true_cutoff: 0.15,
            mixture_band: 0.10,
            all_neutral_factual_conf: -0.3,
            factual_no_support_cap: -0.2,
            death_nudge_cap: 0.25,
            death_nudge_rate: 0.15,
            degenerate_weight: 1e-12,
            degenerate_conf_band: 0.05,
            no_evidence_factual_percent: 20.0,
            no_evidence_percent: 25.0,
        }
    }
}

const DEATH_EVIDENCE_KEYWORDS: &[&str] = &[
    "died",
    "dies",
    "dead",
    "death",
    "passed away",
    "obituary",
    "killed",
    "assassinated",
    "assassination",
    "murdered",
    "shot",
];

fn snippet_has_death_evidence(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let t = text.to_lowercase();
    DEATH_EVIDENCE_KEYWORDS.iter().any(|k| t.contains(k))
}

/// Map the signed average confidence to the internal verdict label.
/// Factual claims get a tightened table: no strong support reads as
/// False, never Mixture.
fn map_avg_conf_to_label(avg_conf: f64, factual: bool, policy: &VerdictPolicy) -> RawLabel {
    if avg_conf.is_nan() {
        return RawLabel::Unverifiable;
    }
    if factual {
        if avg_conf <= policy.factual_false_cutoff {
            RawLabel::False
        } else if avg_conf >= policy.factual_true_cutoff {
            RawLabel::True
        } else {
            RawLabel::False
        }
    } else if avg_conf.abs() < policy.mixture_band {
        RawLabel::Mixture
    } else if avg_conf >= policy.mixture_band {
        RawLabel::True
    } else {
        RawLabel::False
    }
}

fn truncate_snippet(s: &str) -> String {
    s.chars().take(300).collect()
}

fn source_ref(it: &ItemBreakdown) -> SourceRef {
    SourceRef {
        publisher: it.publisher.clone(),
        url: it.url.clone(),
        snippet: it.snippet.clone(),
    }
}

/// Strongest item within a signed bucket: maximizes |signed| * weight,
/// first occurrence wins on ties.
fn pick_top<'a, I>(items: I) -> Option<&'a ItemBreakdown>
where
    I: Iterator<Item = &'a ItemBreakdown>,
{
    let mut best: Option<(&ItemBreakdown, f64)> = None;
    for it in items {
        let key = it.signed.abs() * it.weight;
        match best {
            Some((_, k)) if key <= k => {}
            _ => best = Some((it, key)),
        }
    }
    best.map(|(it, _)| it)
}

/// Aggregate with the default policy.
pub fn aggregate(claim: &str, evidence: &[EvidenceItem], verbose: bool) -> AggregateResult {
    aggregate_verdict(claim, evidence, verbose, &VerdictPolicy::default())
}

/// Fold scored, stance-labeled evidence into a single verdict.
///
/// Every input produces a well-formed result: malformed numeric fields
/// are clamped, empty and zero-weight evidence lists take conservative
/// short-circuits, and the percent is always within [0, 100].
pub fn aggregate_verdict(
    claim: &str,
    evidence: &[EvidenceItem],
    verbose: bool,
    policy: &VerdictPolicy,
) -> AggregateResult {
    let profile = classify(claim);

    if evidence.is_empty() {
        return no_evidence_result(&profile, verbose, policy);
    }

    let mut items: Vec<ItemBreakdown> = Vec::with_capacity(evidence.len());
    let mut total_weight = 0.0_f64;
    let mut signed_sum = 0.0_f64;

    for e in evidence {
        let sig: WeightedSignal = weigh(e, &profile, policy);
        items.push(ItemBreakdown {
            url: e.url.clone(),
            publisher: e.publisher.clone(),
            snippet: truncate_snippet(&e.snippet),
            semantic_sim: clamp01(e.semantic_sim),
            stance: e.stance,
            stance_conf: clamp01(e.stance_conf),
            weight: sig.weight,
            signed: sig.signed,
        });
        total_weight += sig.denominator();
        signed_sum += sig.signed;
    }

    let support_count = items.iter().filter(|i| i.stance == Stance::Support).count();
    let contradict_count = items
        .iter()
        .filter(|i| i.stance == Stance::Contradict)
        .count();
    let neutral_count = items.iter().filter(|i| i.stance == Stance::Neutral).count();

    let mut avg_conf = if total_weight <= policy.degenerate_weight {
        // No usable weight; fall back to raw stance counts.
        let total = items.len().max(1);
        if profile.factual && neutral_count == items.len() {
            policy.all_neutral_factual_conf
        } else {
            (support_count as f64 - contradict_count as f64) / total as f64
        }
    } else {
        (signed_sum / total_weight).clamp(-1.0, 1.0)
    };

    // Factual claims need positive evidence to escape False.
    if profile.factual && support_count == 0 {
        avg_conf = avg_conf.min(policy.factual_no_support_cap);
    }

    // Corroboration nudge for death claims: snippets that actually talk
    // about a death add back confidence proportional to their relevance.
    if profile.death_query {
        let death_strength: f64 = items
            .iter()
            .filter(|it| snippet_has_death_evidence(&it.snippet))
            .map(|it| it.semantic_sim)
            .sum();
        if death_strength > 0.0 {
            let nudge = policy.death_nudge_cap.min(death_strength * policy.death_nudge_rate);
            avg_conf = (avg_conf + nudge).min(1.0);
        }
    }

    let percent = (((avg_conf + 1.0) / 2.0) * 100.0).clamp(0.0, 100.0);
    let raw_label = map_avg_conf_to_label(avg_conf, profile.factual, policy);

    // Summary counts come from the signed buckets, not the raw stance
    // labels: a penalized neutral item reads as contradicting.
    let s_count = items.iter().filter(|i| i.signed > 0.0).count();
    let c_count = items.iter().filter(|i| i.signed < 0.0).count();
    let n_count = items.iter().filter(|i| i.signed.abs() < 0.01).count();

    let top_support = pick_top(items.iter().filter(|i| i.signed > 0.0)).map(source_ref);
    let top_contradict = pick_top(items.iter().filter(|i| i.signed < 0.0)).map(source_ref);

    // Degenerate remap: near-zero weight and near-zero confidence must
    // not surface as a confident verdict.
    let degenerate =
        total_weight <= policy.degenerate_weight && avg_conf.abs() < policy.degenerate_conf_band;

    let (raw_label, percent, summary) = if degenerate {
        if profile.factual {
            (
                RawLabel::False,
                policy.no_evidence_factual_percent,
                "No evidence supports this factual claim.".to_string(),
            )
        } else {
            (
                RawLabel::Unverifiable,
                policy.no_evidence_percent,
                "No strong evidence found. Unable to verify claim.".to_string(),
            )
        }
    } else {
        let text = summary::compose(raw_label, s_count, c_count, n_count, &profile, percent);
        (raw_label, percent, text)
    };

    let breakdown = verbose.then(|| Breakdown {
        items,
        total_weight,
        signed_sum,
        avg_conf: Some(avg_conf),
        support_count: s_count,
        contradict_count: c_count,
        neutral_count: n_count,
        top_support,
        top_contradict,
        is_factual: profile.factual,
        is_geographic: profile.geographic,
    });

    AggregateResult {
        raw_label,
        percent,
        summary,
        breakdown,
    }
}

fn no_evidence_result(
    profile: &ClaimProfile,
    verbose: bool,
    policy: &VerdictPolicy,
) -> AggregateResult {
    let (raw_label, percent, summary) = if profile.factual {
        (
            RawLabel::False,
            policy.no_evidence_factual_percent,
            "No evidence found supporting this claim.".to_string(),
        )
    } else {
        (
            RawLabel::Unverifiable,
            policy.no_evidence_percent,
            "No evidence found. Unable to verify claim.".to_string(),
        )
    };
    let breakdown = verbose.then(|| Breakdown {
        is_factual: profile.factual,
        is_geographic: profile.geographic,
        ..Breakdown::default()
    });
    AggregateResult {
        raw_label,
        percent,
        summary,
        breakdown,
    }
}
