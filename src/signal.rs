use crate::aggregate::VerdictPolicy;
use crate::classify::ClaimProfile;
use crate::types::{EvidenceItem, Stance};

/// Signed, weighted contribution of one evidence item. Computed once
/// per item and folded straight into the running aggregate.
#[derive(Debug, Clone, Copy)]
pub struct WeightedSignal {
    /// `semantic_sim * stance_conf`, always >= 0.
    pub weight: f64,
    /// Positive for support, negative for contradict. Neutral is zero
    /// except for relevant-but-unconfirming items on factual claims.
    pub signed: f64,
}

impl WeightedSignal {
    /// Contribution to the normalization denominator. A zero weight
    /// still counts an epsilon so a batch of weightless items cannot
    /// divide by zero.
    pub fn denominator(&self) -> f64 {
        if self.weight != 0.0 {
            self.weight.abs()
        } else {
            ZERO_WEIGHT_EPSILON
        }
    }
}

const ZERO_WEIGHT_EPSILON: f64 = 0.01;

pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Convert one evidence item into its weighted signal. Similarity gates
/// how much a stance matters; stance confidence gates how sure the
/// detector was.
pub fn weigh(item: &EvidenceItem, profile: &ClaimProfile, policy: &VerdictPolicy) -> WeightedSignal {
    let sim = clamp01(item.semantic_sim);
    let conf = clamp01(item.stance_conf);
    let weight = sim * conf;

    let signed = match item.stance {
        Stance::Support => weight,
        Stance::Contradict => -weight,
        Stance::Neutral => {
            // A relevant item that fails to confirm a checkable fact
            // mildly erodes confidence.
            if profile.factual && sim > policy.neutral_sim_gate {
                -policy.neutral_penalty * sim
            } else {
                0.0
            }
        }
    };

    WeightedSignal { weight, signed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    fn item(stance: Stance, sim: f64, conf: f64) -> EvidenceItem {
        EvidenceItem {
            url: None,
            publisher: None,
            snippet: "s".into(),
            semantic_sim: sim,
            stance,
            stance_conf: conf,
        }
    }

    #[test]
    fn support_and_contradict_are_symmetric() {
        let profile = classify("Is Pluto a planet?");
        let policy = VerdictPolicy::default();
        let s = weigh(&item(Stance::Support, 0.8, 0.5), &profile, &policy);
        let c = weigh(&item(Stance::Contradict, 0.8, 0.5), &profile, &policy);
        assert_eq!(s.weight, c.weight);
        assert_eq!(s.signed, -c.signed);
        assert!((s.signed - 0.4).abs() < 1e-12);
    }

    #[test]
    fn neutral_penalized_only_for_relevant_factual() {
        let policy = VerdictPolicy::default();
        let factual = classify("Is Pluto a planet?");
        let opinion = classify("Cats are better than dogs");

        let relevant = weigh(&item(Stance::Neutral, 0.8, 0.9), &factual, &policy);
        assert!((relevant.signed - (-0.08)).abs() < 1e-12);

        let irrelevant = weigh(&item(Stance::Neutral, 0.3, 0.9), &factual, &policy);
        assert_eq!(irrelevant.signed, 0.0);

        let non_factual = weigh(&item(Stance::Neutral, 0.8, 0.9), &opinion, &policy);
        assert_eq!(non_factual.signed, 0.0);
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        let profile = classify("Is Pluto a planet?");
        let policy = VerdictPolicy::default();
        let sig = weigh(&item(Stance::Support, 1.7, -0.5), &profile, &policy);
        assert_eq!(sig.weight, 0.0);
        let nan = weigh(&item(Stance::Support, f64::NAN, 1.0), &profile, &policy);
        assert_eq!(nan.weight, 0.0);
    }

    #[test]
    fn zero_weight_contributes_epsilon_to_denominator() {
        let profile = classify("Is Pluto a planet?");
        let policy = VerdictPolicy::default();
        let sig = weigh(&item(Stance::Support, 0.0, 0.9), &profile, &policy);
        assert_eq!(sig.signed, 0.0);
        assert!((sig.denominator() - 0.01).abs() < 1e-12);
    }
}
