use crate::classify::ClaimProfile;
use crate::types::RawLabel;

/// Confidence band derived from the percent alone.
pub fn confidence_band(percent: f64) -> &'static str {
    if percent >= 80.0 {
        "High confidence"
    } else if percent >= 60.0 {
        "Moderate confidence"
    } else if percent <= 20.0 {
        "High confidence (FALSE)"
    } else if percent <= 40.0 {
        "Low confidence"
    } else {
        "Uncertain"
    }
}

/// Deterministic one-line justification for the verdict, prefixed with
/// the confidence band. Counts are the signed-bucket counts from the
/// aggregation pass.
pub fn compose(
    raw_label: RawLabel,
    support_count: usize,
    contradict_count: usize,
    neutral_count: usize,
    profile: &ClaimProfile,
    percent: f64,
) -> String {
    let body = match raw_label {
        RawLabel::True => {
            if support_count >= 5 {
                format!("Found {support_count} supporting sources confirming this claim.")
            } else if support_count >= 2 {
                format!("Multiple sources ({support_count}) support this claim.")
            } else {
                "Evidence suggests this claim is likely true.".to_string()
            }
        }
        RawLabel::False => {
            if contradict_count >= 3 {
                format!("Found {contradict_count} sources contradicting this claim.")
            } else if contradict_count >= 1 {
                format!("{contradict_count} source(s) contradict this claim.")
            } else if profile.geographic {
                "This geographic claim appears to be incorrect.".to_string()
            } else if profile.factual {
                "No credible evidence supports this factual claim.".to_string()
            } else {
                "Limited or no credible evidence supporting this claim.".to_string()
            }
        }
        RawLabel::Mixture | RawLabel::Unverifiable => {
            if support_count > 0 && contradict_count > 0 {
                format!(
                    "Mixed evidence: {support_count} supporting, {contradict_count} contradicting. Review sources carefully."
                )
            } else if neutral_count >= 5 {
                "Insufficient evidence. Sources are unclear or off-topic.".to_string()
            } else {
                "Unable to verify. Limited relevant sources found.".to_string()
            }
        }
    };

    format!("{}. {}", confidence_band(percent), body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    #[test]
    fn band_thresholds() {
        assert_eq!(confidence_band(92.0), "High confidence");
        assert_eq!(confidence_band(80.0), "High confidence");
        assert_eq!(confidence_band(60.0), "Moderate confidence");
        assert_eq!(confidence_band(10.0), "High confidence (FALSE)");
        assert_eq!(confidence_band(35.0), "Low confidence");
        assert_eq!(confidence_band(50.0), "Uncertain");
    }

    #[test]
    fn true_summaries_grade_by_support() {
        let p = classify("Is Pluto a planet?");
        assert!(compose(RawLabel::True, 6, 0, 0, &p, 90.0)
            .ends_with("Found 6 supporting sources confirming this claim."));
        assert!(compose(RawLabel::True, 3, 0, 0, &p, 70.0)
            .ends_with("Multiple sources (3) support this claim."));
        assert!(compose(RawLabel::True, 1, 0, 0, &p, 62.0)
            .ends_with("Evidence suggests this claim is likely true."));
    }

    #[test]
    fn false_summaries_fall_back_by_claim_type() {
        let geo = classify("Is Florida in India?");
        assert!(compose(RawLabel::False, 0, 0, 2, &geo, 20.0)
            .ends_with("This geographic claim appears to be incorrect."));

        let factual = classify("Is Pluto a planet?");
        assert!(compose(RawLabel::False, 0, 0, 2, &factual, 20.0)
            .ends_with("No credible evidence supports this factual claim."));

        let opinion = classify("Brutalism looks unfriendly");
        assert!(compose(RawLabel::False, 0, 0, 2, &opinion, 20.0)
            .ends_with("Limited or no credible evidence supporting this claim."));

        assert!(compose(RawLabel::False, 0, 4, 0, &factual, 5.0)
            .ends_with("Found 4 sources contradicting this claim."));
        assert!(compose(RawLabel::False, 0, 1, 0, &factual, 15.0)
            .ends_with("1 source(s) contradict this claim."));
    }

    #[test]
    fn mixture_summaries() {
        let p = classify("The future is uncertain");
        assert!(compose(RawLabel::Mixture, 2, 3, 0, &p, 45.0)
            .ends_with("Mixed evidence: 2 supporting, 3 contradicting. Review sources carefully."));
        assert!(compose(RawLabel::Unverifiable, 0, 0, 6, &p, 45.0)
            .ends_with("Insufficient evidence. Sources are unclear or off-topic."));
        assert!(compose(RawLabel::Unverifiable, 0, 0, 1, &p, 45.0)
            .ends_with("Unable to verify. Limited relevant sources found."));
    }
}
