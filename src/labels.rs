use crate::types::{RawLabel, VerdictMapping};

fn mapping(label: &str, machine_label: &str) -> VerdictMapping {
    VerdictMapping {
        label: label.to_string(),
        machine_label: machine_label.to_string(),
    }
}

fn uncertain() -> VerdictMapping {
    mapping("Uncertain — needs review", "uncertain")
}

/// Fixed table from (raw label, percent) to the user-facing verdict.
/// Pure lookup, kept apart from the aggregator so the display
/// thresholds can be tuned without touching aggregation.
pub fn map_percent_to_label(percent: f64, raw_label: RawLabel) -> VerdictMapping {
    match raw_label {
        RawLabel::Unverifiable => uncertain(),
        RawLabel::Mixture => {
            if percent < 40.0 {
                mapping("Conflicting / Unclear", "mixture_low_confidence")
            } else if percent < 60.0 {
                mapping("Conflicting — Mixed Signals", "mixture")
            } else {
                mapping("Conflicting but leaning", "mixture_high_confidence")
            }
        }
        RawLabel::True => {
            if percent >= 85.0 {
                mapping("Definitely True", "definitely_true")
            } else if percent >= 65.0 {
                mapping("Likely True", "likely_true")
            } else if percent >= 40.0 {
                mapping("Possibly True", "possibly_true")
            } else {
                uncertain()
            }
        }
        RawLabel::False => {
            if percent <= 15.0 {
                mapping("Definitely False", "definitely_false")
            } else if percent <= 35.0 {
                mapping("Likely False", "likely_false")
            } else if percent <= 60.0 {
                mapping("Possibly False", "possibly_false")
            } else {
                uncertain()
            }
        }
    }
}
