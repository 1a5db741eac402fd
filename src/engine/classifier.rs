//! Risk classification.
//!
//! A first-match-wins chain of predicates over the reading. The order is
//! load-bearing: a reading below the shock threshold outranks every
//! trend or phase signal, and a high-but-falling reading must be
//! recognized as the dose working before the phase fallback can label
//! it "expected resistance".

use super::models::{CyclePhase, Reading, RiskTier, Stomach};
use super::params::Parameters;

/// Classify one reading into its risk tier and status narrative.
pub fn classify(reading: &Reading, params: &Parameters) -> (RiskTier, String) {
    let glucose = reading.glucose_mg_dl;

    if glucose < 60 {
        return (
            RiskTier::Critical,
            "Shock threshold. Rub sugar on the gums now; no oral or tube feeding, \
             aspiration risk."
                .to_string(),
        );
    }

    if glucose < 100 {
        let narrative = if reading.vomit_risk || reading.stomach == Stomach::Full {
            "Glucose low with gastric pressure or nausea; oral feeding would risk \
             vomiting. Mucosal sugar only."
        } else {
            "Glucose low, conscious, stomach has room. Fast carbohydrates will pull \
             the curve back up."
        };
        return (RiskTier::LowWarning, narrative.to_string());
    }

    if glucose < 180 {
        let (nadir_start, nadir_end) = params.nadir_window;
        let in_nadir = reading.hours_since_dose >= nadir_start
            && reading.hours_since_dose <= nadir_end;

        if in_nadir && reading.trend.is_dropping() {
            return (
                RiskTier::NadirDefense,
                "Peak insulin effect and still dropping; a buffering feed is needed \
                 to hold the floor."
                    .to_string(),
            );
        }
        let narrative = if reading.trend.is_dropping() {
            "In range but trending down; tighten observation to half-hour checks."
        } else {
            "In range and holding. No intervention needed."
        };
        return (RiskTier::LowMonitor, narrative.to_string());
    }

    // Checked before the phase fallback: high but falling means the dose
    // is finally working, not "expected resistance".
    if glucose > 300 && reading.trend.is_dropping() {
        return (
            RiskTier::EffectiveDrop,
            "High but falling: the injection is working. Let the drop continue."
                .to_string(),
        );
    }

    let narrative = match reading.cycle_phase {
        CyclePhase::Morning => {
            "Resistance phase; elevated readings are expected in this window."
        }
        CyclePhase::Evening => {
            "Sensitivity phase; watch for early-morning lows."
        }
    };
    (RiskTier::PhaseDefault, narrative.to_string())
}
