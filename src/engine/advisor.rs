//! Dosing recommendations.
//!
//! Maps the risk tier plus reading context to a concrete feeding action.
//! The only computed quantity is the rise-to-target powder dose; every
//! other branch is a fixed instruction.

use super::models::{
    Action, CyclePhase, Hydration, Reading, Recommendation, RiskTier, Stomach, Trend,
};
use super::params::Parameters;

/// Round to one decimal place.
fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Powder grams needed to lift the reading to the recovery target.
/// Rounds once after the division and again after the rapid-drop buffer;
/// reference outputs depend on both passes.
pub(crate) fn dose_toward_target(glucose: i32, trend: Trend, params: &Parameters) -> f64 {
    let needed_rise = params.target_glucose - glucose as f64;
    let mut grams = round1(needed_rise / params.carb_factor);
    if trend == Trend::RapidDrop {
        grams = round1(grams * params.rapid_drop_buffer);
    }
    grams
}

/// Produce the feeding/dosing recommendation for a classified reading.
pub fn advise(reading: &Reading, tier: RiskTier, params: &Parameters) -> Recommendation {
    let rec = match tier {
        RiskTier::Critical => Recommendation {
            action: Action::MucosalSugar,
            grams: None,
            liquid_ml: None,
            detail: "Rub 3-5 g of syrup or honey on the gums. Mucosal absorption only; \
                     no solids, no tube."
                .to_string(),
        },

        RiskTier::LowWarning => {
            if reading.vomit_risk || reading.stomach == Stomach::Full {
                Recommendation {
                    action: Action::MucosalSugar,
                    grams: None,
                    liquid_ml: None,
                    detail: "Rub about 2 g of syrup on the gums to stop the slide \
                             without loading the stomach."
                        .to_string(),
                }
            } else {
                oral_dose(reading, params)
            }
        }

        RiskTier::NadirDefense => match reading.cycle_phase {
            // Morning suppression dominates dosing even at the nadir.
            CyclePhase::Morning => morning_observe(true),
            CyclePhase::Evening => Recommendation {
                action: Action::BufferFeed,
                grams: None,
                liquid_ml: Some(10.0),
                detail: "Give 5-10 mL of liquid nutrition as slow-burning support \
                         through the peak-effect window."
                    .to_string(),
            },
        },

        RiskTier::LowMonitor => match reading.cycle_phase {
            CyclePhase::Morning => morning_observe(false),
            CyclePhase::Evening => {
                if reading.trend.is_dropping() {
                    oral_dose(reading, params)
                } else {
                    Recommendation {
                        action: Action::StandardFeed,
                        grams: None,
                        liquid_ml: None,
                        detail: "Numbers are steady; keep the normal feeding schedule \
                                 and avoid a rebound from overfeeding."
                            .to_string(),
                    }
                }
            }
        },

        RiskTier::EffectiveDrop => Recommendation {
            action: Action::NoIntervention,
            grams: None,
            liquid_ml: None,
            detail: "Let the drop continue. Do not feed and do not re-dose.".to_string(),
        },

        RiskTier::PhaseDefault => phase_default(reading, params),
    };

    // Configurable extension: a vomiting risk vetoes oral dosing in every
    // tier, not just the warning band.
    if params.suppress_oral_on_vomit_everywhere
        && reading.vomit_risk
        && rec.action == Action::OralDose
    {
        return Recommendation {
            action: Action::MucosalSugar,
            grams: None,
            liquid_ml: None,
            detail: "Vomiting risk: skip the oral dose and rub a small amount of sugar \
                     on the gums instead."
                .to_string(),
        };
    }

    rec
}

/// Resistant-phase low band: supplementation has never moved the curve
/// here, and a low reading is never treated with water.
fn morning_observe(at_nadir: bool) -> Recommendation {
    let mut detail = String::from(
        "Resistant phase: powder supplementation is ineffective here. Observe only; \
         do not add water for a low reading.",
    );
    if at_nadir {
        detail.push_str(" Peak-effect window; recheck within the half hour.");
    }
    Recommendation {
        action: Action::Observe,
        grams: None,
        liquid_ml: None,
        detail,
    }
}

fn oral_dose(reading: &Reading, params: &Parameters) -> Recommendation {
    let grams = dose_toward_target(reading.glucose_mg_dl, reading.trend, params);
    if grams <= 0.0 {
        // Already at or above target. Never emit a clamped zero dose.
        return Recommendation {
            action: Action::Observe,
            grams: None,
            liquid_ml: None,
            detail: "Already at or above the recovery target; hold the powder and \
                     recheck on the next reading."
                .to_string(),
        };
    }
    let liquid_ml = (grams * 3.0).round();
    Recommendation {
        action: Action::OralDose,
        grams: Some(grams),
        liquid_ml: Some(liquid_ml),
        detail: format!(
            "Syringe-feed {grams:.1} g of glucose powder mixed with about \
             {liquid_ml:.0} mL of water."
        ),
    }
}

/// Fallback band; the classifier only lands here at 180 mg/dL and above.
fn phase_default(reading: &Reading, params: &Parameters) -> Recommendation {
    match reading.cycle_phase {
        CyclePhase::Evening => Recommendation {
            action: Action::StandardFeed,
            grams: None,
            liquid_ml: None,
            detail: "This is the range we want overnight; keep the normal schedule."
                .to_string(),
        },
        CyclePhase::Morning => {
            if reading.trend.is_dropping() {
                // Not an effective drop (that tier is checked first), so
                // this is a moderate descent inside the resistant window.
                let mut detail = String::from(
                    "Coming down inside the resistant window; observe, no powder and \
                     no extra water.",
                );
                if reading.hours_since_dose < params.nadir_window.0 {
                    detail.push_str(
                        " Descent this soon after the injection deserves a speed \
                         check in 30 minutes.",
                    );
                }
                Recommendation {
                    action: Action::Observe,
                    grams: None,
                    liquid_ml: None,
                    detail,
                }
            } else {
                let mut detail = String::from(match reading.hydration_status {
                    Hydration::Full => {
                        "Subcutaneous fluids are already on board today; offer oral \
                         water only to help flush glucose."
                    }
                    _ => "Push water intake to help flush glucose; dilution is the \
                          play at this height.",
                });
                if reading.hours_since_dose > 10.0 {
                    detail.push_str(" Dose window is over: prepare the next meal and injection.");
                }
                Recommendation {
                    action: Action::Hydrate,
                    grams: None,
                    liquid_ml: None,
                    detail,
                }
            }
        }
    }
}
