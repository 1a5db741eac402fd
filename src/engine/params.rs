//! Tunable policy constants and the recorded reference curves.
//!
//! Everything a caretaker might retune lives here, loaded once at
//! startup and shared read-only. Policy changes (target glucose, carb
//! factor, nadir window) are configuration edits, not code edits.

use serde::Deserialize;

use super::models::CyclePhase;

/// Baseline value returned for hour offsets outside the recorded tables.
pub const CURVE_SENTINEL: f64 = 300.0;

/// Recorded glucose-by-hour tables, one per cycle phase. These are
/// literal logged readings, not a fitted model.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceCurve {
    pub morning: [f64; 12],
    pub evening: [f64; 12],
}

impl ReferenceCurve {
    /// Expected glucose at an integer hour offset since injection.
    /// Offsets outside 0-11 fall back to the sentinel.
    pub fn lookup(&self, phase: CyclePhase, hour: i64) -> f64 {
        let table = match phase {
            CyclePhase::Morning => &self.morning,
            CyclePhase::Evening => &self.evening,
        };
        usize::try_from(hour)
            .ok()
            .and_then(|h| table.get(h).copied())
            .unwrap_or(CURVE_SENTINEL)
    }
}

impl Default for ReferenceCurve {
    fn default() -> Self {
        Self {
            // Logged from the resistant (daytime) period
            morning: [
                318.0, 296.0, 274.0, 243.0, 212.0, 196.0, 188.0, 204.0, 232.0, 261.0, 287.0,
                305.0,
            ],
            // Logged from the sensitive (overnight) period
            evening: [
                302.0, 271.0, 238.0, 197.0, 158.0, 132.0, 121.0, 139.0, 168.0, 203.0, 241.0,
                268.0,
            ],
        }
    }
}

/// Engine policy constants with tunable thresholds.
#[derive(Debug, Clone, Deserialize)]
pub struct Parameters {
    /// mg/dL glucose rise per gram of glucose powder
    #[serde(default = "default_carb_factor")]
    pub carb_factor: f64,

    /// Safe-recovery target for low readings, mg/dL
    #[serde(default = "default_target_glucose")]
    pub target_glucose: f64,

    /// Peak insulin-effect window, hours after injection
    #[serde(default = "default_nadir_window")]
    pub nadir_window: (f64, f64),

    /// Safety multiplier on computed doses when the drop is rapid
    #[serde(default = "default_rapid_drop_buffer")]
    pub rapid_drop_buffer: f64,

    /// When set, a vomiting risk downgrades any computed oral dose to
    /// mucosal sugar in every tier, not just the warning band
    #[serde(default)]
    pub suppress_oral_on_vomit_everywhere: bool,

    #[serde(default)]
    pub reference_curve: ReferenceCurve,
}

fn default_carb_factor() -> f64 {
    5.0
}

fn default_target_glucose() -> f64 {
    150.0
}

fn default_nadir_window() -> (f64, f64) {
    (3.5, 6.0)
}

fn default_rapid_drop_buffer() -> f64 {
    1.2
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            carb_factor: default_carb_factor(),
            target_glucose: default_target_glucose(),
            nadir_window: default_nadir_window(),
            rapid_drop_buffer: default_rapid_drop_buffer(),
            suppress_oral_on_vomit_everywhere: false,
            reference_curve: ReferenceCurve::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_in_range() {
        let curve = ReferenceCurve::default();
        assert_eq!(curve.lookup(CyclePhase::Morning, 0), 318.0);
        assert_eq!(curve.lookup(CyclePhase::Evening, 6), 121.0);
        assert_eq!(curve.lookup(CyclePhase::Morning, 11), 305.0);
    }

    #[test]
    fn test_lookup_sentinel_fallback() {
        let curve = ReferenceCurve::default();
        assert_eq!(curve.lookup(CyclePhase::Morning, -1), CURVE_SENTINEL);
        assert_eq!(curve.lookup(CyclePhase::Evening, 12), CURVE_SENTINEL);
        assert_eq!(curve.lookup(CyclePhase::Evening, 40), CURVE_SENTINEL);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let params: Parameters = serde_json::from_str(r#"{"target_glucose":130.0}"#).unwrap();
        assert_eq!(params.target_glucose, 130.0);
        assert_eq!(params.carb_factor, 5.0);
        assert_eq!(params.nadir_window, (3.5, 6.0));
        assert!(!params.suppress_oral_on_vomit_everywhere);
    }
}
