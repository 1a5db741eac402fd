//! Data types for the glucose decision engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Supported glucose meter range, mg/dL.
pub const GLUCOSE_MIN: i32 = 20;
pub const GLUCOSE_MAX: i32 = 600;
/// Maximum tracked time since injection, hours.
pub const HOURS_MAX: f64 = 12.0;

/// Glucose trend arrow as reported by the meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    RapidDrop,
    SlowDrop,
    Stable,
    SlowRise,
    RapidRise,
}

impl Trend {
    /// Any downward arrow.
    pub fn is_dropping(self) -> bool {
        matches!(self, Trend::RapidDrop | Trend::SlowDrop)
    }
}

/// Coarse proxy for the insulin-resistant (morning) vs insulin-sensitive
/// (evening) period. Defaulted from wall clock by the caller, overridable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    Morning,
    Evening,
}

/// Whether subcutaneous fluids were already given today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Hydration {
    #[default]
    None,
    Partial,
    Full,
}

/// Stomach fill state. A full stomach suppresses oral feeding the same
/// way a vomiting risk does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stomach {
    #[default]
    Empty,
    PartFull,
    Full,
}

/// One snapshot of inputs for a decision request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Reading {
    /// Current blood glucose in mg/dL (20-600)
    pub glucose_mg_dl: i32,
    /// Hours since the last insulin injection (0-12)
    pub hours_since_dose: f64,
    /// Meter trend arrow
    pub trend: Trend,
    /// Resistant vs sensitive period
    pub cycle_phase: CyclePhase,
    /// Recent vomiting or nausea
    #[serde(default)]
    pub vomit_risk: bool,
    /// Subcutaneous fluids given today
    #[serde(default)]
    pub hydration_status: Hydration,
    /// Stomach fill state
    #[serde(default)]
    pub stomach: Stomach,
}

impl Reading {
    /// Reject out-of-domain inputs instead of silently clamping them; a
    /// clamped value here could mask a dangerous misread.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(GLUCOSE_MIN..=GLUCOSE_MAX).contains(&self.glucose_mg_dl) {
            return Err(EngineError::GlucoseOutOfRange(self.glucose_mg_dl));
        }
        if !(0.0..=HOURS_MAX).contains(&self.hours_since_dose) {
            return Err(EngineError::HoursOutOfRange(self.hours_since_dose));
        }
        Ok(())
    }
}

/// Risk classification bucket. Mutually exclusive; resolved first-match-wins
/// in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Critical,
    LowWarning,
    LowMonitor,
    NadirDefense,
    EffectiveDrop,
    PhaseDefault,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Critical => "critical",
            RiskTier::LowWarning => "low_warning",
            RiskTier::LowMonitor => "low_monitor",
            RiskTier::NadirDefense => "nadir_defense",
            RiskTier::EffectiveDrop => "effective_drop",
            RiskTier::PhaseDefault => "phase_default",
        }
    }
}

/// Concrete feeding/dosing action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Sugar rubbed on the gums, bypassing the stomach
    MucosalSugar,
    /// Computed glucose-powder dose by mouth
    OralDose,
    /// Liquid-nutrition support during peak insulin effect
    BufferFeed,
    /// Watch, do not feed
    Observe,
    /// Normal meal schedule
    StandardFeed,
    /// Push water intake
    Hydrate,
    /// Deliberately do nothing; the drop is wanted
    NoIntervention,
}

/// Feeding/dosing recommendation for one reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub action: Action,
    /// Glucose powder dose in grams, one decimal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grams: Option<f64>,
    /// Accompanying liquid volume in mL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquid_ml: Option<f64>,
    pub detail: String,
}

/// One forecast point: projected vs recorded-baseline glucose at an
/// hour offset from the injection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionPoint {
    /// Hours after injection
    pub hour: u32,
    pub projected: f64,
    pub baseline: f64,
}

/// Meal volume against the gastric ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MealFit {
    Safe,
    NearLimit,
    Overload,
}

/// Input rejected before reaching the decision core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("glucose {0} mg/dL outside supported range {GLUCOSE_MIN}-{GLUCOSE_MAX}")]
    GlucoseOutOfRange(i32),
    #[error("hours since dose {0} outside supported range 0-{HOURS_MAX}")]
    HoursOutOfRange(f64),
    #[error("base stomach capacity {0} g must be positive")]
    NonPositiveCapacity(f64),
    #[error("cyst diameter {0} mm must not be negative")]
    NegativeDiameter(f64),
    #[error("proposed meal volume {0} g must be positive")]
    NonPositiveMeal(f64),
}

/// Request payload for a full decision evaluation.
#[derive(Debug, Deserialize, Serialize)]
pub struct EvaluateRequest {
    pub reading: Reading,
    /// Forecast horizon in hours
    #[serde(default = "default_horizon")]
    pub horizon_hours: u32,
    /// Optional meal-volume check run alongside the glucose decision
    #[serde(default)]
    pub meal: Option<MealCheck>,
}

/// Request payload for the projection endpoint.
#[derive(Debug, Deserialize, Serialize)]
pub struct ProjectRequest {
    pub reading: Reading,
    #[serde(default = "default_horizon")]
    pub horizon_hours: u32,
}

fn default_horizon() -> u32 {
    4
}

/// Meal-volume check against the gastric ceiling.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MealCheck {
    /// Baseline stomach capacity in grams
    pub base_capacity_g: f64,
    /// Cyst diameter in millimeters
    pub cyst_diameter_mm: f64,
    /// Proposed meal volume in grams; omit to get the ceiling only
    #[serde(default)]
    pub proposed_meal_g: Option<f64>,
}

/// Gastric ceiling result.
#[derive(Debug, Clone, Serialize)]
pub struct CapacityReport {
    /// Safe per-meal ceiling in grams
    pub max_meal_volume_g: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposed_meal_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<MealFit>,
}

/// Response payload for the projection endpoint.
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub points: Vec<ProjectionPoint>,
}

/// Response payload for a full decision evaluation.
#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    /// Tool identifier
    pub tool: &'static str,
    /// Tool version
    pub tool_version: &'static str,

    pub tier: RiskTier,
    pub narrative: String,
    pub recommendation: Recommendation,
    /// Forecast curve for the display layer
    pub projection: Vec<ProjectionPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal: Option<CapacityReport>,

    /// SHA256 hash of the request, for the caller's append-only log
    pub input_hash: String,
    /// Boundary timestamp, for the caller's append-only log
    pub evaluated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_defaults() {
        let reading: Reading = serde_json::from_str(
            r#"{"glucose_mg_dl":150,"hours_since_dose":6.0,"trend":"stable","cycle_phase":"morning"}"#,
        )
        .unwrap();

        assert!(!reading.vomit_risk);
        assert_eq!(reading.hydration_status, Hydration::None);
        assert_eq!(reading.stomach, Stomach::Empty);
        assert!(reading.validate().is_ok());
    }

    #[test]
    fn test_glucose_out_of_range() {
        let mut reading = Reading {
            glucose_mg_dl: 19,
            hours_since_dose: 6.0,
            trend: Trend::Stable,
            cycle_phase: CyclePhase::Morning,
            vomit_risk: false,
            hydration_status: Hydration::None,
            stomach: Stomach::Empty,
        };
        assert!(matches!(
            reading.validate(),
            Err(EngineError::GlucoseOutOfRange(19))
        ));

        reading.glucose_mg_dl = 601;
        assert!(reading.validate().is_err());

        reading.glucose_mg_dl = 20;
        assert!(reading.validate().is_ok());
        reading.glucose_mg_dl = 600;
        assert!(reading.validate().is_ok());
    }

    #[test]
    fn test_hours_out_of_range() {
        let reading = Reading {
            glucose_mg_dl: 150,
            hours_since_dose: 12.5,
            trend: Trend::Stable,
            cycle_phase: CyclePhase::Evening,
            vomit_risk: false,
            hydration_status: Hydration::None,
            stomach: Stomach::Empty,
        };
        assert!(matches!(
            reading.validate(),
            Err(EngineError::HoursOutOfRange(_))
        ));
    }

    #[test]
    fn test_horizon_default() {
        let request: ProjectRequest = serde_json::from_str(
            r#"{"reading":{"glucose_mg_dl":200,"hours_since_dose":2.0,"trend":"slow_drop","cycle_phase":"evening"}}"#,
        )
        .unwrap();
        assert_eq!(request.horizon_hours, 4);
    }

    #[test]
    fn test_dropping_trends() {
        assert!(Trend::RapidDrop.is_dropping());
        assert!(Trend::SlowDrop.is_dropping());
        assert!(!Trend::Stable.is_dropping());
        assert!(!Trend::SlowRise.is_dropping());
        assert!(!Trend::RapidRise.is_dropping());
    }
}
