//! Short-horizon glucose forecast.
//!
//! Anchors the recorded reference curve to the current reading and lets
//! the trend arrow bend the forecast away from it, with the trend's
//! influence compounding over forecast distance. Produced as a lazy,
//! finite iterator; cloning restarts it, and identical inputs always
//! yield identical points.

use super::models::{CyclePhase, ProjectionPoint, Reading, Trend};
use super::params::{Parameters, ReferenceCurve};

/// mg/dL per hour pressure of each trend arrow on the forecast.
fn trend_slope(trend: Trend) -> f64 {
    match trend {
        Trend::RapidDrop => -20.0,
        Trend::SlowDrop => -10.0,
        Trend::Stable => 0.0,
        Trend::SlowRise => 10.0,
        Trend::RapidRise => 20.0,
    }
}

/// Forecast iterator over `(hour, projected, baseline)` points.
#[derive(Debug, Clone)]
pub struct Projection<'a> {
    curve: &'a ReferenceCurve,
    phase: CyclePhase,
    offset: f64,
    slope: f64,
    start_hour: i64,
    step: u32,
    horizon: u32,
}

impl Iterator for Projection<'_> {
    type Item = ProjectionPoint;

    fn next(&mut self) -> Option<ProjectionPoint> {
        if self.step > self.horizon {
            return None;
        }
        let future_hour = self.start_hour + i64::from(self.step);
        if future_hour > 11 {
            // The recorded tables end at hour 11; truncate rather than
            // extrapolate from the sentinel.
            return None;
        }
        let baseline = self.curve.lookup(self.phase, future_hour);
        let projected = baseline + self.offset + self.slope * f64::from(self.step) * 0.5;
        self.step += 1;
        Some(ProjectionPoint {
            hour: future_hour as u32,
            projected,
            baseline,
        })
    }
}

/// Build the forecast for `horizon_hours` hours ahead of the reading.
pub fn project<'a>(
    reading: &Reading,
    params: &'a Parameters,
    horizon_hours: u32,
) -> Projection<'a> {
    let start_hour = reading.hours_since_dose.floor() as i64;
    let baseline_now = params.reference_curve.lookup(reading.cycle_phase, start_hour);
    Projection {
        curve: &params.reference_curve,
        phase: reading.cycle_phase,
        offset: f64::from(reading.glucose_mg_dl) - baseline_now,
        slope: trend_slope(reading.trend),
        start_hour,
        step: 0,
        horizon: horizon_hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::models::{Hydration, Stomach};
    use crate::engine::params::CURVE_SENTINEL;

    fn reading(glucose: i32, hours: f64, trend: Trend, phase: CyclePhase) -> Reading {
        Reading {
            glucose_mg_dl: glucose,
            hours_since_dose: hours,
            trend,
            cycle_phase: phase,
            vomit_risk: false,
            hydration_status: Hydration::None,
            stomach: Stomach::Empty,
        }
    }

    #[test]
    fn test_offset_follows_baseline_when_stable() {
        let params = Parameters::default();
        // 20 above the hour-0 morning baseline
        let glucose = params.reference_curve.morning[0] as i32 + 20;
        let points: Vec<_> =
            project(&reading(glucose, 0.0, Trend::Stable, CyclePhase::Morning), &params, 4)
                .collect();

        assert_eq!(points.len(), 5);
        for (i, point) in points.iter().enumerate() {
            assert_eq!(point.hour, i as u32);
            assert_eq!(point.baseline, params.reference_curve.morning[i]);
            assert_eq!(point.projected, point.baseline + 20.0);
        }
    }

    #[test]
    fn test_trend_influence_compounds() {
        let params = Parameters::default();
        let glucose = params.reference_curve.evening[2] as i32;
        let points: Vec<_> =
            project(&reading(glucose, 2.0, Trend::RapidDrop, CyclePhase::Evening), &params, 4)
                .collect();

        // offset is zero, so the divergence from baseline is purely the
        // compounding trend term: -20 * i * 0.5
        for (i, point) in points.iter().enumerate() {
            assert_eq!(point.projected - point.baseline, -20.0 * i as f64 * 0.5);
        }
    }

    #[test]
    fn test_truncates_at_table_end() {
        let params = Parameters::default();
        let points: Vec<_> =
            project(&reading(250, 10.0, Trend::Stable, CyclePhase::Morning), &params, 4)
                .collect();

        // Hours 10 and 11 only; never indexes past the table domain.
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].hour, 10);
        assert_eq!(points[1].hour, 11);
    }

    #[test]
    fn test_empty_past_table_domain() {
        let params = Parameters::default();
        let points: Vec<_> =
            project(&reading(250, 12.0, Trend::Stable, CyclePhase::Morning), &params, 4)
                .collect();
        assert!(points.is_empty());
    }

    #[test]
    fn test_fractional_hours_floor_to_start() {
        let params = Parameters::default();
        let points: Vec<_> =
            project(&reading(200, 6.5, Trend::Stable, CyclePhase::Evening), &params, 2)
                .collect();
        assert_eq!(points[0].hour, 6);
        assert_eq!(points[0].baseline, params.reference_curve.evening[6]);
    }

    #[test]
    fn test_offset_against_sentinel_when_curve_missing() {
        let params = Parameters::default();
        let input = reading(250, 11.9, Trend::Stable, CyclePhase::Evening);
        let points: Vec<_> = project(&input, &params, 4).collect();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].hour, 11);
        assert_eq!(points[0].baseline, params.reference_curve.evening[11]);

        // Anchored one past the table: baseline_now is the sentinel.
        let input = reading(250, 12.0, Trend::Stable, CyclePhase::Evening);
        let projection = project(&input, &params, 4);
        assert_eq!(projection.offset, 250.0 - CURVE_SENTINEL);
    }

    #[test]
    fn test_restartable_and_deterministic() {
        let params = Parameters::default();
        let input = reading(180, 3.0, Trend::SlowRise, CyclePhase::Morning);

        let projection = project(&input, &params, 4);
        let first: Vec<_> = projection.clone().collect();
        let second: Vec<_> = projection.collect();
        assert_eq!(first, second);

        let third: Vec<_> = project(&input, &params, 4).collect();
        assert_eq!(first, third);
    }
}
