//! What-if simulator: projected savings from reducing deviation drivers.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Fixed reference investment the ROI horizon pays back.
pub const REFERENCE_INVESTMENT: f64 = 100_000.0;

const DELAY_WEIGHT: f64 = 0.4;
const DAMAGE_WEIGHT: f64 = 0.4;
const ROUTE_WEIGHT: f64 = 0.2;

pub const MAX_DELAY_REDUCTION: f64 = 50.0;
pub const MAX_DAMAGE_REDUCTION: f64 = 50.0;
pub const MAX_ROUTE_SAVING: f64 = 30.0;

/// Reduction percentages chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub delay_reduction: f64,
    pub damage_reduction: f64,
    pub route_saving: f64,
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario {
            delay_reduction: 20.0,
            damage_reduction: 10.0,
            route_saving: 15.0,
        }
    }
}

impl Scenario {
    pub fn validate(&self) -> Result<()> {
        let bounds = [
            ("delay_reduction", self.delay_reduction, MAX_DELAY_REDUCTION),
            ("damage_reduction", self.damage_reduction, MAX_DAMAGE_REDUCTION),
            ("route_saving", self.route_saving, MAX_ROUTE_SAVING),
        ];
        for (name, value, max) in bounds {
            if !value.is_finite() || !(0.0..=max).contains(&value) {
                return Err(PipelineError::InvalidScenario(format!(
                    "{} must be between 0 and {}, got {}",
                    name, max, value
                )));
            }
        }
        Ok(())
    }
}

/// Months to recoup the reference investment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "months", rename_all = "snake_case")]
pub enum RoiHorizon {
    Months(f64),
    /// No projected saving, so the investment is never recouped.
    NotComputable,
}

impl RoiHorizon {
    pub fn months(&self) -> Option<f64> {
        match self {
            RoiHorizon::Months(m) => Some(*m),
            RoiHorizon::NotComputable => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationResult {
    pub scenario: Scenario,
    pub base_leakage: f64,
    pub simulated_saving: f64,
    pub new_baseline: f64,
    pub roi_horizon: RoiHorizon,
}

pub fn simulate(scenario: &Scenario, base_leakage: f64) -> Result<SimulationResult> {
    scenario.validate()?;

    let simulated_saving = base_leakage
        * (scenario.delay_reduction / 100.0 * DELAY_WEIGHT
            + scenario.damage_reduction / 100.0 * DAMAGE_WEIGHT
            + scenario.route_saving / 100.0 * ROUTE_WEIGHT);

    let roi_horizon = if simulated_saving == 0.0 {
        RoiHorizon::NotComputable
    } else {
        RoiHorizon::Months(REFERENCE_INVESTMENT / simulated_saving)
    };

    Ok(SimulationResult {
        scenario: *scenario,
        base_leakage,
        simulated_saving,
        new_baseline: base_leakage - simulated_saving,
        roi_horizon,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenario() {
        let result = simulate(&Scenario::default(), 1000.0).unwrap();
        assert!((result.simulated_saving - 150.0).abs() < 1e-9);
        assert!((result.new_baseline - 850.0).abs() < 1e-9);
        let months = result.roi_horizon.months().unwrap();
        assert!((months - 666.666_666).abs() < 1e-3);
    }

    #[test]
    fn test_zero_saving_is_not_computable() {
        let scenario = Scenario {
            delay_reduction: 0.0,
            damage_reduction: 0.0,
            route_saving: 0.0,
        };
        let result = simulate(&scenario, 1000.0).unwrap();
        assert_eq!(result.simulated_saving, 0.0);
        assert_eq!(result.new_baseline, 1000.0);
        assert_eq!(result.roi_horizon, RoiHorizon::NotComputable);
    }

    #[test]
    fn test_zero_base_leakage_is_not_computable() {
        let result = simulate(&Scenario::default(), 0.0).unwrap();
        assert_eq!(result.roi_horizon, RoiHorizon::NotComputable);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let scenario = Scenario {
            route_saving: 31.0,
            ..Scenario::default()
        };
        let err = simulate(&scenario, 1000.0).unwrap_err();
        assert!(err.to_string().contains("route_saving"));

        let scenario = Scenario {
            delay_reduction: f64::NAN,
            ..Scenario::default()
        };
        assert!(simulate(&scenario, 1000.0).is_err());
    }

    #[test]
    fn test_roi_horizon_serialization() {
        let json = serde_json::to_value(RoiHorizon::NotComputable).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "not_computable"}));
        let json = serde_json::to_value(RoiHorizon::Months(12.5)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "months", "months": 12.5}));
    }
}
