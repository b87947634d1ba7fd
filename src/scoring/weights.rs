use serde::{Deserialize, Serialize};

/// Points awarded per unit of activity and the cap on each component.
///
/// The default is the v1 heuristic; the three caps sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub points_per_tx: f64,
    pub max_tx_points: f64,
    pub points_per_active_day: f64,
    pub max_day_points: f64,
    pub points_per_protocol: f64,
    pub max_protocol_points: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            points_per_tx: 1.5,
            max_tx_points: 50.0,
            points_per_active_day: 2.5,
            max_day_points: 25.0,
            points_per_protocol: 5.0,
            max_protocol_points: 25.0,
        }
    }
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.max_tx_points + self.max_day_points + self.max_protocol_points
    }

    pub fn validate(&self) -> Result<(), String> {
        let total = self.total();
        if (total - 100.0).abs() > 0.01 {
            return Err(format!("Point caps must sum to 100, got {}", total));
        }

        if self.points_per_tx < 0.0
            || self.max_tx_points < 0.0
            || self.points_per_active_day < 0.0
            || self.max_day_points < 0.0
            || self.points_per_protocol < 0.0
            || self.max_protocol_points < 0.0
        {
            return Err("All weights must be non-negative".to_string());
        }

        Ok(())
    }
}
