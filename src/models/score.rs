use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub tx_count: usize,
    pub active_days: usize,
    pub protocols_used: Vec<String>,
    pub score: u8,
    pub tier: ScoreTier,
}

impl ActivitySummary {
    pub fn empty() -> Self {
        Self {
            tx_count: 0,
            active_days: 0,
            protocols_used: Vec::new(),
            score: 0,
            tier: ScoreTier::Bronze,
        }
    }
}

/// Capped point components before rounding.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub tx_points: f64,
    pub day_points: f64,
    pub protocol_points: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.tx_points + self.day_points + self.protocol_points
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScoreTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl ScoreTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 85 => ScoreTier::Diamond,
            s if s >= 70 => ScoreTier::Platinum,
            s if s >= 55 => ScoreTier::Gold,
            s if s >= 40 => ScoreTier::Silver,
            _ => ScoreTier::Bronze,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreTier::Bronze => "Bronze",
            ScoreTier::Silver => "Silver",
            ScoreTier::Gold => "Gold",
            ScoreTier::Platinum => "Platinum",
            ScoreTier::Diamond => "Diamond",
        }
    }
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
