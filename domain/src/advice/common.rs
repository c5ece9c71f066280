//! Building blocks shared by every advice variant.

use super::sanitize::{Fields, Sanitize};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Confidence is a probability-like score.
pub const CONFIDENCE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=1.0;

/// Default confidence when the backend does not state one.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Factor scores run from strongly negative (-2) to strongly positive (+2).
pub const FACTOR_SCORE_RANGE: std::ops::RangeInclusive<f64> = -2.0..=2.0;

/// Upper bound for a single player's weekly fantasy points.
pub const PLAYER_POINTS_MAX: f64 = 60.0;

/// Upper bound for a full lineup's weekly fantasy points.
pub const LINEUP_POINTS_MAX: f64 = 300.0;

/// Risk classification of a recommendation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" | "moderate" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            _ => Err(()),
        }
    }
}

/// Roster position of a player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    Qb,
    Rb,
    Wr,
    Te,
    K,
    Def,
    #[default]
    Unknown,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Qb => "QB",
            Position::Rb => "RB",
            Position::Wr => "WR",
            Position::Te => "TE",
            Position::K => "K",
            Position::Def => "DEF",
            Position::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "QB" => Ok(Position::Qb),
            "RB" => Ok(Position::Rb),
            "WR" => Ok(Position::Wr),
            "TE" => Ok(Position::Te),
            "K" | "PK" => Ok(Position::K),
            "DEF" | "DST" | "D/ST" => Ok(Position::Def),
            _ => Err(()),
        }
    }
}

/// Floor / expected / ceiling fantasy point projection.
///
/// Each bound is clamped to `0..=max` and the triple is reordered so that
/// `floor <= expected <= ceiling` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub floor: f64,
    pub expected: f64,
    pub ceiling: f64,
}

impl Projection {
    pub fn new(floor: f64, expected: f64, ceiling: f64) -> Self {
        let mut bounds = [floor, expected, ceiling];
        bounds.sort_by(|a, b| a.total_cmp(b));
        Self {
            floor: bounds[0],
            expected: bounds[1],
            ceiling: bounds[2],
        }
    }

    /// Read a projection object whose bounds may not exceed `max` points.
    pub fn from_fields_with_max(fields: &Fields<'_>, max: f64) -> Self {
        let expected = fields.number("expected", 0.0..=max, 0.0);
        let floor = fields.number("floor", 0.0..=max, expected);
        let ceiling = fields.number("ceiling", 0.0..=max, expected);
        Self::new(floor, expected, ceiling)
    }

    pub fn spread(&self) -> f64 {
        self.ceiling - self.floor
    }
}

/// A single scored consideration behind a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub name: String,
    /// -2 (strong negative) ..= +2 (strong positive)
    pub score: f64,
    pub note: String,
}

impl Sanitize for Factor {
    fn fallback() -> Self {
        Self {
            name: "unspecified".to_string(),
            score: 0.0,
            note: String::new(),
        }
    }

    fn from_fields(fields: &Fields<'_>) -> Self {
        Self {
            name: fields.text("name", "unspecified"),
            score: fields.number("score", FACTOR_SCORE_RANGE, 0.0),
            note: fields.text("note", ""),
        }
    }
}
