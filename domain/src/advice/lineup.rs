//! Lineup optimization advice

use super::common::{
    CONFIDENCE_RANGE, DEFAULT_CONFIDENCE, Factor, LINEUP_POINTS_MAX, PLAYER_POINTS_MAX,
    Projection, RiskLevel,
};
use super::sanitize::{Fields, Sanitize};
use serde::{Deserialize, Serialize};

/// One filled lineup slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupSlot {
    /// Slot label as used by the league (e.g. "QB", "FLEX").
    pub slot: String,
    pub player: String,
    pub projection: Projection,
    pub reasoning: String,
}

impl Sanitize for LineupSlot {
    fn fallback() -> Self {
        Self::from_fields(&Fields::empty())
    }

    fn from_fields(fields: &Fields<'_>) -> Self {
        Self {
            slot: fields.text("slot", "FLEX"),
            player: fields.text("player", "Unknown player"),
            projection: Projection::from_fields_with_max(
                &fields.object("projection"),
                PLAYER_POINTS_MAX,
            ),
            reasoning: fields.text("reasoning", ""),
        }
    }
}

/// Recommended starting lineup for a week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupAdvice {
    pub starters: Vec<LineupSlot>,
    pub bench: Vec<String>,
    pub projected_total: Projection,
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub key_factors: Vec<Factor>,
    pub summary: String,
}

impl Sanitize for LineupAdvice {
    fn fallback() -> Self {
        Self {
            starters: Vec::new(),
            bench: Vec::new(),
            projected_total: Projection::default(),
            confidence: 0.0,
            risk_level: RiskLevel::Medium,
            key_factors: Vec::new(),
            summary: "Lineup analysis is unavailable right now; start your highest projected \
                      healthy players."
                .to_string(),
        }
    }

    fn from_fields(fields: &Fields<'_>) -> Self {
        Self {
            starters: fields.objects("starters"),
            bench: fields.strings("bench"),
            projected_total: Projection::from_fields_with_max(
                &fields.object("projected_total"),
                LINEUP_POINTS_MAX,
            ),
            confidence: fields.number("confidence", CONFIDENCE_RANGE, DEFAULT_CONFIDENCE),
            risk_level: fields.choice("risk_level", RiskLevel::Medium),
            key_factors: fields.objects("key_factors"),
            summary: fields.text("summary", "No summary provided."),
        }
    }
}
