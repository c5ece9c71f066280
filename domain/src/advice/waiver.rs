//! Waiver wire advice

use super::common::{CONFIDENCE_RANGE, DEFAULT_CONFIDENCE, PLAYER_POINTS_MAX, Position, Projection};
use super::sanitize::{Fields, Sanitize};
use serde::{Deserialize, Serialize};

/// Claim priority, 1 = highest.
pub const PRIORITY_RANGE: std::ops::RangeInclusive<i64> = 1..=10;

/// Share of the remaining free-agent budget to bid.
pub const FAAB_PERCENT_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;

/// A player worth claiming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaiverTarget {
    pub player: String,
    pub position: Position,
    pub priority: i64,
    pub faab_bid_percent: f64,
    pub projection: Projection,
    pub reasoning: String,
}

impl Sanitize for WaiverTarget {
    fn fallback() -> Self {
        Self::from_fields(&Fields::empty())
    }

    fn from_fields(fields: &Fields<'_>) -> Self {
        Self {
            player: fields.text("player", "Unknown player"),
            position: fields.choice("position", Position::Unknown),
            priority: fields.integer("priority", PRIORITY_RANGE, 5),
            faab_bid_percent: fields.number("faab_bid_percent", FAAB_PERCENT_RANGE, 0.0),
            projection: Projection::from_fields_with_max(
                &fields.object("projection"),
                PLAYER_POINTS_MAX,
            ),
            reasoning: fields.text("reasoning", ""),
        }
    }
}

/// Waiver claims to place this week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaiverAdvice {
    /// Targets ordered by priority (ties keep the backend's order).
    pub targets: Vec<WaiverTarget>,
    pub drop_candidates: Vec<String>,
    pub confidence: f64,
    pub summary: String,
}

impl Sanitize for WaiverAdvice {
    fn fallback() -> Self {
        Self {
            targets: Vec::new(),
            drop_candidates: Vec::new(),
            confidence: 0.0,
            summary: "Waiver analysis is unavailable right now; prioritize players with \
                      expanded roles due to injuries."
                .to_string(),
        }
    }

    fn from_fields(fields: &Fields<'_>) -> Self {
        let mut targets: Vec<WaiverTarget> = fields.objects("targets");
        targets.sort_by_key(|t| t.priority);

        Self {
            targets,
            drop_candidates: fields.strings("drop_candidates"),
            confidence: fields.number("confidence", CONFIDENCE_RANGE, DEFAULT_CONFIDENCE),
            summary: fields.text("summary", "No summary provided."),
        }
    }
}
