//! Start/sit advice

use super::common::{
    CONFIDENCE_RANGE, DEFAULT_CONFIDENCE, FACTOR_SCORE_RANGE, Factor, PLAYER_POINTS_MAX,
    Projection, RiskLevel,
};
use super::sanitize::{Fields, Sanitize};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Start/sit recommendation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartSitVerdict {
    Start,
    Sit,
    /// Too close to call.
    #[default]
    Neutral,
}

impl fmt::Display for StartSitVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StartSitVerdict::Start => "start",
            StartSitVerdict::Sit => "sit",
            StartSitVerdict::Neutral => "neutral",
        })
    }
}

impl FromStr for StartSitVerdict {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start" => Ok(StartSitVerdict::Start),
            "sit" | "bench" => Ok(StartSitVerdict::Sit),
            "neutral" | "toss-up" | "toss up" => Ok(StartSitVerdict::Neutral),
            _ => Err(()),
        }
    }
}

/// An alternative player weighed against the subject of the question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerComparison {
    pub player: String,
    pub projection: Projection,
    /// -2 (brutal matchup) ..= +2 (smash spot)
    pub matchup_score: f64,
}

impl Sanitize for PlayerComparison {
    fn fallback() -> Self {
        Self::from_fields(&Fields::empty())
    }

    fn from_fields(fields: &Fields<'_>) -> Self {
        Self {
            player: fields.text("player", "Unknown player"),
            projection: Projection::from_fields_with_max(
                &fields.object("projection"),
                PLAYER_POINTS_MAX,
            ),
            matchup_score: fields.number("matchup_score", FACTOR_SCORE_RANGE, 0.0),
        }
    }
}

/// Whether to start a given player this week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartSitAdvice {
    pub player: String,
    pub verdict: StartSitVerdict,
    pub projection: Projection,
    pub matchup_score: f64,
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub alternatives: Vec<PlayerComparison>,
    pub factors: Vec<Factor>,
    pub reasoning: String,
}

impl Sanitize for StartSitAdvice {
    fn fallback() -> Self {
        Self {
            player: "Unknown player".to_string(),
            verdict: StartSitVerdict::Neutral,
            projection: Projection::default(),
            matchup_score: 0.0,
            confidence: 0.0,
            risk_level: RiskLevel::Medium,
            alternatives: Vec::new(),
            factors: Vec::new(),
            reasoning: "Start/sit analysis is unavailable right now; check injury reports \
                        and projections before lock."
                .to_string(),
        }
    }

    fn from_fields(fields: &Fields<'_>) -> Self {
        Self {
            player: fields.text("player", "Unknown player"),
            verdict: fields.choice("verdict", StartSitVerdict::Neutral),
            projection: Projection::from_fields_with_max(
                &fields.object("projection"),
                PLAYER_POINTS_MAX,
            ),
            matchup_score: fields.number("matchup_score", FACTOR_SCORE_RANGE, 0.0),
            confidence: fields.number("confidence", CONFIDENCE_RANGE, DEFAULT_CONFIDENCE),
            risk_level: fields.choice("risk_level", RiskLevel::Medium),
            alternatives: fields.objects("alternatives"),
            factors: fields.objects("factors"),
            reasoning: fields.text("reasoning", "No reasoning provided."),
        }
    }
}
