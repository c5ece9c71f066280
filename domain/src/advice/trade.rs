//! Trade evaluation advice

use super::common::{CONFIDENCE_RANGE, DEFAULT_CONFIDENCE, Factor, RiskLevel};
use super::sanitize::{Fields, Sanitize};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rest-of-season trade value is expressed on a 0..=100 scale.
pub const TRADE_VALUE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;

/// Net value change for the asking team, -100..=100.
pub const VALUE_DELTA_RANGE: std::ops::RangeInclusive<f64> = -100.0..=100.0;

/// What to do with a trade offer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeVerdict {
    Accept,
    #[default]
    Reject,
    Counter,
}

impl fmt::Display for TradeVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TradeVerdict::Accept => "accept",
            TradeVerdict::Reject => "reject",
            TradeVerdict::Counter => "counter",
        })
    }
}

impl FromStr for TradeVerdict {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accept" => Ok(TradeVerdict::Accept),
            "reject" | "decline" => Ok(TradeVerdict::Reject),
            "counter" | "counteroffer" | "counter-offer" => Ok(TradeVerdict::Counter),
            _ => Err(()),
        }
    }
}

/// Evaluation of a proposed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeAdvice {
    pub verdict: TradeVerdict,
    pub giving: Vec<String>,
    pub receiving: Vec<String>,
    pub giving_value: f64,
    pub receiving_value: f64,
    pub value_delta: f64,
    /// 0 (lopsided) ..= 1 (perfectly even)
    pub fairness_score: f64,
    pub counter_offer: Option<String>,
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub factors: Vec<Factor>,
    pub summary: String,
}

impl Sanitize for TradeAdvice {
    fn fallback() -> Self {
        Self {
            verdict: TradeVerdict::Reject,
            giving: Vec::new(),
            receiving: Vec::new(),
            giving_value: 0.0,
            receiving_value: 0.0,
            value_delta: 0.0,
            fairness_score: 0.5,
            counter_offer: None,
            confidence: 0.0,
            risk_level: RiskLevel::High,
            factors: Vec::new(),
            summary: "Trade analysis is unavailable right now; hold off on accepting until \
                      it can be evaluated."
                .to_string(),
        }
    }

    fn from_fields(fields: &Fields<'_>) -> Self {
        let giving_value = fields.number("giving_value", TRADE_VALUE_RANGE, 50.0);
        let receiving_value = fields.number("receiving_value", TRADE_VALUE_RANGE, 50.0);
        let verdict = fields.choice("verdict", TradeVerdict::Reject);

        Self {
            verdict,
            giving: fields.strings("giving"),
            receiving: fields.strings("receiving"),
            giving_value,
            receiving_value,
            value_delta: fields.number(
                "value_delta",
                VALUE_DELTA_RANGE,
                receiving_value - giving_value,
            ),
            fairness_score: fields.number("fairness_score", 0.0..=1.0, 0.5),
            counter_offer: match verdict {
                TradeVerdict::Counter => fields.optional_text("counter_offer"),
                _ => None,
            },
            confidence: fields.number("confidence", CONFIDENCE_RANGE, DEFAULT_CONFIDENCE),
            risk_level: fields.choice("risk_level", RiskLevel::Medium),
            factors: fields.objects("factors"),
            summary: fields.text("summary", "No summary provided."),
        }
    }
}
