//! Advice results decoded from backend output.
//!
//! Each feature has its own strictly-shaped result type:
//!
//! | Kind | Type | Fallback verdict |
//! |------|------|------------------|
//! | `lineup` | [`LineupAdvice`] | no starters, confidence 0 |
//! | `start-sit` | [`StartSitAdvice`] | `neutral` |
//! | `trade` | [`TradeAdvice`] | `reject`, high risk |
//! | `waiver` | [`WaiverAdvice`] | no targets |
//!
//! All of them implement [`Sanitize`](sanitize::Sanitize), so decoding
//! never fails: malformed text produces the fallback instance and missing or
//! invalid fields produce documented defaults.

pub mod common;
pub mod lineup;
pub mod sanitize;
pub mod start_sit;
pub mod trade;
pub mod waiver;

pub use common::{Factor, Position, Projection, RiskLevel};
pub use lineup::{LineupAdvice, LineupSlot};
pub use sanitize::{
    Fields, Sanitize, SanitizeOutcome, Sanitized, extract_json_object, sanitize,
    sanitize_with_outcome,
};
pub use start_sit::{PlayerComparison, StartSitAdvice, StartSitVerdict};
pub use trade::{TradeAdvice, TradeVerdict};
pub use waiver::{WaiverAdvice, WaiverTarget};

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which advice feature a request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdviceKind {
    Lineup,
    StartSit,
    Trade,
    Waiver,
}

impl AdviceKind {
    pub fn all() -> [AdviceKind; 4] {
        [
            AdviceKind::Lineup,
            AdviceKind::StartSit,
            AdviceKind::Trade,
            AdviceKind::Waiver,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AdviceKind::Lineup => "lineup",
            AdviceKind::StartSit => "start-sit",
            AdviceKind::Trade => "trade",
            AdviceKind::Waiver => "waiver",
        }
    }

    /// Field outline sent to the backend so it knows what JSON to produce.
    pub fn schema_hint(&self) -> &'static str {
        match self {
            AdviceKind::Lineup => {
                r#"{"starters": [{"slot": string, "player": string, "projection": {"floor": number, "expected": number, "ceiling": number}, "reasoning": string}], "bench": [string], "projected_total": {"floor": number, "expected": number, "ceiling": number}, "confidence": 0..1, "risk_level": "low"|"medium"|"high", "key_factors": [{"name": string, "score": -2..2, "note": string}], "summary": string}"#
            }
            AdviceKind::StartSit => {
                r#"{"player": string, "verdict": "start"|"sit"|"neutral", "projection": {"floor": number, "expected": number, "ceiling": number}, "matchup_score": -2..2, "confidence": 0..1, "risk_level": "low"|"medium"|"high", "alternatives": [{"player": string, "projection": {...}, "matchup_score": -2..2}], "factors": [{"name": string, "score": -2..2, "note": string}], "reasoning": string}"#
            }
            AdviceKind::Trade => {
                r#"{"verdict": "accept"|"reject"|"counter", "giving": [string], "receiving": [string], "giving_value": 0..100, "receiving_value": 0..100, "value_delta": -100..100, "fairness_score": 0..1, "counter_offer": string, "confidence": 0..1, "risk_level": "low"|"medium"|"high", "factors": [{"name": string, "score": -2..2, "note": string}], "summary": string}"#
            }
            AdviceKind::Waiver => {
                r#"{"targets": [{"player": string, "position": "QB"|"RB"|"WR"|"TE"|"K"|"DEF", "priority": 1..10, "faab_bid_percent": 0..100, "projection": {"floor": number, "expected": number, "ceiling": number}, "reasoning": string}], "drop_candidates": [string], "confidence": 0..1, "summary": string}"#
            }
        }
    }
}

impl fmt::Display for AdviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdviceKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "lineup" => Ok(AdviceKind::Lineup),
            "start-sit" | "startsit" => Ok(AdviceKind::StartSit),
            "trade" => Ok(AdviceKind::Trade),
            "waiver" | "waivers" => Ok(AdviceKind::Waiver),
            _ => Err(DomainError::UnknownAdviceKind(s.to_string())),
        }
    }
}

/// A sanitized result of any advice kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Advice {
    Lineup(LineupAdvice),
    StartSit(StartSitAdvice),
    Trade(TradeAdvice),
    Waiver(WaiverAdvice),
}

impl Advice {
    /// Decode backend text as the given kind. Never fails.
    pub fn sanitize(kind: AdviceKind, text: &str) -> Sanitized<Advice> {
        match kind {
            AdviceKind::Lineup => sanitize_with_outcome::<LineupAdvice>(text).map(Advice::Lineup),
            AdviceKind::StartSit => {
                sanitize_with_outcome::<StartSitAdvice>(text).map(Advice::StartSit)
            }
            AdviceKind::Trade => sanitize_with_outcome::<TradeAdvice>(text).map(Advice::Trade),
            AdviceKind::Waiver => sanitize_with_outcome::<WaiverAdvice>(text).map(Advice::Waiver),
        }
    }

    /// Fallback instance of the given kind.
    pub fn fallback(kind: AdviceKind) -> Advice {
        match kind {
            AdviceKind::Lineup => Advice::Lineup(LineupAdvice::fallback()),
            AdviceKind::StartSit => Advice::StartSit(StartSitAdvice::fallback()),
            AdviceKind::Trade => Advice::Trade(TradeAdvice::fallback()),
            AdviceKind::Waiver => Advice::Waiver(WaiverAdvice::fallback()),
        }
    }

    pub fn kind(&self) -> AdviceKind {
        match self {
            Advice::Lineup(_) => AdviceKind::Lineup,
            Advice::StartSit(_) => AdviceKind::StartSit,
            Advice::Trade(_) => AdviceKind::Trade,
            Advice::Waiver(_) => AdviceKind::Waiver,
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            Advice::Lineup(a) => a.confidence,
            Advice::StartSit(a) => a.confidence,
            Advice::Trade(a) => a.confidence,
            Advice::Waiver(a) => a.confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_common_spellings() {
        assert_eq!("start_sit".parse::<AdviceKind>(), Ok(AdviceKind::StartSit));
        assert_eq!("Start-Sit".parse::<AdviceKind>(), Ok(AdviceKind::StartSit));
        assert_eq!("waivers".parse::<AdviceKind>(), Ok(AdviceKind::Waiver));
        assert!(matches!(
            "draft".parse::<AdviceKind>(),
            Err(DomainError::UnknownAdviceKind(_))
        ));
    }

    #[test]
    fn every_kind_falls_back_on_garbage() {
        for kind in AdviceKind::all() {
            let result = Advice::sanitize(kind, "the model rambled");
            assert!(result.used_fallback());
            assert_eq!(result.value, Advice::fallback(kind));
            assert_eq!(result.value.kind(), kind);
        }
    }

    #[test]
    fn every_kind_accepts_empty_object() {
        for kind in AdviceKind::all() {
            let result = Advice::sanitize(kind, "{}");
            assert!(!result.used_fallback());
            let confidence = result.value.confidence();
            assert!((0.0..=1.0).contains(&confidence));
        }
    }

    #[test]
    fn advice_serializes_with_kind_tag() {
        let json = serde_json::to_value(Advice::fallback(AdviceKind::Trade)).unwrap();
        assert_eq!(json["kind"], "trade");
        assert_eq!(json["verdict"], "reject");
    }
}
