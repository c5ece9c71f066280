//! Console output formatter for huddle results

use colored::Colorize;
use huddle_application::{AdviceOutput, HealthReport};
use huddle_domain::advice::{Factor, Projection};
use huddle_domain::{
    Advice, LineupAdvice, LlmResponse, RiskLevel, StartSitAdvice, StartSitVerdict, ToolCall,
    ToolCatalog, TradeAdvice, TradeVerdict, Usage, WaiverAdvice,
};
use serde::Serialize;

/// Formats results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a structured advice result
    pub fn format_advice(output: &AdviceOutput) -> String {
        let mut out = String::new();

        let title = match &output.advice {
            Advice::Lineup(_) => "Lineup Advice",
            Advice::StartSit(_) => "Start/Sit Advice",
            Advice::Trade(_) => "Trade Advice",
            Advice::Waiver(_) => "Waiver Advice",
        };
        out.push_str(&Self::header(title));
        out.push('\n');

        if output.used_fallback {
            out.push_str(&format!(
                "{} {}\n\n",
                "!".yellow().bold(),
                "The backend answer could not be read; showing a conservative default."
                    .yellow()
            ));
        }

        match &output.advice {
            Advice::Lineup(a) => Self::lineup(&mut out, a),
            Advice::StartSit(a) => Self::start_sit(&mut out, a),
            Advice::Trade(a) => Self::trade(&mut out, a),
            Advice::Waiver(a) => Self::waiver(&mut out, a),
        }

        out.push_str(&Self::served_by(
            &output.backend_id.to_string(),
            &output.model_id,
            &output.tool_calls,
            output.usage,
        ));
        out.push_str(&Self::footer());
        out
    }

    /// Format a free-form backend answer
    pub fn format_response(response: &LlmResponse) -> String {
        let mut out = String::new();
        out.push_str(response.content.trim());
        out.push('\n');
        out.push_str(&Self::served_by(
            response.backend_id.as_str(),
            &response.model_id,
            &response.tool_calls,
            response.usage,
        ));
        out
    }

    /// Format a health probe report
    pub fn format_health(report: &HealthReport) -> String {
        let mut out = String::new();
        out.push_str(&Self::header("Health"));
        out.push('\n');

        if report.backends.is_empty() {
            out.push_str(&format!("  {}\n", "no backends configured".yellow()));
        }
        for (id, healthy) in &report.backends {
            out.push_str(&format!("  {} {}\n", Self::status_mark(*healthy), id));
        }

        match report.tool_service {
            Some(healthy) => {
                out.push_str(&format!(
                    "  {} {}\n",
                    Self::status_mark(healthy),
                    "tool service"
                ));
            }
            None => out.push_str(&format!("  {} tool service (disabled)\n", "-".dimmed())),
        }

        out.push('\n');
        if report.is_operational() {
            out.push_str(&format!("{}\n", "operational".green().bold()));
        } else {
            out.push_str(&format!("{}\n", "degraded".red().bold()));
        }
        out
    }

    /// Format the tools offered to backends
    pub fn format_tools(catalog: &ToolCatalog) -> String {
        let mut out = String::new();
        out.push_str(&Self::header("Tools"));
        out.push('\n');

        for descriptor in catalog.descriptors() {
            let original = catalog.resolve_original_name(&descriptor.name);
            if original == descriptor.name {
                out.push_str(&format!("  {}\n", descriptor.name.cyan().bold()));
            } else {
                out.push_str(&format!(
                    "  {} {}\n",
                    descriptor.name.cyan().bold(),
                    format!("({})", original).dimmed()
                ));
            }
            if !descriptor.description.is_empty() {
                out.push_str(&format!("      {}\n", descriptor.description));
            }
        }

        out.push_str(&format!("\n{} tool(s)\n", catalog.len()));
        out
    }

    /// Format any result as JSON
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn lineup(out: &mut String, advice: &LineupAdvice) {
        out.push_str(&format!("{}\n", "Starters:".cyan().bold()));
        if advice.starters.is_empty() {
            out.push_str("  (none)\n");
        }
        for slot in &advice.starters {
            out.push_str(&format!(
                "  {:<5} {:<24} {}\n",
                slot.slot.bold(),
                slot.player,
                Self::projection(&slot.projection)
            ));
            if !slot.reasoning.is_empty() {
                out.push_str(&format!("        {}\n", slot.reasoning.dimmed()));
            }
        }

        if !advice.bench.is_empty() {
            out.push_str(&format!(
                "\n{} {}\n",
                "Bench:".cyan().bold(),
                advice.bench.join(", ")
            ));
        }

        out.push_str(&format!(
            "\n{} {}\n",
            "Projected total:".cyan().bold(),
            Self::projection(&advice.projected_total)
        ));
        Self::confidence_line(out, advice.confidence, Some(advice.risk_level));
        Self::factors(out, &advice.key_factors);
        Self::summary(out, &advice.summary);
    }

    fn start_sit(out: &mut String, advice: &StartSitAdvice) {
        let verdict = match advice.verdict {
            StartSitVerdict::Start => "START".green().bold(),
            StartSitVerdict::Sit => "SIT".red().bold(),
            StartSitVerdict::Neutral => "TOSS-UP".yellow().bold(),
        };
        out.push_str(&format!("{} {}\n", verdict, advice.player.bold()));
        out.push_str(&format!(
            "{} {}\n",
            "Projection:".cyan().bold(),
            Self::projection(&advice.projection)
        ));
        out.push_str(&format!(
            "{} {:+.1}\n",
            "Matchup:".cyan().bold(),
            advice.matchup_score
        ));
        Self::confidence_line(out, advice.confidence, Some(advice.risk_level));

        if !advice.alternatives.is_empty() {
            out.push_str(&format!("\n{}\n", "Alternatives:".cyan().bold()));
            for alt in &advice.alternatives {
                out.push_str(&format!(
                    "  {:<24} {} matchup {:+.1}\n",
                    alt.player,
                    Self::projection(&alt.projection),
                    alt.matchup_score
                ));
            }
        }

        Self::factors(out, &advice.factors);
        Self::summary(out, &advice.reasoning);
    }

    fn trade(out: &mut String, advice: &TradeAdvice) {
        let verdict = match advice.verdict {
            TradeVerdict::Accept => "ACCEPT".green().bold(),
            TradeVerdict::Reject => "REJECT".red().bold(),
            TradeVerdict::Counter => "COUNTER".yellow().bold(),
        };
        out.push_str(&format!("{} {}\n\n", "Verdict:".cyan().bold(), verdict));
        out.push_str(&format!(
            "  {:<10} {} (value {:.0})\n",
            "Giving",
            Self::list_or_dash(&advice.giving),
            advice.giving_value
        ));
        out.push_str(&format!(
            "  {:<10} {} (value {:.0})\n",
            "Receiving",
            Self::list_or_dash(&advice.receiving),
            advice.receiving_value
        ));
        out.push_str(&format!(
            "  {:<10} {:+.0}, fairness {:.0}%\n",
            "Delta",
            advice.value_delta,
            advice.fairness_score * 100.0
        ));

        if let Some(counter) = &advice.counter_offer {
            out.push_str(&format!("\n{} {}\n", "Counter offer:".yellow().bold(), counter));
        }

        out.push('\n');
        Self::confidence_line(out, advice.confidence, Some(advice.risk_level));
        Self::factors(out, &advice.factors);
        Self::summary(out, &advice.summary);
    }

    fn waiver(out: &mut String, advice: &WaiverAdvice) {
        out.push_str(&format!("{}\n", "Targets:".cyan().bold()));
        if advice.targets.is_empty() {
            out.push_str("  (none)\n");
        }
        for target in &advice.targets {
            out.push_str(&format!(
                "  {:>2}. {:<24} {:<3} FAAB {:>3.0}%  {}\n",
                target.priority,
                target.player,
                target.position.as_str(),
                target.faab_bid_percent,
                Self::projection(&target.projection)
            ));
            if !target.reasoning.is_empty() {
                out.push_str(&format!("      {}\n", target.reasoning.dimmed()));
            }
        }

        if !advice.drop_candidates.is_empty() {
            out.push_str(&format!(
                "\n{} {}\n",
                "Drop candidates:".cyan().bold(),
                advice.drop_candidates.join(", ")
            ));
        }

        out.push('\n');
        Self::confidence_line(out, advice.confidence, None);
        Self::summary(out, &advice.summary);
    }

    fn projection(p: &Projection) -> String {
        format!("{:.1} ({:.1}-{:.1})", p.expected, p.floor, p.ceiling)
    }

    fn confidence_line(out: &mut String, confidence: f64, risk: Option<RiskLevel>) {
        let pct = format!("{:.0}%", confidence * 100.0);
        let pct = if confidence >= 0.7 {
            pct.green()
        } else if confidence >= 0.4 {
            pct.yellow()
        } else {
            pct.red()
        };
        match risk {
            Some(risk) => out.push_str(&format!(
                "{} {}  {} {}\n",
                "Confidence:".cyan().bold(),
                pct,
                "Risk:".cyan().bold(),
                risk
            )),
            None => out.push_str(&format!("{} {}\n", "Confidence:".cyan().bold(), pct)),
        }
    }

    fn factors(out: &mut String, factors: &[Factor]) {
        if factors.is_empty() {
            return;
        }
        out.push_str(&format!("\n{}\n", "Factors:".cyan().bold()));
        for factor in factors {
            let score = format!("{:+.1}", factor.score);
            let score = if factor.score > 0.0 {
                score.green()
            } else if factor.score < 0.0 {
                score.red()
            } else {
                score.normal()
            };
            if factor.note.is_empty() {
                out.push_str(&format!("  {} {}\n", score, factor.name));
            } else {
                out.push_str(&format!("  {} {}: {}\n", score, factor.name, factor.note));
            }
        }
    }

    fn summary(out: &mut String, text: &str) {
        if !text.is_empty() {
            out.push_str(&format!("\n{}\n", text));
        }
    }

    fn served_by(
        backend: &str,
        model: &str,
        tool_calls: &[ToolCall],
        usage: Option<Usage>,
    ) -> String {
        let mut line = format!("\n{} {} ({})", "via".dimmed(), backend, model);
        if !tool_calls.is_empty() {
            let names: Vec<&str> = tool_calls.iter().map(|c| c.name.as_str()).collect();
            line.push_str(&format!(", tools: {}", names.join(", ")));
        }
        if let Some(usage) = usage {
            line.push_str(&format!(", {} tokens", usage.total()));
        }
        line.push('\n');
        line
    }

    fn list_or_dash(items: &[String]) -> String {
        if items.is_empty() {
            "-".to_string()
        } else {
            items.join(", ")
        }
    }

    fn status_mark(healthy: bool) -> colored::ColoredString {
        if healthy { "v".green() } else { "x".red() }
    }

    fn header(title: &str) -> String {
        format!(
            "{}\n{}\n{}\n",
            "=".repeat(60).cyan(),
            format!("  {}", title).cyan().bold(),
            "=".repeat(60).cyan()
        )
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}
