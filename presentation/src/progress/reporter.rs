//! Progress reporting while a request is routed

use colored::Colorize;
use huddle_application::{ExchangeEvent, ExchangeLogger};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

/// Shows a spinner that follows the router's fallback decisions.
///
/// Implements [`ExchangeLogger`] so it can be handed to the router directly;
/// every event is also forwarded to `inner` (e.g. the JSONL logger).
pub struct ProgressReporter {
    spinner: ProgressBar,
    inner: Option<Arc<dyn ExchangeLogger>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(Self::spinner_style());
        spinner.set_prefix("huddle");
        spinner.enable_steady_tick(Duration::from_millis(100));
        Self {
            spinner,
            inner: None,
        }
    }

    /// Forward every event to another logger as well.
    pub fn with_inner(mut self, inner: Arc<dyn ExchangeLogger>) -> Self {
        self.inner = Some(inner);
        self
    }

    /// Clear the spinner from the terminal.
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Spinner text for an event, or `None` to leave the current one.
    pub fn status_line(event: &ExchangeEvent) -> Option<String> {
        let backend = event.payload["backend"].as_str().unwrap_or("?");
        match event.event_type {
            "cache_hit" => Some(format!("{} cached answer from {}", "v".green(), backend)),
            "backend_attempt" => {
                let position = event.payload["position"].as_u64().unwrap_or(0) + 1;
                let candidates = event.payload["candidates"].as_u64().unwrap_or(0);
                Some(format!("asking {} ({}/{})", backend, position, candidates))
            }
            "backend_failed" => Some(format!("{} {} failed, trying next", "x".red(), backend)),
            "tool_round" => {
                let count = event.payload["tools"].as_array().map_or(0, |t| t.len());
                Some(format!("{} ran {} tool(s), waiting for answer", backend, count))
            }
            "backend_succeeded" => Some(format!("{} {}", "v".green(), backend)),
            _ => None,
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExchangeLogger for ProgressReporter {
    fn log(&self, event: ExchangeEvent) {
        if let Some(line) = Self::status_line(&event) {
            self.spinner.set_message(line);
        }
        if let Some(inner) = &self.inner {
            inner.log(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huddle_domain::BackendId;
    use std::sync::Mutex;

    struct Recording(Mutex<Vec<&'static str>>);

    impl ExchangeLogger for Recording {
        fn log(&self, event: ExchangeEvent) {
            self.0.lock().unwrap().push(event.event_type);
        }
    }

    #[test]
    fn test_status_line_for_attempt_is_one_based() {
        colored::control::set_override(false);
        let event = ExchangeEvent::backend_attempt(&BackendId::new("openai"), 0, 2);
        assert_eq!(
            ProgressReporter::status_line(&event).as_deref(),
            Some("asking openai (1/2)")
        );
    }

    #[test]
    fn test_status_line_for_tool_round() {
        colored::control::set_override(false);
        let event = ExchangeEvent::tool_round(
            &BackendId::new("openai"),
            &["get_roster".to_string(), "get_matchup".to_string()],
            0,
        );
        assert_eq!(
            ProgressReporter::status_line(&event).as_deref(),
            Some("openai ran 2 tool(s), waiting for answer")
        );
    }

    #[test]
    fn test_unknown_event_has_no_status() {
        let event = ExchangeEvent::new("custom", serde_json::json!({}));
        assert!(ProgressReporter::status_line(&event).is_none());
    }

    #[test]
    fn test_events_are_forwarded() {
        let inner = Arc::new(Recording(Mutex::new(Vec::new())));
        let reporter = ProgressReporter::new().with_inner(inner.clone());

        reporter.log(ExchangeEvent::backend_failed(&BackendId::new("a"), "boom"));
        reporter.log(ExchangeEvent::new("custom", serde_json::json!({})));
        reporter.finish();

        assert_eq!(*inner.0.lock().unwrap(), vec!["backend_failed", "custom"]);
    }
}
