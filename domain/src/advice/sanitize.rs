//! Defensive decoding of backend free text.
//!
//! Backends are asked for a JSON object but routinely wrap it in prose or
//! markdown fences, drop fields, send strings where numbers belong, or
//! exceed documented ranges. Decoding therefore happens in three steps:
//!
//! 1. [`extract_json_object`] takes the text between the first `{` and the
//!    last `}`;
//! 2. the slice is parsed as a generic JSON value;
//! 3. a [`Sanitize`] implementation reads every field through [`Fields`],
//!    which checks presence, then type, then clamps or whitelists the value,
//!    and substitutes the field's default whenever a check fails.
//!
//! Step 3 is total. If step 1 or 2 fails the type's
//! [`fallback`](Sanitize::fallback) instance is returned instead.

use serde_json::{Map, Value};
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Greedy extraction of the outermost JSON object candidate.
///
/// Returns the slice from the first `{` to the last `}` (inclusive), or
/// `None` when there is no such pair.
///
/// ```
/// use huddle_domain::extract_json_object;
///
/// let text = "Sure! ```json\n{\"confidence\": 0.8}\n``` Good luck.";
/// assert_eq!(extract_json_object(text), Some("{\"confidence\": 0.8}"));
/// assert_eq!(extract_json_object("no braces here"), None);
/// assert_eq!(extract_json_object("} backwards {"), None);
/// ```
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Restrict `value` to `range`, substituting the nearest bound.
///
/// Clamping is idempotent: `clamp(clamp(x, r), r) == clamp(x, r)`.
pub fn clamp(value: f64, range: &RangeInclusive<f64>) -> f64 {
    value.clamp(*range.start(), *range.end())
}

/// A result type that can be rebuilt from untrusted JSON.
pub trait Sanitize: Sized {
    /// Fully-valid instance used when nothing usable was produced.
    fn fallback() -> Self;

    /// Build a fully-valid instance from whatever fields are present.
    ///
    /// Must not panic for any input, including an empty object.
    fn from_fields(fields: &Fields<'_>) -> Self;
}

/// Whether a sanitized value came from backend output or the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizeOutcome {
    /// A JSON object was found and decoded (missing fields defaulted).
    Parsed,
    /// No JSON object could be extracted or parsed.
    Fallback,
}

/// A sanitized value together with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Sanitized<T> {
    pub value: T,
    pub outcome: SanitizeOutcome,
}

impl<T> Sanitized<T> {
    pub fn used_fallback(&self) -> bool {
        self.outcome == SanitizeOutcome::Fallback
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sanitized<U> {
        Sanitized {
            value: f(self.value),
            outcome: self.outcome,
        }
    }
}

/// Decode backend text into `T`, reporting whether the fallback was used.
pub fn sanitize_with_outcome<T: Sanitize>(text: &str) -> Sanitized<T> {
    let parsed = extract_json_object(text)
        .and_then(|candidate| serde_json::from_str::<Value>(candidate).ok());

    match parsed {
        Some(Value::Object(map)) => Sanitized {
            value: T::from_fields(&Fields::new(&map)),
            outcome: SanitizeOutcome::Parsed,
        },
        _ => Sanitized {
            value: T::fallback(),
            outcome: SanitizeOutcome::Fallback,
        },
    }
}

/// Decode backend text into `T`. Never fails.
pub fn sanitize<T: Sanitize>(text: &str) -> T {
    sanitize_with_outcome(text).value
}

/// Checked, defaulting accessor over an untrusted JSON object.
///
/// A missing object behaves like an empty one, so nested sub-objects can be
/// read without special-casing their absence.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Fields<'a> {
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self { map: Some(map) }
    }

    pub fn empty() -> Self {
        Self { map: None }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.and_then(|m| m.get(key))
    }

    /// Finite number clamped to `range`, or `default`.
    pub fn number(&self, key: &str, range: RangeInclusive<f64>, default: f64) -> f64 {
        self.get(key)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
            .map(|v| clamp(v, &range))
            .unwrap_or(default)
    }

    /// Whole number (fractions rounded) clamped to `range`, or `default`.
    pub fn integer(&self, key: &str, range: RangeInclusive<i64>, default: i64) -> i64 {
        self.get(key)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
            .map(|v| {
                let rounded = v.round();
                let lo = *range.start() as f64;
                let hi = *range.end() as f64;
                rounded.clamp(lo, hi) as i64
            })
            .unwrap_or(default)
    }

    /// Non-blank string (trimmed), or `default`.
    pub fn text(&self, key: &str, default: &str) -> String {
        self.optional_text(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// Non-blank string (trimmed), or `None`.
    pub fn optional_text(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// String accepted by `E`'s whitelist parser, or `default`.
    pub fn choice<E: FromStr>(&self, key: &str, default: E) -> E {
        self.get(key)
            .and_then(Value::as_str)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Nested object accessor; missing or non-object values read as empty.
    pub fn object(&self, key: &str) -> Fields<'a> {
        match self.get(key) {
            Some(Value::Object(map)) => Fields::new(map),
            _ => Fields::empty(),
        }
    }

    /// Array of nested objects, each sanitized with `T`'s own defaults.
    ///
    /// Non-array values yield an empty list; non-object elements are skipped.
    pub fn objects<T: Sanitize>(&self, key: &str) -> Vec<T> {
        self.array(key)
            .iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(T::from_fields(&Fields::new(map))),
                _ => None,
            })
            .collect()
    }

    /// Array of non-blank strings; other elements are skipped.
    pub fn strings(&self, key: &str) -> Vec<String> {
        self.array(key)
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn array(&self, key: &str) -> &'a [Value] {
        match self.get(key) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    struct Probe {
        confidence: f64,
        label: String,
    }

    impl Sanitize for Probe {
        fn fallback() -> Self {
            Self {
                confidence: 0.0,
                label: "fallback".to_string(),
            }
        }

        fn from_fields(fields: &Fields<'_>) -> Self {
            Self {
                confidence: fields.number("confidence", 0.0..=1.0, 0.5),
                label: fields.text("label", "default"),
            }
        }
    }

    fn fields_of(value: &Value) -> Fields<'_> {
        match value {
            Value::Object(map) => Fields::new(map),
            _ => Fields::empty(),
        }
    }

    #[test]
    fn confidence_above_range_is_clamped_to_one() {
        let probe: Probe = sanitize(r#"{"confidence": 5}"#);
        assert_eq!(probe.confidence, 1.0);
    }

    #[test]
    fn malformed_text_returns_fallback() {
        for text in ["", "no json", "{not json}", "{\"confidence\": }", "}{"] {
            let result = sanitize_with_outcome::<Probe>(text);
            assert!(result.used_fallback(), "expected fallback for {text:?}");
            assert_eq!(result.value, Probe::fallback());
        }
    }

    #[test]
    fn empty_object_yields_defaults_not_fallback() {
        let result = sanitize_with_outcome::<Probe>("{}");
        assert_eq!(result.outcome, SanitizeOutcome::Parsed);
        assert_eq!(result.value.confidence, 0.5);
        assert_eq!(result.value.label, "default");
    }

    #[test]
    fn greedy_extraction_spans_nested_objects() {
        let text = "prefix {\"a\": {\"b\": 1}} suffix";
        assert_eq!(extract_json_object(text), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn wrong_types_fall_back_to_defaults() {
        let value = json!({"confidence": "0.9", "label": 42});
        let fields = fields_of(&value);
        assert_eq!(fields.number("confidence", 0.0..=1.0, 0.5), 0.5);
        assert_eq!(fields.text("label", "d"), "d");
    }

    #[test]
    fn clamp_is_idempotent_for_any_magnitude() {
        let range = -2.0..=2.0;
        for value in [-1e300, -2.5, -2.0, -0.3, 0.0, 1.9, 2.0, 7.0, 1e300] {
            let once = clamp(value, &range);
            assert!(range.contains(&once));
            assert_eq!(clamp(once, &range), once);
        }
    }

    #[test]
    fn integer_rounds_and_clamps() {
        let value = json!({"a": 3.6, "b": -40, "c": 1e40, "d": true});
        let fields = fields_of(&value);
        assert_eq!(fields.integer("a", 1..=10, 5), 4);
        assert_eq!(fields.integer("b", 1..=10, 5), 1);
        assert_eq!(fields.integer("c", 1..=10, 5), 10);
        assert_eq!(fields.integer("d", 1..=10, 5), 5);
    }

    #[test]
    fn strings_skip_blank_and_non_string_entries() {
        let value = json!({"list": ["A", " ", 3, null, " B "], "not_list": "x"});
        let fields = fields_of(&value);
        assert_eq!(fields.strings("list"), vec!["A", "B"]);
        assert!(fields.strings("not_list").is_empty());
        assert!(fields.strings("missing").is_empty());
    }

    #[test]
    fn nested_objects_use_their_own_defaults() {
        let value = json!({"items": [{"confidence": -3}, "junk", {}]});
        let items: Vec<Probe> = fields_of(&value).objects("items");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].confidence, 0.0);
        assert_eq!(items[1].label, "default");
    }

    #[test]
    fn missing_nested_object_reads_as_empty() {
        let value = json!({"other": 1});
        let nested = fields_of(&value).object("projection");
        assert_eq!(nested.number("floor", 0.0..=10.0, 2.0), 2.0);
    }
}
