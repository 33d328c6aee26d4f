//! Form field validators and the alert collection they report into.
//!
//! Validators are pure predicates. [`Validation`] runs them against named
//! fields and pushes one warning per failing field into a shared [`Alerts`]
//! collection, so a caller can aggregate every problem of one pass before
//! deciding whether to abort.

/// Point styles understood by the render service.
pub const KNOWN_STYLES: [&str; 5] = ["boxes", "dots", "lines", "linespoints", "points"];

/// Style used when the user leaves the style field empty.
pub const DEFAULT_STYLE: &str = "points";

/// Check that a field holds a finite number. Empty means "unset" and passes.
pub fn is_valid_number(text: &str) -> bool {
    let text = text.trim();
    text.is_empty() || parse_finite(text).is_some()
}

/// Check that a field holds an integer greater than zero.
pub fn is_positive_integer(text: &str) -> bool {
    match parse_finite(text.trim()) {
        Some(value) => value > 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX),
        None => false,
    }
}

/// Check that a field is not blank.
pub fn is_non_empty(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Check that a style is empty (service default) or one the service knows.
pub fn is_known_style(text: &str) -> bool {
    let text = text.trim();
    text.is_empty() || KNOWN_STYLES.contains(&text)
}

/// Parse an optional number field. Empty yields `None`.
pub fn parse_optional_number(text: &str) -> Option<f64> {
    parse_finite(text.trim())
}

fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Severity of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    /// Validation problem, recovered locally.
    Warning,
    /// Transport, decoding or drawing failure.
    Error,
}

impl AlertLevel {
    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            AlertLevel::Warning => "warning",
            AlertLevel::Error => "error",
        }
    }
}

/// One user-visible alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Severity.
    pub level: AlertLevel,
    /// Human-readable message.
    pub message: String,
}

/// Resettable collection of alerts shown to the user.
#[derive(Debug, Clone, Default)]
pub struct Alerts {
    items: Vec<Alert>,
}

impl Alerts {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(AlertLevel::Warning, message);
    }

    /// Add an error.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(AlertLevel::Error, message);
    }

    fn push(&mut self, level: AlertLevel, message: impl Into<String>) {
        self.items.push(Alert {
            level,
            message: message.into(),
        });
    }

    /// Remove every alert.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Check if there are no alerts.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of alerts.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Number of warnings.
    pub fn warning_count(&self) -> usize {
        self.items
            .iter()
            .filter(|a| a.level == AlertLevel::Warning)
            .count()
    }

    /// Iterate over alerts in the order they were raised.
    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.items.iter()
    }
}

/// One validation pass over a set of fields.
#[derive(Debug)]
pub struct Validation<'a> {
    alerts: &'a mut Alerts,
    failed: bool,
}

impl<'a> Validation<'a> {
    /// Start a pass reporting into `alerts`.
    pub fn new(alerts: &'a mut Alerts) -> Self {
        Self {
            alerts,
            failed: false,
        }
    }

    fn check(&mut self, ok: bool, message: String) -> &mut Self {
        if !ok {
            self.alerts.warn(message);
            self.failed = true;
        }
        self
    }

    /// Field must be empty or a finite number.
    pub fn number(&mut self, name: &str, text: &str) -> &mut Self {
        self.check(
            is_valid_number(text),
            format!("{} needs to be a valid number", name),
        )
    }

    /// Field must be a positive integer.
    pub fn positive_integer(&mut self, name: &str, text: &str) -> &mut Self {
        self.check(
            is_positive_integer(text),
            format!("{} needs to be a positive integer", name),
        )
    }

    /// Field must not be blank.
    pub fn non_empty(&mut self, name: &str, text: &str) -> &mut Self {
        self.check(is_non_empty(text), format!("{} needs to be informed", name))
    }

    /// Field must be empty or a known style.
    pub fn style(&mut self, name: &str, text: &str) -> &mut Self {
        self.check(
            is_known_style(text),
            format!("{} needs to be one of: {}", name, KNOWN_STYLES.join(", ")),
        )
    }

    /// Arbitrary condition with its own message.
    pub fn require(&mut self, ok: bool, message: impl Into<String>) -> &mut Self {
        self.check(ok, message.into())
    }

    /// Whether every check so far passed.
    pub fn passed(&self) -> bool {
        !self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_number_is_unset_and_valid() {
        assert!(is_valid_number(""));
        assert!(is_valid_number("   "));
        assert!(is_valid_number("-3.5"));
        assert!(is_valid_number("1e3"));
        assert!(!is_valid_number("abc"));
        assert!(!is_valid_number("inf"));
        assert!(!is_valid_number("NaN"));
    }

    #[test]
    fn positive_integer_rejects_zero_negative_and_fractions() {
        assert!(is_positive_integer("1"));
        assert!(is_positive_integer(" 12 "));
        assert!(!is_positive_integer("0"));
        assert!(!is_positive_integer("-2"));
        assert!(!is_positive_integer("1.5"));
        assert!(!is_positive_integer(""));
        assert!(!is_positive_integer("x"));
    }

    #[test]
    fn style_accepts_known_names_and_empty() {
        assert!(is_known_style(""));
        assert!(is_known_style("linespoints"));
        assert!(!is_known_style("splines"));
    }

    #[test]
    fn validation_collects_one_warning_per_failing_field() {
        let mut alerts = Alerts::new();
        let passed = Validation::new(&mut alerts)
            .number("min", "")
            .number("max", "abc")
            .positive_integer("column x", "0")
            .passed();

        assert!(!passed);
        assert_eq!(alerts.warning_count(), 2);
        let messages: Vec<_> = alerts.iter().map(|a| a.message.as_str()).collect();
        assert_eq!(
            messages,
            ["max needs to be a valid number", "column x needs to be a positive integer"]
        );
    }

    #[test]
    fn alerts_reset() {
        let mut alerts = Alerts::new();
        alerts.warn("a");
        alerts.error("b");
        assert_eq!(alerts.len(), 2);
        alerts.clear();
        assert!(alerts.is_empty());
    }
}
