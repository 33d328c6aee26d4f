//! Label codec for plot entries.
//!
//! Every entry is shown as one line of text. A function entry reads
//! `"<title> : <expression>"` (or just `"<expression>"`), a data-set entry
//! reads `"<title> : [<x>:<y>] <style>"` (or `"[<x>:<y>] <style>"`).
//!
//! Entries are stored as typed specs; labels are only a projection of them.
//! The decoders exist for the quick-entry field, where a user types a whole
//! label and expects it to become an entry.

use thiserror::Error;

/// Separator between an optional title and the rest of a label.
pub const TITLE_SEPARATOR: &str = " : ";

/// A label that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    /// The label matches neither accepted layout.
    #[error("Malformed entry label: {label:?}")]
    Malformed {
        /// Offending label text.
        label: String,
    },
}

impl LabelError {
    fn malformed(label: &str) -> Self {
        Self::Malformed {
            label: label.to_string(),
        }
    }
}

/// Types that render as a single entry label.
pub trait Labeled {
    /// Display projection of the value.
    fn label(&self) -> String;
}

/// A mathematical function to plot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSpec {
    /// Optional legend title.
    pub title: Option<String>,
    /// Function expression, e.g. `sin(x)`.
    pub expression: String,
}

impl FunctionSpec {
    /// Create a function spec. A blank title is treated as absent.
    pub fn new(title: Option<&str>, expression: impl Into<String>) -> Self {
        Self {
            title: normalize_title(title),
            expression: expression.into(),
        }
    }
}

impl Labeled for FunctionSpec {
    fn label(&self) -> String {
        encode_function(self.title.as_deref(), &self.expression)
    }
}

/// A column selection over the raw data-set text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSetSpec {
    /// Optional legend title.
    pub title: Option<String>,
    /// 1-based column used for X.
    pub column_x: u32,
    /// 1-based column used for Y.
    pub column_y: u32,
    /// Point style token.
    pub style: String,
}

impl DataSetSpec {
    /// Create a data-set spec. A blank title is treated as absent.
    pub fn new(title: Option<&str>, column_x: u32, column_y: u32, style: impl Into<String>) -> Self {
        Self {
            title: normalize_title(title),
            column_x,
            column_y,
            style: style.into(),
        }
    }
}

impl Labeled for DataSetSpec {
    fn label(&self) -> String {
        encode_data_set(
            self.title.as_deref(),
            self.column_x,
            self.column_y,
            &self.style,
        )
    }
}

fn normalize_title(title: Option<&str>) -> Option<String> {
    title.filter(|t| !t.is_empty()).map(str::to_string)
}

/// Encode a function entry label.
pub fn encode_function(title: Option<&str>, expression: &str) -> String {
    match title.filter(|t| !t.is_empty()) {
        Some(title) => format!("{}{}{}", title, TITLE_SEPARATOR, expression),
        None => expression.to_string(),
    }
}

/// Encode a data-set entry label.
pub fn encode_data_set(title: Option<&str>, column_x: u32, column_y: u32, style: &str) -> String {
    let body = format!("[{}:{}] {}", column_x, column_y, style);
    match title.filter(|t| !t.is_empty()) {
        Some(title) => format!("{}{}{}", title, TITLE_SEPARATOR, body),
        None => body,
    }
}

/// Decode a function label.
///
/// The first `" : "` splits title from expression. Without a separator the
/// whole label is the expression.
pub fn decode_function_label(display: &str) -> FunctionSpec {
    match display.split_once(TITLE_SEPARATOR) {
        Some((title, expression)) => FunctionSpec::new(Some(title), expression),
        None => FunctionSpec::new(None, display),
    }
}

/// Decode a data-set label.
///
/// Tries `"<title> : [<x>:<y>] <style>"` at each separator in turn, so a
/// title ending in `" :"` still decodes, then falls back to the untitled
/// form. A label matching neither is rejected.
pub fn decode_data_set_label(display: &str) -> Result<DataSetSpec, LabelError> {
    for (at, _) in display.match_indices(TITLE_SEPARATOR) {
        let (title, rest) = (&display[..at], &display[at + TITLE_SEPARATOR.len()..]);
        if let Some((x, y, style)) = parse_columns_and_style(rest) {
            return Ok(DataSetSpec::new(Some(title), x, y, style));
        }
    }

    parse_columns_and_style(display)
        .map(|(x, y, style)| DataSetSpec::new(None, x, y, style))
        .ok_or_else(|| LabelError::malformed(display))
}

/// Parse `"[<x>:<y>] <style>"`.
fn parse_columns_and_style(text: &str) -> Option<(u32, u32, &str)> {
    let inner = text.strip_prefix('[')?;
    let (columns, rest) = inner.split_once(']')?;
    let (x, y) = columns.split_once(':')?;
    let x = parse_column(x)?;
    let y = parse_column(y)?;

    let style = if rest.is_empty() {
        rest
    } else {
        rest.strip_prefix(' ')?
    };

    Some((x, y, style))
}

fn parse_column(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<u32>().ok().filter(|&c| c > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn function_label_with_and_without_title() {
        assert_eq!(encode_function(Some("wave"), "sin(x)"), "wave : sin(x)");
        assert_eq!(encode_function(None, "sin(x)"), "sin(x)");
        assert_eq!(encode_function(Some(""), "x^2"), "x^2");

        let decoded = decode_function_label("wave : sin(x)");
        assert_eq!(decoded.title.as_deref(), Some("wave"));
        assert_eq!(decoded.expression, "sin(x)");

        let decoded = decode_function_label("x^2");
        assert_eq!(decoded.title, None);
        assert_eq!(decoded.expression, "x^2");
    }

    #[test]
    fn bare_colon_in_expression_is_not_a_separator() {
        let decoded = decode_function_label("x>0?1:2");
        assert_eq!(decoded.title, None);
        assert_eq!(decoded.expression, "x>0?1:2");
    }

    #[test]
    fn data_set_label_with_and_without_title() {
        assert_eq!(
            encode_data_set(Some("run 1"), 1, 3, "lines"),
            "run 1 : [1:3] lines"
        );
        assert_eq!(encode_data_set(None, 2, 4, "points"), "[2:4] points");

        let decoded = decode_data_set_label("run 1 : [1:3] lines").unwrap();
        assert_eq!(decoded, DataSetSpec::new(Some("run 1"), 1, 3, "lines"));

        let decoded = decode_data_set_label("[2:4] points").unwrap();
        assert_eq!(decoded, DataSetSpec::new(None, 2, 4, "points"));
    }

    #[test]
    fn untitled_style_may_contain_separator() {
        let decoded = decode_data_set_label("[1:2] a : b").unwrap();
        assert_eq!(decoded.title, None);
        assert_eq!(decoded.style, "a : b");
    }

    #[test]
    fn malformed_data_set_labels_are_rejected() {
        for label in [
            "",
            "points",
            "t : points",
            "[a:2] points",
            "[0:2] points",
            "[1-2] points",
            "[1:2]points",
            "t : [1:] lines",
        ] {
            assert!(
                matches!(
                    decode_data_set_label(label),
                    Err(LabelError::Malformed { .. })
                ),
                "{label:?} should be malformed"
            );
        }
    }

    #[test]
    fn title_ending_in_colon_decodes() {
        let label = encode_data_set(Some("a :"), 1, 2, "lines");
        assert_eq!(label, "a : : [1:2] lines");
        assert_eq!(
            decode_data_set_label(&label),
            Ok(DataSetSpec::new(Some("a :"), 1, 2, "lines"))
        );
    }

    fn title_strategy() -> impl Strategy<Value = Option<String>> {
        proptest::option::of("[a-zA-Z0-9 ()#_.-]{1,16}( :)?")
            .prop_filter("no separator", |t| {
                t.as_deref().map_or(true, |t| !t.contains(TITLE_SEPARATOR))
            })
    }

    proptest! {
        #[test]
        fn function_label_round_trips(
            title in title_strategy(),
            expression in "[a-z0-9+*/^()x. -]{1,24}",
        ) {
            prop_assume!(!expression.contains(TITLE_SEPARATOR));
            let label = encode_function(title.as_deref(), &expression);
            let decoded = decode_function_label(&label);
            prop_assert_eq!(decoded.title, title);
            prop_assert_eq!(decoded.expression, expression);
        }

        #[test]
        fn data_set_label_round_trips(
            title in title_strategy(),
            column_x in 1u32..1000,
            column_y in 1u32..1000,
            style in "[a-z :]{0,12}",
        ) {
            let label = encode_data_set(title.as_deref(), column_x, column_y, &style);
            let decoded = decode_data_set_label(&label).unwrap();
            prop_assert_eq!(decoded, DataSetSpec { title, column_x, column_y, style });
        }
    }
}
