//! Plot request payload and the builder that assembles it.
//!
//! The builder is pure: it reads the entry list of the active mode plus the
//! free-form fields, reports problems into an [`Alerts`] collection and
//! produces a [`PlotRequest`] only when the whole pass is clean.

use serde::Serialize;

use crate::config::SurfaceConfig;
use crate::entries::EntryList;
use crate::label::{DataSetSpec, FunctionSpec};
use crate::validate::{parse_optional_number, Alerts, Validation, DEFAULT_STYLE};

/// Which kind of plot a submission builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotMode {
    /// Mathematical functions over a shared X range.
    #[default]
    Function,
    /// Columns selected from raw tabular text.
    DataSet,
}

impl PlotMode {
    /// Get the other mode.
    pub fn next(self) -> Self {
        match self {
            PlotMode::Function => PlotMode::DataSet,
            PlotMode::DataSet => PlotMode::Function,
        }
    }

    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            PlotMode::Function => "Functions",
            PlotMode::DataSet => "Data sets",
        }
    }
}

/// Request posted to the render service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotRequest {
    /// X axis label.
    pub x_label: String,
    /// Y axis label.
    pub y_label: String,
    /// Surface width in pixels.
    pub width: i64,
    /// Surface height in pixels.
    pub height: i64,
    /// Items to plot, all of the same kind.
    pub plot: Vec<PlotItem>,
}

/// One plotted function or data set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotItem {
    /// Legend title; empty lets the service pick one.
    pub title: String,
    /// Set in function mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub math_function: Option<MathFunction>,
    /// Set in data-set mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_set: Option<DataSet>,
}

/// Function payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MathFunction {
    /// Expression in the service's syntax.
    pub function: String,
    /// Lower X bound, omitted for the service default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_x: Option<f64>,
    /// Upper X bound, omitted for the service default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_x: Option<f64>,
}

/// Data-set payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSet {
    /// Points in file order.
    pub points: Vec<Point>,
    /// Style token.
    pub style: String,
}

/// A 2D point. Unparseable coordinates are `NaN` and serialize as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

/// Form values a submission reads.
#[derive(Debug, Clone, Copy)]
pub struct PlotInputs<'a> {
    /// Active mode.
    pub mode: PlotMode,
    /// X axis label.
    pub x_label: &'a str,
    /// Y axis label.
    pub y_label: &'a str,
    /// Lower X bound text (function mode).
    pub min_x: &'a str,
    /// Upper X bound text (function mode).
    pub max_x: &'a str,
    /// Raw tabular text (data-set mode).
    pub raw_data: &'a str,
    /// Current surface size.
    pub surface: SurfaceConfig,
}

/// Build the request for the active mode.
///
/// `alerts` is cleared first. Any warning raised while validating aborts the
/// build and `None` is returned.
pub fn build_request(
    inputs: &PlotInputs<'_>,
    functions: &EntryList<FunctionSpec>,
    data_sets: &EntryList<DataSetSpec>,
    alerts: &mut Alerts,
) -> Option<PlotRequest> {
    alerts.clear();

    let plot = match inputs.mode {
        PlotMode::Function => function_items(inputs, functions, alerts)?,
        PlotMode::DataSet => data_set_items(inputs, data_sets, alerts)?,
    };

    let (width, height) = inputs.surface.pixel_size();

    Some(PlotRequest {
        x_label: inputs.x_label.trim().to_string(),
        y_label: inputs.y_label.trim().to_string(),
        width,
        height,
        plot,
    })
}

fn function_items(
    inputs: &PlotInputs<'_>,
    functions: &EntryList<FunctionSpec>,
    alerts: &mut Alerts,
) -> Option<Vec<PlotItem>> {
    let mut validation = Validation::new(alerts);
    validation
        .require(!functions.is_empty(), "add at least one function")
        .number("min", inputs.min_x)
        .number("max", inputs.max_x);
    if !validation.passed() {
        return None;
    }

    let min_x = parse_optional_number(inputs.min_x);
    let max_x = parse_optional_number(inputs.max_x);
    if let (Some(min), Some(max)) = (min_x, max_x) {
        if !validation.require(min < max, "min needs to be less than max").passed() {
            return None;
        }
    }

    let items = functions
        .entries()
        .map(|entry| PlotItem {
            title: entry.spec.title.clone().unwrap_or_default(),
            math_function: Some(MathFunction {
                function: entry.spec.expression.clone(),
                min_x,
                max_x,
            }),
            data_set: None,
        })
        .collect();

    Some(items)
}

fn data_set_items(
    inputs: &PlotInputs<'_>,
    data_sets: &EntryList<DataSetSpec>,
    alerts: &mut Alerts,
) -> Option<Vec<PlotItem>> {
    let passed = Validation::new(alerts)
        .require(!data_sets.is_empty(), "add at least one data set")
        .non_empty("data set", inputs.raw_data)
        .passed();
    if !passed {
        return None;
    }

    // Each entry rescans the whole text with its own columns.
    let items = data_sets
        .entries()
        .map(|entry| {
            let spec = &entry.spec;
            let style = if spec.style.trim().is_empty() {
                DEFAULT_STYLE.to_string()
            } else {
                spec.style.trim().to_string()
            };

            PlotItem {
                title: spec.title.clone().unwrap_or_default(),
                math_function: None,
                data_set: Some(DataSet {
                    points: parse_points(inputs.raw_data, spec.column_x, spec.column_y),
                    style,
                }),
            }
        })
        .collect();

    Some(items)
}

/// Extract `(column_x, column_y)` points from whitespace separated text.
///
/// Blank lines are skipped, and so is the first line when it starts with
/// `#`. A missing or non-numeric token yields `NaN` for that coordinate.
pub fn parse_points(raw: &str, column_x: u32, column_y: u32) -> Vec<Point> {
    raw.lines()
        .enumerate()
        .filter(|(n, line)| !(line.trim().is_empty() || (*n == 0 && line.starts_with('#'))))
        .map(|(_, line)| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            Point {
                x: column_value(&tokens, column_x),
                y: column_value(&tokens, column_y),
            }
        })
        .collect()
}

fn column_value(tokens: &[&str], column: u32) -> f64 {
    (column as usize)
        .checked_sub(1)
        .and_then(|i| tokens.get(i))
        .and_then(|t| t.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs<'a>(mode: PlotMode, min_x: &'a str, max_x: &'a str, raw: &'a str) -> PlotInputs<'a> {
        PlotInputs {
            mode,
            x_label: "time",
            y_label: "value",
            min_x,
            max_x,
            raw_data: raw,
            surface: SurfaceConfig {
                width: 600.7,
                height: 400.2,
            },
        }
    }

    fn functions(exprs: &[(Option<&str>, &str)]) -> EntryList<FunctionSpec> {
        let mut list = EntryList::new();
        for (title, expr) in exprs {
            list.add(FunctionSpec::new(*title, *expr));
        }
        list
    }

    #[test]
    fn points_use_requested_columns() {
        let points = parse_points("1 2 3\n4 5 6\n", 1, 3);
        assert_eq!(points, [Point { x: 1.0, y: 3.0 }, Point { x: 4.0, y: 6.0 }]);
    }

    #[test]
    fn leading_comment_and_blank_lines_are_skipped() {
        let points = parse_points("# comment\n1 2\n\n3 4\n", 1, 2);
        assert_eq!(points, [Point { x: 1.0, y: 2.0 }, Point { x: 3.0, y: 4.0 }]);
    }

    #[test]
    fn only_the_first_line_can_be_a_comment() {
        let points = parse_points("1 2\n# later\n", 1, 2);
        assert_eq!(points.len(), 2);
        assert!(points[1].x.is_nan());
    }

    #[test]
    fn gaps_become_nan() {
        let points = parse_points("1 x\n2\n", 1, 2);
        assert_eq!(points[0].x, 1.0);
        assert!(points[0].y.is_nan());
        assert!(points[1].y.is_nan());
    }

    #[test]
    fn nan_serializes_as_null() {
        let json = serde_json::to_string(&Point { x: 1.0, y: f64::NAN }).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":null}"#);
    }

    #[test]
    fn invalid_max_aborts_with_one_warning() {
        let mut alerts = Alerts::new();
        let list = functions(&[(None, "sin(x)")]);
        let request = build_request(
            &inputs(PlotMode::Function, "", "abc", ""),
            &list,
            &EntryList::new(),
            &mut alerts,
        );

        assert!(request.is_none());
        assert_eq!(alerts.len(), 1);
        assert_eq!(
            alerts.iter().next().unwrap().message,
            "max needs to be a valid number"
        );
    }

    #[test]
    fn previous_alerts_are_cleared_on_each_build() {
        let mut alerts = Alerts::new();
        alerts.warn("stale");
        let list = functions(&[(None, "x")]);
        let request = build_request(
            &inputs(PlotMode::Function, "-1", "1", ""),
            &list,
            &EntryList::new(),
            &mut alerts,
        );
        assert!(request.is_some());
        assert!(alerts.is_empty());
    }

    #[test]
    fn function_request_shares_bounds_and_floors_size() {
        let mut alerts = Alerts::new();
        let list = functions(&[(Some("wave"), "sin(x)"), (None, "x^2")]);
        let request = build_request(
            &inputs(PlotMode::Function, "-5", "", ""),
            &list,
            &EntryList::new(),
            &mut alerts,
        )
        .unwrap();

        assert_eq!((request.width, request.height), (600, 400));
        assert_eq!(request.plot.len(), 2);
        assert_eq!(request.plot[0].title, "wave");
        assert_eq!(request.plot[1].title, "");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["x_label"], "time");
        assert_eq!(json["plot"][0]["math_function"]["function"], "sin(x)");
        assert_eq!(json["plot"][0]["math_function"]["min_x"], -5.0);
        assert!(json["plot"][0]["math_function"].get("max_x").is_none());
        assert!(json["plot"][0].get("data_set").is_none());
    }

    #[test]
    fn reversed_bounds_are_rejected() {
        let mut alerts = Alerts::new();
        let list = functions(&[(None, "x")]);
        let request = build_request(
            &inputs(PlotMode::Function, "3", "1", ""),
            &list,
            &EntryList::new(),
            &mut alerts,
        );
        assert!(request.is_none());
        assert_eq!(alerts.warning_count(), 1);
    }

    #[test]
    fn empty_function_list_is_rejected() {
        let mut alerts = Alerts::new();
        let request = build_request(
            &inputs(PlotMode::Function, "", "", ""),
            &EntryList::new(),
            &EntryList::new(),
            &mut alerts,
        );
        assert!(request.is_none());
        assert_eq!(alerts.warning_count(), 1);
    }

    #[test]
    fn data_set_request_parses_per_entry_and_defaults_style() {
        let mut alerts = Alerts::new();
        let mut sets = EntryList::new();
        sets.add(DataSetSpec::new(Some("first"), 1, 2, "lines"));
        sets.add(DataSetSpec::new(None, 1, 3, ""));

        let request = build_request(
            &inputs(PlotMode::DataSet, "junk", "junk", "# t a b\n0 1 2\n1 3 4\n"),
            &functions(&[(None, "ignored")]),
            &sets,
            &mut alerts,
        )
        .unwrap();

        assert!(alerts.is_empty());
        assert_eq!(request.plot.len(), 2);

        let first = request.plot[0].data_set.as_ref().unwrap();
        assert_eq!(first.style, "lines");
        assert_eq!(first.points, [Point { x: 0.0, y: 1.0 }, Point { x: 1.0, y: 3.0 }]);

        let second = request.plot[1].data_set.as_ref().unwrap();
        assert_eq!(second.style, "points");
        assert_eq!(second.points, [Point { x: 0.0, y: 2.0 }, Point { x: 1.0, y: 4.0 }]);
        assert!(request.plot.iter().all(|item| item.math_function.is_none()));
    }

    #[test]
    fn data_set_mode_requires_raw_text() {
        let mut alerts = Alerts::new();
        let mut sets = EntryList::new();
        sets.add(DataSetSpec::new(None, 1, 2, "points"));
        let request = build_request(
            &inputs(PlotMode::DataSet, "", "", "  \n"),
            &EntryList::new(),
            &sets,
            &mut alerts,
        );
        assert!(request.is_none());
        assert_eq!(alerts.iter().next().unwrap().message, "data set needs to be informed");
    }
}
