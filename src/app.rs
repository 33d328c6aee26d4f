//! Application state and logic.
//!
//! [`App`] is the single owner of every piece of session state. Key handlers
//! call its operations; validation and request building are delegated to
//! pure functions so they can be tested without a terminal.

use std::path::Path;

use crate::client::{RenderClient, RenderWorker, WorkerMessage};
use crate::clipboard;
use crate::config::{Config, SurfaceConfig};
use crate::draw::{DrawProgram, Scene};
use crate::entries::{EntryList, ListState};
use crate::error::Result;
use crate::file_browser::{read_data_file, FileBrowserState};
use crate::form::{Field, FormState};
use crate::label::{
    decode_data_set_label, decode_function_label, DataSetSpec, FunctionSpec, Labeled,
    TITLE_SEPARATOR,
};
use crate::request::{build_request, PlotInputs, PlotMode, PlotRequest};
use crate::validate::{is_known_style, Alerts, Validation, KNOWN_STYLES};

/// Application theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Gruvbox dark theme.
    GruvboxDark,
    /// Gruvbox light theme.
    GruvboxLight,
}

impl Theme {
    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::GruvboxDark => Theme::GruvboxLight,
            Theme::GruvboxLight => Theme::GruvboxDark,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::GruvboxDark => "Gruvbox Dark",
            Theme::GruvboxLight => "Gruvbox Light",
        }
    }
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Active plot mode.
    pub mode: PlotMode,
    /// Function entries.
    pub functions: EntryList<FunctionSpec>,
    /// Data-set entries.
    pub data_sets: EntryList<DataSetSpec>,
    /// Form fields.
    pub form: FormState,
    /// Alerts shown in the popup.
    pub alerts: Alerts,
    /// Last painted drawing.
    pub scene: Scene,
    /// Surface size sent with each request.
    pub surface: SurfaceConfig,
    /// Cursor in the active entry list (0-based).
    pub list_cursor: usize,
    /// Status message.
    pub status: String,
    /// Current theme.
    pub theme: Theme,
    /// Data file picker.
    pub file_browser: FileBrowserState,
    /// File browser mode.
    pub file_browser_mode: bool,
    client: RenderClient,
    /// Workers whose result has not been collected yet.
    pending: Vec<RenderWorker>,
    /// Generation of the newest submission.
    generation: u64,
    /// Whether the newest submission still awaits its response.
    awaiting: bool,
    last_request: Option<PlotRequest>,
}

impl App {
    /// Create a new application instance.
    pub fn new(config: Config) -> Result<Self> {
        let client = RenderClient::new(config.client)?;
        Ok(Self {
            mode: PlotMode::Function,
            functions: EntryList::new(),
            data_sets: EntryList::new(),
            form: FormState::new(),
            alerts: Alerts::new(),
            scene: Scene::new(config.surface.width, config.surface.height),
            surface: config.surface,
            list_cursor: 0,
            status: format!("Ready - rendering via {}", client.endpoint()),
            theme: Theme::GruvboxDark,
            file_browser: FileBrowserState::new(),
            file_browser_mode: false,
            client,
            pending: Vec::new(),
            generation: 0,
            awaiting: false,
            last_request: None,
        })
    }

    /// Number of entries in the active list.
    pub fn active_len(&self) -> usize {
        match self.mode {
            PlotMode::Function => self.functions.len(),
            PlotMode::DataSet => self.data_sets.len(),
        }
    }

    /// State of the active list.
    pub fn active_state(&self) -> ListState {
        match self.mode {
            PlotMode::Function => self.functions.state(),
            PlotMode::DataSet => self.data_sets.state(),
        }
    }

    /// Labels of the active list with their selection flags.
    pub fn active_rows(&self) -> Vec<(usize, String, bool)> {
        match self.mode {
            PlotMode::Function => rows(&self.functions),
            PlotMode::DataSet => rows(&self.data_sets),
        }
    }

    /// Whether a plot can be submitted right now.
    pub fn can_plot(&self) -> bool {
        self.active_state() == ListState::Populated && !self.awaiting
    }

    /// Whether the delete action is enabled.
    pub fn can_delete(&self) -> bool {
        match self.mode {
            PlotMode::Function => self.functions.any_selected(),
            PlotMode::DataSet => self.data_sets.any_selected(),
        }
    }

    /// Whether a submission is waiting for the service.
    pub fn is_busy(&self) -> bool {
        self.awaiting
    }

    /// Request built by the last successful submit.
    pub fn last_request(&self) -> Option<&PlotRequest> {
        self.last_request.as_ref()
    }

    /// Switch between function and data-set mode.
    pub fn switch_mode(&mut self) {
        self.mode = self.mode.next();
        self.form.reset_focus(self.mode);
        self.list_cursor = 0;
        self.status = format!("Mode: {}", self.mode.name());
    }

    /// Add an entry from the form fields of the active mode.
    pub fn add_entry(&mut self) {
        self.alerts.clear();
        match self.mode {
            PlotMode::Function => self.add_function(),
            PlotMode::DataSet => self.add_data_set(),
        }
    }

    fn add_function(&mut self) {
        let title = self.form.function_title.value().trim().to_string();
        let expression = self.form.expression.value().trim().to_string();

        let passed = Validation::new(&mut self.alerts)
            .non_empty("function", &expression)
            .require(
                !title.contains(TITLE_SEPARATOR),
                format!("title cannot contain {:?}", TITLE_SEPARATOR),
            )
            .passed();
        if !passed {
            return;
        }

        let spec = FunctionSpec::new(Some(&title), expression);
        self.push_function(spec);
    }

    fn add_data_set(&mut self) {
        let title = self.form.data_set_title.value().trim().to_string();
        let column_x = self.form.column_x.value().trim().to_string();
        let column_y = self.form.column_y.value().trim().to_string();
        let style = self.form.style.value().trim().to_string();

        let passed = Validation::new(&mut self.alerts)
            .positive_integer("column x", &column_x)
            .positive_integer("column y", &column_y)
            .style("style", &style)
            .require(
                !title.contains(TITLE_SEPARATOR),
                format!("title cannot contain {:?}", TITLE_SEPARATOR),
            )
            .passed();
        if !passed {
            return;
        }

        // Validated as positive integers above
        let (Ok(x), Ok(y)) = (column_x.parse::<f64>(), column_y.parse::<f64>()) else {
            return;
        };
        let spec = DataSetSpec::new(Some(&title), x as u32, y as u32, style);
        self.push_data_set(spec);
    }

    /// Add an entry by decoding the quick-entry label.
    pub fn quick_add(&mut self) {
        self.alerts.clear();
        let label = self.form.quick_entry.value().trim().to_string();
        if label.is_empty() {
            self.alerts.warn("quick entry needs to be informed");
            return;
        }

        match self.mode {
            PlotMode::Function => {
                let spec = decode_function_label(&label);
                if spec.expression.trim().is_empty() {
                    self.alerts.warn("function needs to be informed");
                    return;
                }
                self.push_function(spec);
            }
            PlotMode::DataSet => match decode_quick_data_set(&label) {
                Ok(spec) if !is_known_style(&spec.style) => {
                    self.alerts.warn(format!(
                        "style needs to be one of: {}",
                        KNOWN_STYLES.join(", ")
                    ));
                }
                Ok(spec) => self.push_data_set(spec),
                Err(e) => {
                    tracing::warn!("{}", e);
                    self.alerts.error(e.to_string());
                    return;
                }
            },
        }

        if self.alerts.is_empty() {
            self.form.quick_entry.clear();
        }
    }

    fn push_function(&mut self, spec: FunctionSpec) {
        let label = spec.label();
        let index = self.functions.add(spec);
        tracing::info!("Added function #{}: {}", index, label);
        self.status = format!("Added function #{}", index);
    }

    fn push_data_set(&mut self, spec: DataSetSpec) {
        let label = spec.label();
        let index = self.data_sets.add(spec);
        tracing::info!("Added data set #{}: {}", index, label);
        self.status = format!("Added data set #{}", index);
    }

    /// Move the list cursor up.
    pub fn list_up(&mut self) {
        self.list_cursor = self.list_cursor.saturating_sub(1);
    }

    /// Move the list cursor down.
    pub fn list_down(&mut self) {
        if self.list_cursor + 1 < self.active_len() {
            self.list_cursor += 1;
        }
    }

    /// Toggle selection of the entry under the list cursor.
    pub fn toggle_current(&mut self) {
        let index = self.list_cursor + 1;
        let toggled = match self.mode {
            PlotMode::Function => self.functions.toggle(index),
            PlotMode::DataSet => self.data_sets.toggle(index),
        };
        if let Err(e) = toggled {
            self.status = e.to_string();
        }
    }

    /// Delete the selected entries of the active list.
    pub fn delete_selected(&mut self) {
        if !self.can_delete() {
            self.status = "Nothing selected".to_string();
            return;
        }
        let removed = match self.mode {
            PlotMode::Function => self.functions.delete_selected(),
            PlotMode::DataSet => self.data_sets.delete_selected(),
        };
        self.list_cursor = self.list_cursor.min(self.active_len().saturating_sub(1));
        tracing::info!("Deleted {} entries from the {} list", removed, self.mode.name());
        self.status = format!("Deleted {} entr{}", removed, if removed == 1 { "y" } else { "ies" });
    }

    /// Build the request and post it in the background.
    pub fn submit(&mut self) {
        if self.awaiting {
            self.alerts.clear();
            self.alerts.warn("a plot request is already in flight");
            return;
        }

        let inputs = PlotInputs {
            mode: self.mode,
            x_label: self.form.x_label.value(),
            y_label: self.form.y_label.value(),
            min_x: self.form.min_x.value(),
            max_x: self.form.max_x.value(),
            raw_data: self.form.raw_data.value(),
            surface: self.surface,
        };

        let Some(request) = build_request(&inputs, &self.functions, &self.data_sets, &mut self.alerts)
        else {
            tracing::warn!("Plot request aborted: {} warning(s)", self.alerts.len());
            self.status = "Fix the highlighted problems and plot again".to_string();
            return;
        };

        match serde_json::to_string(&request) {
            Ok(payload) => tracing::debug!("request payload: {}", payload),
            Err(e) => tracing::debug!("request payload not printable: {}", e),
        }

        self.generation += 1;
        self.awaiting = true;
        tracing::info!(
            "Submitting plot #{} with {} item(s)",
            self.generation,
            request.plot.len()
        );
        self.pending.push(RenderWorker::start(
            self.client.clone(),
            request.clone(),
            self.generation,
        ));
        self.last_request = Some(request);
        self.status = "Plotting...".to_string();
    }

    /// Collect finished workers. Returns true when the scene changed.
    pub fn poll_worker(&mut self) -> bool {
        let mut painted = false;
        let mut finished = Vec::new();

        for (i, worker) in self.pending.iter().enumerate() {
            if let Some(message) = worker.try_result() {
                finished.push((i, message));
            }
        }

        for (i, message) in finished.into_iter().rev() {
            self.pending.remove(i);
            painted |= self.handle_message(message);
        }

        painted
    }

    fn handle_message(&mut self, message: WorkerMessage) -> bool {
        if !self.awaiting || message.generation() != self.generation {
            tracing::debug!("Discarding stale response for plot #{}", message.generation());
            return false;
        }
        self.awaiting = false;

        match message {
            WorkerMessage::Rendered { body, .. } => self.apply_response(&body),
            WorkerMessage::Failed { message, .. } => {
                tracing::error!("Plot request failed: {}", message);
                self.alerts.error(format!("On generating plot: {}", message));
                self.status = "Plot failed".to_string();
                false
            }
        }
    }

    /// Run a drawing program onto a fresh scene and show it.
    ///
    /// The current scene is kept when the program is malformed.
    pub fn apply_response(&mut self, body: &str) -> bool {
        match DrawProgram::parse(body) {
            Ok(program) => {
                let mut scene = Scene::new(self.surface.width, self.surface.height);
                program.run(&mut scene);
                self.scene = scene;
                self.status = format!("Plotted ({} shapes)", self.scene.shapes().len());
                true
            }
            Err(e) => {
                tracing::error!("{}", e);
                self.alerts.error(e.to_string());
                self.status = "Plot failed".to_string();
                false
            }
        }
    }

    /// Replace the raw data field with a file's content.
    pub fn load_data_file(&mut self, path: &Path) {
        match read_data_file(path) {
            Ok(text) => {
                let lines = text.lines().count();
                self.form.raw_data.set_value(&text);
                self.status = format!("Loaded {} ({} lines)", path.display(), lines);
                tracing::info!("Loaded data file {}", path.display());
            }
            Err(e) => {
                tracing::error!("Error loading data file: {}", e);
                self.alerts.error(e.to_string());
            }
        }
    }

    /// Open the file browser at its current directory.
    pub fn open_file_browser(&mut self) {
        self.file_browser.load_directory();
        self.file_browser_mode = true;
        self.status = format!("File browser: {}", self.file_browser.current_dir.display());
    }

    /// Act on the file browser entry under the cursor.
    pub fn browser_select(&mut self) {
        if let Some(path) = self.file_browser.select_current() {
            self.file_browser_mode = false;
            self.load_data_file(&path);
            if self.mode != PlotMode::DataSet {
                self.switch_mode();
            }
            self.form.focus = Field::RawData;
        }
    }

    /// Close the file browser.
    pub fn close_file_browser(&mut self) {
        self.file_browser_mode = false;
        self.status = "File browser closed".to_string();
    }

    /// Dismiss all alerts.
    pub fn dismiss_alerts(&mut self) {
        self.alerts.clear();
    }

    /// Copy the last request payload to the clipboard.
    pub fn copy_request(&mut self) {
        let Some(request) = &self.last_request else {
            self.status = "No request sent yet".to_string();
            return;
        };
        match clipboard::copy_json(request) {
            Ok(bytes) => self.status = format!("Request copied ({} bytes)", bytes),
            Err(e) => self.status = format!("Copy failed: {}", e),
        }
    }

    /// Cycle to the next theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.status = format!("Theme: {}", self.theme.name());
    }
}

/// Decode a typed data-set label.
fn decode_quick_data_set(label: &str) -> Result<DataSetSpec> {
    Ok(decode_data_set_label(label)?)
}

fn rows<T: Labeled>(list: &EntryList<T>) -> Vec<(usize, String, bool)> {
    list.entries()
        .map(|e| (e.index, e.display_text(), e.selected))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::PlotctlError;

    fn app() -> App {
        let config = Config {
            client: ClientConfig {
                // Nothing listens here; tests never wait on it.
                endpoint: "http://127.0.0.1:9/plot/api/canvas".to_string(),
                ..ClientConfig::default()
            },
            surface: SurfaceConfig::default(),
        };
        App::new(config).unwrap()
    }

    #[test]
    fn add_function_validates_expression() {
        let mut app = app();
        app.add_entry();
        assert_eq!(app.alerts.warning_count(), 1);
        assert!(app.functions.is_empty());

        app.form.function_title.set_value("wave");
        app.form.expression.set_value("sin(x)");
        app.add_entry();
        assert!(app.alerts.is_empty());
        assert_eq!(app.active_rows(), [(1, "wave : sin(x)".to_string(), false)]);
        assert!(app.can_plot());
    }

    #[test]
    fn add_data_set_collects_all_warnings() {
        let mut app = app();
        app.switch_mode();
        app.form.column_x.set_value("0");
        app.form.column_y.set_value("b");
        app.form.style.set_value("splines");
        app.add_entry();
        assert_eq!(app.alerts.warning_count(), 3);
        assert!(app.data_sets.is_empty());

        app.form.column_x.set_value("1");
        app.form.column_y.set_value("3");
        app.form.style.set_value("lines");
        app.add_entry();
        assert_eq!(app.active_rows(), [(1, "[1:3] lines".to_string(), false)]);
    }

    #[test]
    fn quick_add_decodes_labels() {
        let mut app = app();
        app.form.quick_entry.set_value("square : x^2");
        app.quick_add();
        assert_eq!(app.functions.get(1).unwrap().spec.title.as_deref(), Some("square"));
        assert_eq!(app.form.quick_entry.value(), "");

        app.switch_mode();
        app.form.quick_entry.set_value("run : [2:4] linespoints");
        app.quick_add();
        assert_eq!(app.data_sets.get(1).unwrap().spec.column_y, 4);

        app.form.quick_entry.set_value("run : 2 4 lines");
        app.quick_add();
        assert_eq!(app.alerts.len(), 1);
        assert_eq!(app.data_sets.len(), 1);
        assert_eq!(app.form.quick_entry.value(), "run : 2 4 lines");
    }

    #[test]
    fn malformed_quick_label_is_a_label_error() {
        let err = decode_quick_data_set("run : 2 4 lines").unwrap_err();
        assert!(matches!(err, PlotctlError::Label(_)));
        assert_eq!(err.to_string(), "Malformed entry label: \"run : 2 4 lines\"");
    }

    #[test]
    fn toggle_and_delete_follow_cursor() {
        let mut app = app();
        for expr in ["a", "b", "c"] {
            app.form.expression.set_value(expr);
            app.add_entry();
        }
        assert!(!app.can_delete());
        app.list_down();
        app.toggle_current();
        assert!(app.can_delete());
        app.delete_selected();

        let labels: Vec<_> = app.active_rows().into_iter().map(|r| (r.0, r.1)).collect();
        assert_eq!(labels, [(1, "a".to_string()), (2, "c".to_string())]);
        assert!(!app.can_delete());
    }

    #[test]
    fn submit_with_bad_bounds_sends_nothing() {
        let mut app = app();
        app.form.expression.set_value("x");
        app.add_entry();
        app.form.max_x.set_value("abc");
        app.submit();
        assert!(!app.is_busy());
        assert!(app.last_request().is_none());
        assert_eq!(app.alerts.warning_count(), 1);
    }

    #[test]
    fn stale_and_duplicate_responses_are_ignored() {
        let mut app = app();
        app.generation = 3;
        app.awaiting = true;

        let stale = WorkerMessage::Rendered {
            generation: 2,
            body: r##"{"routine":"p","commands":[{"op":"point","x":1,"y":1,"colour":"#000000"}]}"##
                .to_string(),
        };
        assert!(!app.handle_message(stale));
        assert!(app.is_busy());
        assert!(app.scene.is_blank());

        let fresh = WorkerMessage::Rendered {
            generation: 3,
            body: r##"{"routine":"p","commands":[{"op":"point","x":1,"y":1,"colour":"#000000"}]}"##
                .to_string(),
        };
        assert!(app.handle_message(fresh.clone()));
        assert!(!app.is_busy());
        assert_eq!(app.scene.shapes().len(), 1);

        // A second answer for the same generation does not repaint.
        assert!(!app.handle_message(fresh));
    }

    #[test]
    fn malformed_program_keeps_previous_scene() {
        let mut app = app();
        assert!(app.apply_response(
            r##"{"routine":"p","commands":[{"op":"line","x1":0,"y1":0,"x2":5,"y2":5,"colour":"#ff0000"}]}"##
        ));
        assert!(!app.apply_response("canvas_plot();"));
        assert_eq!(app.scene.shapes().len(), 1);
        assert_eq!(app.alerts.len(), 1);
    }

    #[test]
    fn loading_a_data_file_fills_raw_text() {
        let mut app = app();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.dat");
        std::fs::write(&path, "# x y\n1 2\n").unwrap();

        app.load_data_file(&path);
        assert_eq!(app.form.raw_data.value(), "# x y\n1 2\n");

        app.load_data_file(&dir.path().join("missing.dat"));
        assert_eq!(app.alerts.len(), 1);
    }
}
