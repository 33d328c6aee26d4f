//! Plotctl - a terminal client for a remote plot rendering service.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use plotctl::app::App;
use plotctl::config::{ClientConfig, Config, SurfaceConfig, DEFAULT_ENDPOINT};
use plotctl::form::Field;
use plotctl::ui;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "plotctl", version)]
#[command(about = "A terminal client for a remote plot rendering service", long_about = None)]
struct Args {
    /// Render endpoint the plot request is posted to
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Drawing surface width in pixels
    #[arg(long, default_value_t = 600.0)]
    width: f64,

    /// Drawing surface height in pixels
    #[arg(long, default_value_t = 400.0)]
    height: f64,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Data file preloaded into the data-set form
    #[arg(long)]
    data: Option<PathBuf>,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            client: ClientConfig {
                endpoint: self.endpoint.clone(),
                timeout: Duration::from_secs(self.timeout),
            },
            surface: SurfaceConfig {
                width: self.width,
                height: self.height,
            },
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let file = std::fs::File::create(log_path)
            .with_context(|| format!("cannot create log file {}", log_path.display()))?;
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting plotctl");
    }

    // Validate data path if provided
    if let Some(ref path) = args.data {
        if !path.is_file() {
            eprintln!("Error: Data file not found: {}", path.display());
            std::process::exit(1);
        }
    }

    let config = args.config();
    if !config.surface.is_valid() {
        eprintln!("Error: Surface size must be a finite number of pixels, at least 1");
        std::process::exit(1);
    }

    let mut app = App::new(config)?;
    if let Some(ref path) = args.data {
        app.switch_mode();
        app.load_data_file(path);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    if args.log.is_some() {
        tracing::info!("plotctl exited");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        app.poll_worker();
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if !handle_key(&mut app, key) {
                    return Ok(());
                }
            }
        }
    }
}

/// Apply one key press. Returns false when the app should quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    // Global keys
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('q'))
        | (KeyModifiers::CONTROL, KeyCode::Char('c')) => return false,
        (KeyModifiers::NONE, KeyCode::Esc) if !app.alerts.is_empty() => {
            app.dismiss_alerts();
            return true;
        }
        _ => {}
    }

    // File browser mode
    if app.file_browser_mode {
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Esc) | (KeyModifiers::NONE, KeyCode::Char('q')) => {
                app.close_file_browser();
            }

            // Navigation
            (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
                app.file_browser.cursor_up();
            }
            (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
                app.file_browser.cursor_down();
            }

            // Select/Open
            (KeyModifiers::NONE, KeyCode::Enter)
            | (KeyModifiers::NONE, KeyCode::Char('l'))
            | (KeyModifiers::NONE, KeyCode::Right) => {
                app.browser_select();
            }

            // Go to parent directory
            (KeyModifiers::NONE, KeyCode::Char('h')) | (KeyModifiers::NONE, KeyCode::Left) => {
                app.file_browser.go_to_parent();
            }
            (KeyModifiers::NONE, KeyCode::Char('.')) => app.file_browser.toggle_hidden(),

            _ => {}
        }
        return true;
    }

    // Form mode
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::F(2)) | (KeyModifiers::CONTROL, KeyCode::Char('t')) => {
            app.switch_mode();
        }
        (KeyModifiers::NONE, KeyCode::F(3)) => app.cycle_theme(),
        (KeyModifiers::NONE, KeyCode::Tab) => app.form.focus_next(app.mode),
        (_, KeyCode::BackTab) => app.form.focus_prev(app.mode),

        // Actions
        (KeyModifiers::CONTROL, KeyCode::Char('a')) => app.add_entry(),
        (KeyModifiers::CONTROL, KeyCode::Char('d')) => app.delete_selected(),
        (KeyModifiers::CONTROL, KeyCode::Char('r')) => app.submit(),
        (KeyModifiers::CONTROL, KeyCode::Char('o')) => app.open_file_browser(),
        (KeyModifiers::CONTROL, KeyCode::Char('y')) => app.copy_request(),

        _ if app.form.focus == Field::Entries => handle_entries_key(app, key),
        _ => handle_field_key(app, key),
    }
    true
}

fn handle_entries_key(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
            app.list_up();
        }
        (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
            app.list_down();
        }
        (KeyModifiers::NONE, KeyCode::Char(' ')) | (KeyModifiers::NONE, KeyCode::Enter) => {
            app.toggle_current();
        }
        (KeyModifiers::NONE, KeyCode::Delete) => app.delete_selected(),
        _ => {}
    }
}

fn handle_field_key(app: &mut App, key: KeyEvent) {
    let focus = app.form.focus;

    if let (KeyModifiers::NONE, KeyCode::Enter) = (key.modifiers, key.code) {
        match focus {
            Field::QuickEntry => app.quick_add(),
            Field::RawData => app.form.raw_data.input('\n'),
            _ => app.add_entry(),
        }
        return;
    }

    let Some(field) = app.form.focused_mut() else {
        return;
    };
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char(c)) | (KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            field.input(c);
        }
        (_, KeyCode::Backspace) => field.backspace(),
        (_, KeyCode::Delete) => field.delete(),
        (_, KeyCode::Left) => field.left(),
        (_, KeyCode::Right) => field.right(),
        (_, KeyCode::Home) => field.home(),
        (_, KeyCode::End) => field.end(),
        _ => {}
    }
}
