//! Plotctl - a terminal client for a remote plot rendering service.
//!
//! Plotctl lets a user build a list of mathematical functions or tabular data
//! sets, validates the form input, posts a plot request to the render service
//! and paints the drawing program it answers with.
//!
//! # Features
//!
//! - Function mode with optional X bounds
//! - Data-set mode with column selection, point styles and file loading
//! - Quick entry of whole labels such as `wave : sin(x)`
//! - Background requests that never block the interface
//! - Gruvbox color themes
//! - Clipboard copy of the last request
//!
//! # Example
//!
//! ```no_run
//! use plotctl::entries::EntryList;
//! use plotctl::label::FunctionSpec;
//! use plotctl::config::SurfaceConfig;
//! use plotctl::request::{build_request, PlotInputs, PlotMode};
//! use plotctl::validate::Alerts;
//!
//! let mut functions = EntryList::new();
//! functions.add(FunctionSpec::new(Some("wave"), "sin(x)"));
//!
//! let inputs = PlotInputs {
//!     mode: PlotMode::Function,
//!     x_label: "t",
//!     y_label: "",
//!     min_x: "-3",
//!     max_x: "3",
//!     raw_data: "",
//!     surface: SurfaceConfig::default(),
//! };
//! let mut alerts = Alerts::new();
//! let request = build_request(&inputs, &functions, &EntryList::new(), &mut alerts);
//! assert!(request.is_some());
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod client;
pub mod clipboard;
pub mod config;
pub mod draw;
pub mod entries;
pub mod error;
pub mod file_browser;
pub mod form;
pub mod label;
pub mod request;
pub mod ui;
pub mod validate;

pub use error::{PlotctlError, Result};
