//! File browser feature - picking a data file for the data-set form.
//!
//! This module contains the state for walking the file system and reading
//! the chosen file into the raw data field.

pub mod ui;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PlotctlError, Result};

/// Extensions highlighted as likely tabular data.
const DATA_EXTENSIONS: [&str; 5] = ["dat", "txt", "csv", "tsv", "data"];

/// File browser entry.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Full path to the file or directory.
    pub path: PathBuf,
    /// Display name.
    pub name: String,
    /// Is this entry a directory (following symlinks)?
    pub is_dir: bool,
    /// File size in bytes, for files.
    pub size: Option<u64>,
}

impl FileEntry {
    /// Check if the entry looks like a tabular data file.
    pub fn is_data_file(&self) -> bool {
        !self.is_dir
            && self
                .path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| DATA_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
    }
}

/// File browser state.
#[derive(Debug)]
pub struct FileBrowserState {
    /// Directory being browsed.
    pub current_dir: PathBuf,
    /// Entries of the current directory.
    pub entries: Vec<FileEntry>,
    /// Cursor position.
    pub cursor: usize,
    /// Scroll offset.
    pub scroll: usize,
    /// Show dot-prefixed entries.
    pub show_hidden: bool,
}

impl FileBrowserState {
    /// Create a browser rooted at the working directory.
    pub fn new() -> Self {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            current_dir,
            entries: Vec::new(),
            cursor: 0,
            scroll: 0,
            show_hidden: false,
        }
    }

    /// Read the current directory.
    pub fn load_directory(&mut self) {
        self.entries.clear();
        self.cursor = 0;
        self.scroll = 0;

        if let Some(parent) = self.current_dir.parent() {
            self.entries.push(FileEntry {
                path: parent.to_path_buf(),
                name: "..".to_string(),
                is_dir: true,
                size: None,
            });
        }

        let dir_entries = match fs::read_dir(&self.current_dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Cannot list {}: {}", self.current_dir.display(), e);
                return;
            }
        };

        let mut listed: Vec<FileEntry> = dir_entries
            .flatten()
            .filter_map(|entry| {
                let path = entry.path();
                let name = path.file_name()?.to_string_lossy().to_string();
                if !self.show_hidden && name.starts_with('.') {
                    return None;
                }
                // metadata() follows symlinks
                let meta = path.metadata().ok();
                let is_dir = meta.as_ref().map(|m| m.is_dir()).unwrap_or(false);
                let size = meta.filter(|m| m.is_file()).map(|m| m.len());
                Some(FileEntry {
                    path,
                    name,
                    is_dir,
                    size,
                })
            })
            .collect();

        // Directories first, then data files, then everything else
        listed.sort_by_key(|e| (!e.is_dir, !e.is_data_file(), e.name.to_lowercase()));
        self.entries.extend(listed);
    }

    /// Move cursor up.
    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor down.
    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
    }

    /// Get the entry under the cursor.
    pub fn current_entry(&self) -> Option<&FileEntry> {
        self.entries.get(self.cursor)
    }

    /// Enter the directory under the cursor, or return the file under it.
    pub fn select_current(&mut self) -> Option<PathBuf> {
        let entry = self.current_entry()?.clone();
        if entry.is_dir {
            self.current_dir = entry.path;
            self.load_directory();
            None
        } else {
            Some(entry.path)
        }
    }

    /// Go to the parent directory.
    pub fn go_to_parent(&mut self) {
        if let Some(parent) = self.current_dir.parent() {
            self.current_dir = parent.to_path_buf();
            self.load_directory();
        }
    }

    /// Toggle hidden entries.
    pub fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
        self.load_directory();
    }

    /// Keep the cursor inside a viewport of the given height.
    pub fn adjust_scroll(&mut self, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        }
        if self.cursor >= self.scroll + viewport_height {
            self.scroll = self.cursor + 1 - viewport_height;
        }
    }
}

impl Default for FileBrowserState {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a data file as text.
pub fn read_data_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| PlotctlError::file_open(path.to_path_buf(), e))
}
