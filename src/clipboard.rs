//! Clipboard integration.

use crate::error::Result;
use arboard::Clipboard;
use serde::Serialize;

/// Copy text to clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

/// Copy a value as pretty JSON. Returns the number of bytes copied.
pub fn copy_json<T: Serialize>(value: &T) -> Result<usize> {
    let text = serde_json::to_string_pretty(value)?;
    copy_to_clipboard(&text)?;
    tracing::debug!("Copied {} bytes to the clipboard", text.len());
    Ok(text.len())
}
