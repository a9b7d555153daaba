//! Terminal output utilities for styled CLI output.

use console::{Term, style};
use dropzone_business::{CandidateFile, Highlight, UploadView};
use dropzone_utils::{UploadedFile, format_file_size};
use std::fmt::Display;

/// Terminal output helper for consistent styled output.
pub struct Output {
    term: Term,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper writing to stdout.
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    /// Print a success message with a green checkmark.
    pub fn success(&self, message: impl Display) {
        drop(
            self.term
                .write_line(&format!("{} {}", style("✓").green().bold(), message)),
        );
    }

    /// Print an error message with a red X.
    pub fn error(&self, message: impl Display) {
        drop(
            self.term
                .write_line(&format!("{} {}", style("✗").red().bold(), message)),
        );
    }

    /// Print an info message with a blue info icon.
    pub fn info(&self, message: impl Display) {
        drop(
            self.term
                .write_line(&format!("{} {}", style("ℹ").blue().bold(), message)),
        );
    }

    /// Print a stored file: original name, name on the server, size.
    pub fn uploaded_item(&self, original: impl Display, saved: impl Display, size: impl Display) {
        drop(self.term.write_line(&format!(
            "  {} {} → {} ({})",
            style("📄").bold(),
            style(original).white().bold(),
            style(saved).dim(),
            style(size).cyan()
        )));
    }
}

/// Renders uploader state changes as terminal lines.
///
/// A terminal has no drop target and no picker to reset, so those calls only
/// leave a trace.
pub struct ConsoleView {
    out: Output,
}

impl ConsoleView {
    pub fn new(out: Output) -> Self {
        Self { out }
    }
}

impl UploadView for ConsoleView {
    fn show_error(&mut self, message: &str) {
        self.out.error(message);
    }

    fn show_success(&mut self, files: &[UploadedFile]) {
        self.out.success("Files uploaded successfully!");
        for file in files {
            self.out.uploaded_item(
                &file.original_name,
                &file.saved_name,
                format_file_size(file.size),
            );
        }
    }

    fn add_file_row(&mut self, file: &CandidateFile) {
        self.out.info(format!(
            "Selected {} ({})",
            file.name,
            format_file_size(file.size)
        ));
    }

    fn remove_file_row(&mut self, name: &str) {
        self.out.info(format!("Removed {name}"));
    }

    fn clear_file_rows(&mut self) {
        tracing::debug!("Selection cleared");
    }

    fn set_uploading(&mut self, uploading: bool) {
        if uploading {
            self.out.info("Uploading...");
        }
    }

    fn reset_picker(&mut self) {
        tracing::trace!("Picker reset");
    }

    fn set_drop_highlight(&mut self, highlight: Highlight) {
        tracing::trace!(colour = highlight.colour(), "Drop highlight");
    }
}
