//! The seam between the uploader and whatever draws it.
//!
//! [`UploadView`] is implemented by each front-end. [`MarkupView`] keeps the
//! page fragments as HTML strings built by the [`render`] helpers, so every
//! user-supplied string reaches markup escaped.

use crate::drop_zone::Highlight;
use crate::selection::CandidateFile;
use dropzone_utils::UploadedFile;

pub trait UploadView {
    fn show_error(&mut self, message: &str);
    fn show_success(&mut self, files: &[UploadedFile]);
    fn add_file_row(&mut self, file: &CandidateFile);
    fn remove_file_row(&mut self, name: &str);
    fn clear_file_rows(&mut self);
    /// Disables the submit control and shows the in-progress label.
    fn set_uploading(&mut self, uploading: bool);
    /// Clears the picker so the same files can be chosen again.
    fn reset_picker(&mut self);
    fn set_drop_highlight(&mut self, highlight: Highlight);
}

pub mod render {
    use dropzone_utils::{UploadedFile, escape_html, format_file_size};

    pub fn file_row(name: &str, size: u64) -> String {
        let name = escape_html(name);
        format!(
            "<div class=\"file-item\">\
             <div class=\"file-info\">\
             <div class=\"file-name\">{name}</div>\
             <div class=\"file-size\">{size}</div>\
             </div>\
             <button type=\"button\" class=\"file-remove\" data-filename=\"{name}\">Remove</button>\
             </div>",
            size = format_file_size(size),
        )
    }

    pub fn error_banner(message: &str) -> String {
        format!("<strong>Error:</strong> {}", escape_html(message))
    }

    pub fn success_list(files: &[UploadedFile]) -> String {
        let mut html = String::from("<strong>Files uploaded successfully!</strong>");
        if !files.is_empty() {
            html.push_str("<ul>");
            for file in files {
                html.push_str(&format!(
                    "<li>{} ({})</li>",
                    escape_html(&file.original_name),
                    format_file_size(file.size)
                ));
            }
            html.push_str("</ul>");
        }
        html
    }
}

/// CSS class of the result area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Success,
    Error,
}

impl ResultKind {
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Success => "upload-result success",
            Self::Error => "upload-result error",
        }
    }
}

/// A view holding the page fragments as markup.
#[derive(Debug, Default, Clone)]
pub struct MarkupView {
    rows: Vec<(String, String)>,
    result: Option<(ResultKind, String)>,
    uploading: bool,
    picker_resets: usize,
    highlight: Highlight,
}

impl MarkupView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup of the file list, one row per selected file.
    pub fn file_list(&self) -> String {
        self.rows.iter().map(|(_, html)| html.as_str()).collect()
    }

    pub fn result(&self) -> Option<(ResultKind, &str)> {
        self.result
            .as_ref()
            .map(|(kind, html)| (*kind, html.as_str()))
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn picker_resets(&self) -> usize {
        self.picker_resets
    }

    pub fn highlight(&self) -> Highlight {
        self.highlight
    }
}

impl UploadView for MarkupView {
    fn show_error(&mut self, message: &str) {
        self.result = Some((ResultKind::Error, render::error_banner(message)));
    }

    fn show_success(&mut self, files: &[UploadedFile]) {
        self.result = Some((ResultKind::Success, render::success_list(files)));
    }

    fn add_file_row(&mut self, file: &CandidateFile) {
        self.rows
            .push((file.name.clone(), render::file_row(&file.name, file.size)));
    }

    fn remove_file_row(&mut self, name: &str) {
        self.rows.retain(|(row_name, _)| row_name != name);
    }

    fn clear_file_rows(&mut self) {
        self.rows.clear();
    }

    fn set_uploading(&mut self, uploading: bool) {
        self.uploading = uploading;
    }

    fn reset_picker(&mut self) {
        self.picker_resets += 1;
    }

    fn set_drop_highlight(&mut self, highlight: Highlight) {
        self.highlight = highlight;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uploaded(original: &str, size: u64) -> UploadedFile {
        UploadedFile {
            original_name: original.to_owned(),
            saved_name: "saved".to_owned(),
            size,
            content_type: "image/png".to_owned(),
        }
    }

    #[test]
    fn test_file_row_escapes_name() {
        let html = render::file_row("<b>\"x\".png", 1536);

        assert!(html.contains("<div class=\"file-name\">&lt;b&gt;&quot;x&quot;.png</div>"));
        assert!(html.contains("data-filename=\"&lt;b&gt;&quot;x&quot;.png\""));
        assert!(html.contains("<div class=\"file-size\">1.5 KB</div>"));
    }

    #[test]
    fn test_error_banner_escapes_message() {
        assert_eq!(
            render::error_banner("File 'a&b' has an invalid type"),
            "<strong>Error:</strong> File &#039;a&amp;b&#039; has an invalid type"
        );
    }

    #[test]
    fn test_success_list_uses_original_names() {
        let html = render::success_list(&[uploaded("my <cv>.pdf", 2048)]);

        assert_eq!(
            html,
            "<strong>Files uploaded successfully!</strong><ul><li>my &lt;cv&gt;.pdf (2 KB)</li></ul>"
        );
    }

    #[test]
    fn test_success_list_without_files_has_no_list() {
        assert_eq!(
            render::success_list(&[]),
            "<strong>Files uploaded successfully!</strong>"
        );
    }

    #[test]
    fn test_markup_view_rows() {
        let mut view = MarkupView::new();
        view.add_file_row(&CandidateFile::new("a.png", "image/png", vec![0; 10]));
        view.add_file_row(&CandidateFile::new("b.png", "image/png", vec![0; 20]));

        view.remove_file_row("a.png");

        assert!(!view.file_list().contains("a.png"));
        assert!(view.file_list().contains("b.png"));

        view.clear_file_rows();
        assert!(view.file_list().is_empty());
    }

    #[test]
    fn test_markup_view_result_class() {
        let mut view = MarkupView::new();

        view.show_error("nope");
        assert_eq!(
            view.result().map(|(kind, _)| kind.class_name()),
            Some("upload-result error")
        );

        view.show_success(&[]);
        assert_eq!(
            view.result().map(|(kind, _)| kind.class_name()),
            Some("upload-result success")
        );
    }
}
