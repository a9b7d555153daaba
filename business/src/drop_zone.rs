//! Drag-and-drop target state.

use crate::selection::CandidateFile;

/// Background of the drop target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Highlight {
    #[default]
    Idle,
    Active,
}

impl Highlight {
    /// CSS colour for the drop target background.
    pub fn colour(self) -> &'static str {
        match self {
            Self::Idle => "#f8f9fa",
            Self::Active => "#e3f2fd",
        }
    }
}

/// Drag events delivered to the drop target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Enter,
    Over,
    Leave,
    Drop(Vec<CandidateFile>),
}

/// What the host must do after a [`DragEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragOutcome {
    /// Suppress the browser default (opening the file). Always set.
    pub prevent_default: bool,
    pub stop_propagation: bool,
    pub highlight: Highlight,
    /// Files to feed into the selection, non-empty only for drops.
    pub dropped: Vec<CandidateFile>,
}

#[derive(Debug, Default, Clone)]
pub struct DropZone {
    highlight: Highlight,
}

impl DropZone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    pub fn handle(&mut self, event: DragEvent) -> DragOutcome {
        let dropped = match event {
            DragEvent::Enter | DragEvent::Over => {
                self.highlight = Highlight::Active;
                Vec::new()
            }
            DragEvent::Leave => {
                self.highlight = Highlight::Idle;
                Vec::new()
            }
            DragEvent::Drop(files) => {
                self.highlight = Highlight::Idle;
                files
            }
        };

        DragOutcome {
            prevent_default: true,
            stop_propagation: true,
            highlight: self.highlight,
            dropped,
        }
    }
}
