use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewError {
    #[error("Element not found: {0}")]
    MissingElement(String),
    #[error("No file selected")]
    EmptySelection,
}

/// A UI event whose default action can be cancelled.
pub trait UiEvent {
    fn prevent_default(&mut self);

    fn default_prevented(&self) -> bool;
}

#[derive(Debug, Default, Clone)]
pub struct Event {
    default_prevented: bool,
}

impl UiEvent for Event {
    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Presentation side of the upload widget.
///
/// Dialog methods are awaited so the flow never blocks on a real UI thread.
#[async_trait]
pub trait UploadView: Send + Sync {
    /// Makes the status element visible and shows `name` in it.
    fn show_file_name(&self, name: &str) -> Result<(), ViewError>;

    /// `percent` is within `0..=100` and never decreases during one request.
    fn set_progress(&self, percent: u8);

    async fn confirm_conflict(&self, file_name: &str) -> bool;

    /// `None` when the prompt is cancelled.
    async fn prompt_file_name(&self, default: &str) -> Option<String>;

    async fn alert(&self, message: &str);

    /// Returns the view to its initial state.
    fn reload(&self);
}
