use crate::{PreviewHandle, SubmissionStatus};

/// Read-only projection of [`crate::AppState`] for a rendering surface.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub file: Option<StagedFileView>,
    pub preview: Option<PreviewHandle>,
    pub dragging: bool,
    pub status: SubmissionStatus,
    pub progress: u8,
    /// Whether the submit control should be enabled: a file is staged and no
    /// submission is outstanding.
    pub can_submit: bool,
    /// Extraction output, verbatim. Present iff status is `Success`.
    pub result: Option<ResultView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFileView {
    pub name: String,
    pub media_type: String,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub raw_text: String,
    pub fields: serde_json::Map<String, serde_json::Value>,
}
