//! Intake core: pure state machine for staging and submitting one document.
mod effect;
mod file;
mod msg;
mod preview;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use file::{is_supported_media_type, CandidateFile, StagedFile, PDF_MEDIA_TYPE};
pub use msg::Msg;
pub use preview::{PreviewHandle, PreviewManager};
pub use state::{
    AppState, ErrorKind, ExtractedResult, SubmissionError, SubmissionId, SubmissionStatus,
};
pub use update::update;
pub use view_model::{AppViewModel, ResultView, StagedFileView};
