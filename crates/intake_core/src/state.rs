use crate::file::{is_supported_media_type, CandidateFile, StagedFile};
use crate::preview::PreviewManager;
use crate::view_model::{AppViewModel, ResultView, StagedFileView};
use std::fmt;

pub type SubmissionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Uploading,
    Success,
    Error,
}

/// Payload returned by the extraction service on success.
///
/// `raw_text` is mandatory; everything else the service sends is carried
/// through opaquely for surfaces that want the structured fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractedResult {
    pub raw_text: String,
    pub fields: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network unreachable, DNS failure, timeout and friends.
    Transport,
    /// The service answered with a non-2xx status.
    Service(u16),
    /// 2xx response whose body was not the expected JSON shape.
    MalformedResponse,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Transport => write!(f, "transport failure"),
            ErrorKind::Service(status) => write!(f, "service failure (http {status})"),
            ErrorKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

/// Diagnostic record of a failed submission. Surfaces only ever show the
/// merged `SubmissionStatus::Error`; the kind/message split exists for logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionError {
    pub kind: ErrorKind,
    pub message: String,
}

impl SubmissionError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Authoritative holder of the whole intake workflow state.
///
/// All mutation goes through [`crate::update`]; everything here is
/// `pub(crate)` or read-only accessors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    staged: Option<StagedFile>,
    preview: PreviewManager,
    dragging: bool,
    status: SubmissionStatus,
    progress: u8,
    result: Option<ExtractedResult>,
    last_error: Option<SubmissionError>,
    in_flight: Option<SubmissionId>,
    next_submission_id: SubmissionId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn staged(&self) -> Option<&StagedFile> {
        self.staged.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn result(&self) -> Option<&ExtractedResult> {
        self.result.as_ref()
    }

    /// Diagnostic for the most recent failed submission, if any.
    pub fn last_error(&self) -> Option<&SubmissionError> {
        self.last_error.as_ref()
    }

    /// `Some` exactly while a submission is outstanding.
    pub fn in_flight(&self) -> Option<SubmissionId> {
        self.in_flight
    }

    pub fn preview(&self) -> Option<&crate::PreviewHandle> {
        self.preview.current()
    }

    /// Drain the render-coalescing flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            file: self.staged.as_ref().map(|file| StagedFileView {
                name: file.name.clone(),
                media_type: file.media_type.clone(),
                byte_len: file.byte_len(),
            }),
            preview: self.preview.current().cloned(),
            dragging: self.dragging,
            status: self.status,
            progress: self.progress,
            can_submit: self.staged.is_some() && self.in_flight.is_none(),
            result: match self.status {
                SubmissionStatus::Success => self.result.as_ref().map(|result| ResultView {
                    raw_text: result.raw_text.clone(),
                    fields: result.fields.clone(),
                }),
                _ => None,
            },
            dirty: self.dirty,
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Validate a candidate; on accept, replace the staged file and rebind
    /// the preview. Silent no-op on rejection. Returns whether it staged.
    ///
    /// Never touches the in-flight guard: replacing the file mid-submission
    /// changes what the UI shows, not what was sent.
    pub(crate) fn stage_candidate(&mut self, candidate: CandidateFile) -> bool {
        if !is_supported_media_type(&candidate.media_type) {
            return false;
        }
        let file = StagedFile::from_candidate(candidate);
        self.preview.bind(&file);
        self.staged = Some(file);
        self.status = SubmissionStatus::Idle;
        self.progress = 0;
        self.result = None;
        self.last_error = None;
        self.mark_dirty();
        true
    }

    /// Drop the staged file and everything derived from it.
    pub(crate) fn clear_staged(&mut self) {
        if self.staged.is_none() {
            return;
        }
        self.preview.release();
        self.staged = None;
        self.result = None;
        self.last_error = None;
        self.status = SubmissionStatus::Idle;
        self.progress = 0;
        self.mark_dirty();
    }

    pub(crate) fn set_dragging(&mut self, dragging: bool) {
        if self.dragging != dragging {
            self.dragging = dragging;
            self.mark_dirty();
        }
    }

    /// Arm a submission: captures the staged file and raises the in-flight
    /// guard. Returns `None` when nothing is staged or one is outstanding.
    pub(crate) fn begin_submission(&mut self) -> Option<(SubmissionId, StagedFile)> {
        if self.in_flight.is_some() {
            return None;
        }
        let file = self.staged.clone()?;
        self.next_submission_id += 1;
        let submission_id = self.next_submission_id;
        self.in_flight = Some(submission_id);
        self.status = SubmissionStatus::Uploading;
        self.progress = 0;
        self.mark_dirty();
        Some((submission_id, file))
    }

    /// Land a submission outcome. Outcomes for anything other than the
    /// in-flight submission are discarded.
    pub(crate) fn resolve_submission(
        &mut self,
        submission_id: SubmissionId,
        outcome: Result<ExtractedResult, SubmissionError>,
    ) {
        if self.in_flight != Some(submission_id) {
            return;
        }
        self.in_flight = None;
        self.progress = 100;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.last_error = None;
                self.status = SubmissionStatus::Success;
            }
            Err(error) => {
                self.result = None;
                self.last_error = Some(error);
                self.status = SubmissionStatus::Error;
            }
        }
        self.mark_dirty();
    }
}
