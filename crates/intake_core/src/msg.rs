use crate::{CandidateFile, ExtractedResult, SubmissionError, SubmissionId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked a file through the selection control.
    FileChosen(CandidateFile),
    /// Pointer drag entered (or moved over) the drop target.
    DragEntered,
    /// Pointer drag left the drop target without dropping.
    DragLeft,
    /// Drop on the target. Single-file policy: only the first file is
    /// considered, the rest of the payload is discarded.
    FilesDropped(Vec<CandidateFile>),
    /// User clicked the clear/remove control.
    ClearClicked,
    /// User clicked submit.
    SubmitClicked,
    /// Engine resolution for a submission.
    SubmissionResolved {
        submission_id: SubmissionId,
        outcome: Result<ExtractedResult, SubmissionError>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
