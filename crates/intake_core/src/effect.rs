use crate::{StagedFile, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Transmit `file` to the extraction service. The file is captured at
    /// submit time; later staging changes do not affect this submission.
    SubmitInvoice {
        submission_id: SubmissionId,
        file: StagedFile,
    },
}
