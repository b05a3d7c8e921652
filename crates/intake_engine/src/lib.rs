//! Intake engine: submission IO and effect execution.
mod engine;
mod submit;
mod types;

pub use engine::EngineHandle;
pub use submit::{ReqwestSubmitter, SubmitSettings, Submitter, INVOICE_FIELD};
pub use types::{
    EngineEvent, ExtractionOutput, FailureKind, InvoicePayload, SubmissionId, SubmitError,
};
