use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use intake_core::{Effect, ErrorKind, ExtractedResult, Msg, SubmissionError};
use intake_engine::{
    EngineEvent, EngineHandle, ExtractionOutput, FailureKind, InvoicePayload, SubmitSettings,
};

/// Executes core effects against the engine and pumps engine completions
/// back into the message channel.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: SubmitSettings, msg_tx: mpsc::Sender<Msg>) -> Self {
        let engine = EngineHandle::new(settings);
        let runner = Self { engine };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitInvoice {
                    submission_id,
                    file,
                } => {
                    engine_info!(
                        "SubmitInvoice id={} file={} media_type={} bytes={}",
                        submission_id,
                        file.name,
                        file.media_type,
                        file.byte_len()
                    );
                    let payload = InvoicePayload {
                        file_name: file.name,
                        media_type: file.media_type,
                        bytes: file.bytes.to_vec(),
                    };
                    self.engine.submit(submission_id, payload);
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                let EngineEvent::SubmissionCompleted {
                    submission_id,
                    result,
                } = event;
                let outcome = match result {
                    Ok(output) => Ok(map_output(output)),
                    Err(err) => {
                        // Transport vs service distinction survives only here.
                        engine_warn!("submission {} failed: {}", submission_id, err);
                        Err(map_failure(err.kind, err.message))
                    }
                };
                if msg_tx
                    .send(Msg::SubmissionResolved {
                        submission_id,
                        outcome,
                    })
                    .is_err()
                {
                    return;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_output(output: ExtractionOutput) -> ExtractedResult {
    ExtractedResult {
        raw_text: output.raw_text,
        fields: output.fields,
    }
}

fn map_failure(kind: FailureKind, message: String) -> SubmissionError {
    let kind = match kind {
        FailureKind::HttpStatus(code) => ErrorKind::Service(code),
        FailureKind::MalformedResponse => ErrorKind::MalformedResponse,
        FailureKind::InvalidEndpoint
        | FailureKind::InvalidMediaType
        | FailureKind::Timeout
        | FailureKind::Network => ErrorKind::Transport,
    };
    SubmissionError::new(kind, message)
}

#[cfg(test)]
mod tests {
    use super::map_failure;
    use intake_core::ErrorKind;
    use intake_engine::FailureKind;

    #[test]
    fn service_and_transport_failures_map_to_core_kinds() {
        assert_eq!(
            map_failure(FailureKind::HttpStatus(500), "boom".into()).kind,
            ErrorKind::Service(500)
        );
        assert_eq!(
            map_failure(FailureKind::Timeout, "slow".into()).kind,
            ErrorKind::Transport
        );
        assert_eq!(
            map_failure(FailureKind::Network, "refused".into()).kind,
            ErrorKind::Transport
        );
        assert_eq!(
            map_failure(FailureKind::MalformedResponse, "html".into()).kind,
            ErrorKind::MalformedResponse
        );
    }
}
