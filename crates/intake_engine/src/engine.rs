use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use engine_logging::engine_debug;

use crate::submit::{ReqwestSubmitter, SubmitSettings, Submitter};
use crate::{EngineEvent, InvoicePayload, SubmissionId};

enum EngineCommand {
    Submit {
        submission_id: SubmissionId,
        payload: InvoicePayload,
    },
}

/// Handle to the engine's dedicated IO thread.
///
/// Commands go in over a channel; completions come back out through
/// [`EngineHandle::try_recv`]. Cloneable so one thread can poll events while
/// another dispatches submissions.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: SubmitSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let submitter = Arc::new(ReqwestSubmitter::new(settings));

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let submitter = submitter.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(submitter.as_ref(), command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn submit(&self, submission_id: SubmissionId, payload: InvoicePayload) {
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            submission_id,
            payload,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn handle_command(
    submitter: &dyn Submitter,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit {
            submission_id,
            payload,
        } => {
            engine_debug!(
                "submitting id={} file={} media_type={} bytes={}",
                submission_id,
                payload.file_name,
                payload.media_type,
                payload.bytes.len()
            );
            let result = submitter.submit(&payload).await;
            let _ = event_tx.send(EngineEvent::SubmissionCompleted {
                submission_id,
                result,
            });
        }
    }
}
