use std::sync::mpsc;
use std::time::{Duration, Instant};

use intake_core::{update, AppState, Msg};
use intake_engine::SubmitSettings;

use crate::effects::EffectRunner;

/// Headless wiring of the core state machine to the submission engine.
///
/// A rendering surface owns one of these, feeds user events through
/// [`Shell::dispatch`], and drains engine resolutions by blocking on
/// [`Shell::wait_for_resolution`] like the demo binary does.
pub struct Shell {
    state: AppState,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
}

impl Shell {
    pub fn new(settings: SubmitSettings) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            state: AppState::new(),
            runner: EffectRunner::new(settings, msg_tx),
            msg_rx,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply one message and execute whatever effects it produced.
    pub fn dispatch(&mut self, msg: Msg) {
        let (state, effects) = update(std::mem::take(&mut self.state), msg);
        self.state = state;
        self.runner.run(effects);
    }

    /// Block until the in-flight submission resolves or `timeout` elapses.
    /// Returns false on timeout; the guard then stays raised (no
    /// cancellation exists).
    pub fn wait_for_resolution(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.state.in_flight().is_some() {
            let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
                return false;
            };
            match self.msg_rx.recv_timeout(remaining) {
                Ok(msg) => self.dispatch(msg),
                Err(_) => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::Shell;
    use std::time::Duration;

    use intake_core::{CandidateFile, Msg, SubmissionStatus};
    use intake_engine::SubmitSettings;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn shell_for(server: &MockServer) -> Shell {
        Shell::new(SubmitSettings {
            endpoint: format!("{}/process-invoice", server.uri()),
            ..SubmitSettings::default()
        })
    }

    fn invoice() -> CandidateFile {
        CandidateFile::new("inv.pdf", "application/pdf", b"%PDF-1.7".to_vec())
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn full_loop_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process-invoice"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(r#"{"raw_text":"Total: $42.00"}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let mut shell = shell_for(&server);
        shell.dispatch(Msg::FileChosen(invoice()));
        shell.dispatch(Msg::SubmitClicked);
        assert_eq!(shell.state().status(), SubmissionStatus::Uploading);

        assert!(shell.wait_for_resolution(Duration::from_secs(5)));
        let view = shell.state().view();
        assert_eq!(view.status, SubmissionStatus::Success);
        assert_eq!(view.progress, 100);
        assert_eq!(view.result.unwrap().raw_text, "Total: $42.00");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn full_loop_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process-invoice"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut shell = shell_for(&server);
        shell.dispatch(Msg::FileChosen(invoice()));
        shell.dispatch(Msg::SubmitClicked);

        assert!(shell.wait_for_resolution(Duration::from_secs(5)));
        let view = shell.state().view();
        assert_eq!(view.status, SubmissionStatus::Error);
        assert_eq!(view.progress, 100);
        assert!(view.result.is_none());
        assert!(shell.state().last_error().is_some());
    }
}
