use std::sync::Once;

use intake_core::{
    update, AppState, CandidateFile, Effect, ErrorKind, ExtractedResult, Msg, SubmissionError,
    SubmissionStatus,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn staged_pdf() -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::FileChosen(CandidateFile::new(
            "inv.pdf",
            "application/pdf",
            b"%PDF-1.7".to_vec(),
        )),
    );
    state
}

fn result(raw_text: &str) -> ExtractedResult {
    ExtractedResult {
        raw_text: raw_text.to_string(),
        fields: serde_json::Map::new(),
    }
}

#[test]
fn submit_without_a_file_is_a_noop() {
    init_logging();
    let state = AppState::new();
    let before = state.clone();

    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn submit_captures_the_staged_file_and_enters_uploading() {
    init_logging();
    let state = staged_pdf();

    let (state, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(effects.len(), 1);
    let Effect::SubmitInvoice {
        submission_id,
        file,
    } = &effects[0];
    assert_eq!(*submission_id, 1);
    assert_eq!(file.name, "inv.pdf");
    assert_eq!(file.media_type, "application/pdf");

    let view = state.view();
    assert_eq!(view.status, SubmissionStatus::Uploading);
    assert_eq!(view.progress, 0);
    assert!(!view.can_submit);
}

#[test]
fn second_submit_while_in_flight_sends_nothing() {
    init_logging();
    let state = staged_pdf();
    let (state, first) = update(state, Msg::SubmitClicked);
    assert_eq!(first.len(), 1);

    let (state, second) = update(state, Msg::SubmitClicked);

    assert!(second.is_empty());
    assert_eq!(state.view().status, SubmissionStatus::Uploading);
}

#[test]
fn successful_resolution_stores_the_result() {
    init_logging();
    let state = staged_pdf();
    let (state, _) = update(state, Msg::SubmitClicked);

    let (state, effects) = update(
        state,
        Msg::SubmissionResolved {
            submission_id: 1,
            outcome: Ok(result("Total: $42.00")),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.status, SubmissionStatus::Success);
    assert_eq!(view.progress, 100);
    assert_eq!(view.result.unwrap().raw_text, "Total: $42.00");
    assert!(view.can_submit);
}

#[test]
fn failed_resolution_records_the_diagnostic_and_no_result() {
    init_logging();
    let state = staged_pdf();
    let (state, _) = update(state, Msg::SubmitClicked);

    let (state, _) = update(
        state,
        Msg::SubmissionResolved {
            submission_id: 1,
            outcome: Err(SubmissionError::new(
                ErrorKind::Service(500),
                "internal server error",
            )),
        },
    );

    let view = state.view();
    assert_eq!(view.status, SubmissionStatus::Error);
    assert_eq!(view.progress, 100);
    assert!(view.result.is_none());
    assert_eq!(state.last_error().unwrap().kind, ErrorKind::Service(500));
    assert!(view.can_submit);
}

#[test]
fn resubmission_after_failure_is_allowed() {
    init_logging();
    let state = staged_pdf();
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::SubmissionResolved {
            submission_id: 1,
            outcome: Err(SubmissionError::new(ErrorKind::Transport, "refused")),
        },
    );

    let (state, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(effects.len(), 1);
    let Effect::SubmitInvoice { submission_id, .. } = &effects[0];
    assert_eq!(*submission_id, 2);
    assert_eq!(state.view().status, SubmissionStatus::Uploading);
}

#[test]
fn stale_resolution_is_discarded() {
    init_logging();
    let state = staged_pdf();
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::SubmissionResolved {
            submission_id: 1,
            outcome: Ok(result("first")),
        },
    );

    // A resolution for an id that is no longer in flight changes nothing.
    let before = state.clone();
    let (state, _) = update(
        state,
        Msg::SubmissionResolved {
            submission_id: 1,
            outcome: Ok(result("ghost")),
        },
    );

    assert_eq!(state, before);
    assert_eq!(state.view().result.unwrap().raw_text, "first");
}

#[test]
fn restaging_during_flight_does_not_release_the_guard() {
    init_logging();
    let state = staged_pdf();
    let (state, _) = update(state, Msg::SubmitClicked);

    // The user swaps the file while the first submission is outstanding.
    let (state, effects) = update(
        state,
        Msg::FileChosen(CandidateFile::new("other.png", "image/png", vec![1, 2])),
    );
    assert!(effects.is_empty());
    let view = state.view();
    // Visible state follows the new file...
    assert_eq!(view.file.unwrap().name, "other.png");
    assert_eq!(view.status, SubmissionStatus::Idle);
    // ...but the guard still blocks a second submission.
    assert!(!view.can_submit);
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());

    // The original submission still lands.
    let (state, _) = update(
        state,
        Msg::SubmissionResolved {
            submission_id: 1,
            outcome: Ok(result("Total: $42.00")),
        },
    );
    assert_eq!(state.view().status, SubmissionStatus::Success);
    assert_eq!(state.view().result.unwrap().raw_text, "Total: $42.00");
}

#[test]
fn staging_a_new_file_clears_a_previous_result() {
    init_logging();
    let state = staged_pdf();
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::SubmissionResolved {
            submission_id: 1,
            outcome: Ok(result("old total")),
        },
    );
    assert!(state.view().result.is_some());

    let (state, _) = update(
        state,
        Msg::FileChosen(CandidateFile::new("next.png", "image/png", vec![9])),
    );

    let view = state.view();
    assert_eq!(view.status, SubmissionStatus::Idle);
    assert_eq!(view.progress, 0);
    assert!(view.result.is_none());
}
