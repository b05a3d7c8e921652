use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileChosen(candidate) => {
            state.stage_candidate(candidate);
            Vec::new()
        }
        Msg::FilesDropped(mut files) => {
            // Drop always ends the drag, whatever the validation outcome.
            state.set_dragging(false);
            if !files.is_empty() {
                state.stage_candidate(files.swap_remove(0));
            }
            Vec::new()
        }
        Msg::DragEntered => {
            state.set_dragging(true);
            Vec::new()
        }
        Msg::DragLeft => {
            state.set_dragging(false);
            Vec::new()
        }
        Msg::ClearClicked => {
            state.clear_staged();
            Vec::new()
        }
        Msg::SubmitClicked => match state.begin_submission() {
            Some((submission_id, file)) => vec![Effect::SubmitInvoice {
                submission_id,
                file,
            }],
            None => Vec::new(),
        },
        Msg::SubmissionResolved {
            submission_id,
            outcome,
        } => {
            state.resolve_submission(submission_id, outcome);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
