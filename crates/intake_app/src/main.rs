mod effects;
mod logging;
mod media;
mod shell;

use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use engine_logging::engine_info;
use intake_core::{CandidateFile, Msg, SubmissionStatus};
use intake_engine::SubmitSettings;

use crate::shell::Shell;

const RESOLUTION_TIMEOUT: Duration = Duration::from_secs(120);

fn main() -> ExitCode {
    logging::initialize(logging::LogDestination::File);

    let mut args = std::env::args().skip(1);
    let Some(file_arg) = args.next() else {
        eprintln!("usage: intake_app <invoice file> [endpoint]");
        return ExitCode::FAILURE;
    };
    let path = Path::new(&file_arg);

    let mut settings = SubmitSettings::default();
    if let Some(endpoint) = args.next() {
        settings.endpoint = endpoint;
    }

    let Some(media_type) = media::media_type_for_path(path) else {
        eprintln!("unsupported file type: {}", path.display());
        return ExitCode::FAILURE;
    };
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("cannot read {}: {}", path.display(), err);
            return ExitCode::FAILURE;
        }
    };
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_arg.clone());

    engine_info!(
        "staging {} ({}, {} bytes) for {}",
        name,
        media_type,
        bytes.len(),
        settings.endpoint
    );

    let mut shell = Shell::new(settings);
    shell.dispatch(Msg::FileChosen(CandidateFile::new(name, media_type, bytes)));
    if shell.state().staged().is_none() {
        eprintln!("file was rejected by validation");
        return ExitCode::FAILURE;
    }

    shell.dispatch(Msg::SubmitClicked);
    if !shell.wait_for_resolution(RESOLUTION_TIMEOUT) {
        eprintln!("gave up waiting for the extraction service");
        return ExitCode::FAILURE;
    }

    let view = shell.state().view();
    match view.status {
        SubmissionStatus::Success => {
            if let Some(result) = view.result {
                println!("{}", result.raw_text);
            }
            ExitCode::SUCCESS
        }
        _ => {
            // Diagnostic detail goes to the log; the surface stays generic.
            eprintln!("extraction failed");
            ExitCode::FAILURE
        }
    }
}
