use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};

use studyquiz::cli::Cli;
use studyquiz::report::{self, ReportWriter};
use studyquiz::session::QuizSession;
use studyquiz::state::AppState;
use studyquiz::{source, telemetry, tui};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let quiz_path = source::resolve_source(&cli.path)?;
    let mut quiz = source::load_quiz(&quiz_path)?;

    if let Some(minutes) = cli.duration {
        quiz.duration_minutes = minutes;
    }

    // Handle --check
    if cli.check {
        report::print_summary(&quiz);
        return Ok(());
    }

    let log_path = cli
        .log_file
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(telemetry::default_log_path);
    if let Err(e) = telemetry::init_tracing(&log_path) {
        eprintln!("Warning: {}", e);
    }

    let quiz_hash = match report::compute_file_hash(&quiz_path) {
        Ok(hash) => Some(hash),
        Err(e) => {
            warn!(error = %e, "cannot hash quiz file");
            None
        }
    };
    info!(path = %quiz_path.display(), quiz_id = %quiz.id, "quiz loaded");

    let listener = ReportWriter::new(quiz.clone(), quiz_hash, cli.report.map(PathBuf::from));
    let session = QuizSession::new(listener);
    let state = AppState::new(quiz, session);

    tui::run_tui(state)
}
