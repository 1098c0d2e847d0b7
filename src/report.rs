use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::error::ListenerError;
use crate::model::QuizDefinition;
use crate::score::is_correct;
use crate::submission::{QuizResult, SessionListener, Trigger};

#[derive(Debug, Serialize)]
pub struct Report {
    pub quiz: ReportQuiz,
    pub result: ReportResult,
    pub questions: Vec<ReportQuestion>,
}

#[derive(Debug, Serialize)]
pub struct ReportQuiz {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub topic: String,
    pub difficulty: String,
    pub duration_minutes: u32,
    pub total_marks: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReportResult {
    pub trigger: Trigger,
    pub correct: u32,
    pub total: u32,
    pub percentage: u32,
    pub elapsed_seconds: u64,
    pub submitted_at: String,
}

#[derive(Debug, Serialize)]
pub struct ReportQuestion {
    pub id: String,
    pub selected: Option<usize>,
    pub correct_option: usize,
    pub correct: bool,
}

pub fn build_report(quiz: &QuizDefinition, result: &QuizResult, source_hash: Option<&str>) -> Report {
    let questions = quiz
        .questions
        .iter()
        .map(|q| ReportQuestion {
            id: q.id.clone(),
            selected: result.answers.get(&q.id).copied(),
            correct_option: q.correct_option,
            correct: is_correct(q, &result.answers),
        })
        .collect();

    Report {
        quiz: ReportQuiz {
            id: quiz.id.clone(),
            title: quiz.title.clone(),
            subject: quiz.subject.clone(),
            topic: quiz.topic.clone(),
            difficulty: quiz.difficulty.to_string(),
            duration_minutes: quiz.duration_minutes,
            total_marks: quiz.total_marks,
            source_hash: source_hash.map(str::to_string),
        },
        result: ReportResult {
            trigger: result.trigger,
            correct: result.score.correct_count,
            total: result.score.total,
            percentage: result.score.percentage,
            elapsed_seconds: result.elapsed_seconds,
            submitted_at: result.submitted_at.to_rfc3339(),
        },
        questions,
    }
}

pub fn report_yaml(report: &Report) -> Result<String, String> {
    serde_yaml::to_string(report).map_err(|e| format!("Cannot serialize report: {}", e))
}

pub fn save_report(path: &Path, report: &Report) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Cannot create report dir: {}", e))?;
        }
    }
    atomic_write(path, &report_yaml(report)?)
}

fn atomic_write(path: &Path, content: &str) -> Result<(), String> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content).map_err(|e| format!("Cannot write {}: {}", tmp.display(), e))?;
    fs::rename(&tmp, path).map_err(|e| format!("Cannot rename: {}", e))?;
    Ok(())
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

pub fn compute_file_hash(path: &Path) -> Result<String, String> {
    let content =
        fs::read(path).map_err(|e| format!("Cannot read file {}: {}", path.display(), e))?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    let result = hasher.finalize();
    Ok(format!("sha256:{}", hex_encode(&result)))
}

pub fn print_summary(quiz: &QuizDefinition) {
    println!("Quiz: {} ({})", quiz.title, quiz.id);
    if !quiz.subject.is_empty() || !quiz.topic.is_empty() {
        println!("Subject: {} / {}", quiz.subject, quiz.topic);
    }
    println!("Difficulty: {}", quiz.difficulty);
    println!("Questions: {}", quiz.questions.len());
    println!("Duration: {} min", quiz.duration_minutes);
    println!("Total marks: {}", quiz.total_marks);
}

/// Listener used by the terminal front end: remembers how the session ended
/// and optionally writes a report file on completion.
pub struct ReportWriter {
    quiz: QuizDefinition,
    source_hash: Option<String>,
    path: Option<PathBuf>,
    pub written_to: Option<PathBuf>,
    pub cancelled: bool,
}

impl ReportWriter {
    pub fn new(quiz: QuizDefinition, source_hash: Option<String>, path: Option<PathBuf>) -> Self {
        Self {
            quiz,
            source_hash,
            path,
            written_to: None,
            cancelled: false,
        }
    }
}

impl SessionListener for ReportWriter {
    fn on_complete(&mut self, result: &QuizResult) -> Result<(), ListenerError> {
        let Some(path) = self.path.clone() else {
            return Ok(());
        };
        let report = build_report(&self.quiz, result, self.source_hash.as_deref());
        save_report(&path, &report)?;
        info!(path = %path.display(), "report written");
        self.written_to = Some(path);
        Ok(())
    }

    fn on_cancel(&mut self) {
        self.cancelled = true;
    }
}
