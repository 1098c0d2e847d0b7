use std::path::{Path, PathBuf};

use crate::model::QuizDefinition;
use crate::parser;

const QUIZ_EXTENSIONS: [&str; 3] = ["md", "yaml", "yml"];

fn is_quiz_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .map_or(false, |e| QUIZ_EXTENSIONS.contains(&e))
}

/// Resolves a file or directory argument to a single quiz file.
pub fn resolve_source(path_or_dir: &str) -> Result<PathBuf, String> {
    let path = Path::new(path_or_dir).to_path_buf();
    let path = if path.is_relative() {
        std::env::current_dir()
            .map_err(|e| format!("Cannot get cwd: {}", e))?
            .join(path)
    } else {
        path
    };

    if is_quiz_file(&path) {
        Ok(path)
    } else if path.is_dir() {
        find_quiz_file(&path)
    } else {
        Err(format!("Path not found: {}", path.display()))
    }
}

/// Reads and parses a quiz file, choosing the format by extension.
pub fn load_quiz(path: &Path) -> Result<QuizDefinition, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read quiz file {}: {}", path.display(), e))?;

    let is_markdown = path.extension().map_or(false, |e| e == "md");
    let parsed = if is_markdown {
        parser::parse_quiz(&content)
    } else {
        parser::parse_quiz_yaml(&content)
    };
    parsed.map_err(|e| format!("{}: {}", path.display(), e))
}

fn find_quiz_file(dir: &Path) -> Result<PathBuf, String> {
    let mut quiz_files: Vec<PathBuf> = Vec::new();

    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("Cannot read directory {}: {}", dir.display(), e))?;

    for entry in entries {
        let entry = entry.map_err(|e| format!("Error reading entry: {}", e))?;
        let path = entry.path();
        if is_quiz_file(&path) {
            quiz_files.push(path);
        }
    }

    match quiz_files.len() {
        0 => Err(format!("No quiz files found in {}", dir.display())),
        1 => Ok(quiz_files.remove(0)),
        _ => {
            quiz_files.sort();
            let names: Vec<String> = quiz_files
                .iter()
                .map(|p| format!("  - {}", p.file_name().unwrap_or_default().to_string_lossy()))
                .collect();
            Err(format!(
                "Multiple quiz files found. Specify which one:\n{}",
                names.join("\n")
            ))
        }
    }
}
