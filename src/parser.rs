use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use serde::Deserialize;

use crate::error::QuizError;
use crate::model::*;

#[derive(Debug, Deserialize)]
struct Frontmatter {
    id: String,
    title: Option<String>,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    topic: String,
    difficulty: Difficulty,
    duration_minutes: u32,
    total_marks: Option<u32>,
}

/// Parses a Markdown quiz: YAML frontmatter, an H1 title, optional preamble
/// paragraphs, then one `## N. prompt` section per question whose task-list
/// items are the options. The checked item is the correct option.
pub fn parse_quiz(content: &str) -> Result<QuizDefinition, QuizError> {
    let (frontmatter, body) = split_frontmatter(content)?;
    let fm: Frontmatter = serde_yaml::from_str(&frontmatter)
        .map_err(|e| QuizError::Parse(format!("invalid frontmatter: {}", e)))?;

    let (title, preamble, questions) = parse_body(&body)?;

    let total_marks = fm.total_marks.unwrap_or(questions.len() as u32);
    let quiz = QuizDefinition {
        id: fm.id,
        title: fm.title.unwrap_or(title),
        subject: fm.subject,
        topic: fm.topic,
        difficulty: fm.difficulty,
        duration_minutes: fm.duration_minutes,
        total_marks,
        questions,
        preamble,
    };
    quiz.validate()?;
    Ok(quiz)
}

/// Parses a quiz written directly as a YAML `QuizDefinition`.
pub fn parse_quiz_yaml(content: &str) -> Result<QuizDefinition, QuizError> {
    let mut quiz: QuizDefinition = serde_yaml::from_str(content)
        .map_err(|e| QuizError::Parse(format!("invalid quiz document: {}", e)))?;
    if quiz.total_marks == 0 {
        quiz.total_marks = quiz.questions.len() as u32;
    }
    quiz.validate()?;
    Ok(quiz)
}

fn split_frontmatter(content: &str) -> Result<(String, String), QuizError> {
    let trimmed = content.trim_start();
    if !trimmed.starts_with("---") {
        return Err(QuizError::Parse(
            "quiz file must start with YAML frontmatter (---)".to_string(),
        ));
    }

    let after_first = &trimmed[3..];
    let end_pos = after_first
        .find("\n---")
        .ok_or_else(|| QuizError::Parse("no closing --- for frontmatter".to_string()))?;

    let fm = after_first[..end_pos].trim().to_string();
    let body = after_first[end_pos + 4..].to_string();

    Ok((fm, body))
}

#[derive(Default)]
struct Draft {
    number: u32,
    prompt: String,
    options: Vec<String>,
    correct: Vec<usize>,
}

impl Draft {
    fn push_block(&mut self, block: &str) {
        if block.is_empty() {
            return;
        }
        if !self.prompt.is_empty() {
            self.prompt.push_str("\n\n");
        }
        self.prompt.push_str(block);
    }

    fn finish(self) -> Result<Question, QuizError> {
        let id = format!("q{}", self.number);
        if self.options.is_empty() {
            return Err(QuizError::InvalidQuizDefinition(format!(
                "question {} has no options",
                self.number
            )));
        }
        let correct_option = match self.correct.as_slice() {
            [only] => *only,
            [] => {
                return Err(QuizError::InvalidQuizDefinition(format!(
                    "question {} has no option marked correct",
                    self.number
                )))
            }
            _ => {
                return Err(QuizError::InvalidQuizDefinition(format!(
                    "question {} has {} options marked correct",
                    self.number,
                    self.correct.len()
                )))
            }
        };
        Ok(Question {
            id,
            prompt: self.prompt,
            options: self.options,
            correct_option,
        })
    }
}

fn parse_body(body: &str) -> Result<(String, Vec<String>, Vec<Question>), QuizError> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TASKLISTS);
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let mut title = String::new();
    let mut preamble: Vec<String> = Vec::new();
    let mut questions: Vec<Question> = Vec::new();
    let mut current: Option<Draft> = None;

    let mut in_h1 = false;
    let mut in_h2 = false;
    let mut heading_text = String::new();
    let mut in_paragraph = false;
    let mut paragraph_text = String::new();
    let mut in_item = false;
    let mut item_text = String::new();
    let mut item_checked: Option<bool> = None;
    let mut in_code_block = false;
    let mut code_text = String::new();

    for event in Parser::new_ext(body, opts) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => match level {
                HeadingLevel::H1 => in_h1 = true,
                HeadingLevel::H2 => {
                    if let Some(draft) = current.take() {
                        questions.push(draft.finish()?);
                    }
                    in_h2 = true;
                    heading_text.clear();
                }
                _ => {}
            },
            Event::End(TagEnd::Heading(level)) => match level {
                HeadingLevel::H1 => in_h1 = false,
                HeadingLevel::H2 => {
                    in_h2 = false;
                    let (number, prompt) = parse_heading(&heading_text)?;
                    current = Some(Draft {
                        number,
                        prompt,
                        ..Draft::default()
                    });
                }
                _ => {}
            },
            Event::Start(Tag::Item) => {
                in_item = true;
                item_text.clear();
                item_checked = None;
            }
            Event::End(TagEnd::Item) => {
                in_item = false;
                if let Some(draft) = current.as_mut() {
                    let text = item_text.trim().to_string();
                    match item_checked {
                        Some(checked) => {
                            if checked {
                                draft.correct.push(draft.options.len());
                            }
                            draft.options.push(text);
                        }
                        None => draft.push_block(&format!("- {}", text)),
                    }
                }
                item_checked = None;
            }
            Event::TaskListMarker(checked) => {
                item_checked = Some(checked);
            }
            Event::Start(Tag::Paragraph) => {
                in_paragraph = true;
                paragraph_text.clear();
            }
            Event::End(TagEnd::Paragraph) => {
                in_paragraph = false;
                // list items wrap their text in paragraphs when loose
                if in_item {
                    continue;
                }
                let text = paragraph_text.trim().to_string();
                match current.as_mut() {
                    Some(draft) => draft.push_block(&text),
                    None if !in_h1 && !text.is_empty() => preamble.push(text),
                    None => {}
                }
            }
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
                code_text.clear();
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                if let Some(draft) = current.as_mut() {
                    draft.push_block(&format!("```\n{}```", code_text));
                }
            }
            Event::Text(text) => {
                if in_h1 {
                    title.push_str(&text);
                } else if in_h2 {
                    heading_text.push_str(&text);
                } else if in_code_block {
                    code_text.push_str(&text);
                } else if in_item {
                    item_text.push_str(&text);
                } else if in_paragraph {
                    paragraph_text.push_str(&text);
                }
            }
            Event::Code(code) => {
                let c = format!("`{}`", code);
                if in_h2 {
                    heading_text.push_str(&c);
                } else if in_item {
                    item_text.push_str(&c);
                } else if in_paragraph {
                    paragraph_text.push_str(&c);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if in_item {
                    item_text.push(' ');
                } else if in_paragraph {
                    paragraph_text.push(' ');
                }
            }
            _ => {}
        }
    }

    if let Some(draft) = current.take() {
        questions.push(draft.finish()?);
    }

    Ok((title.trim().to_string(), preamble, questions))
}

fn parse_heading(text: &str) -> Result<(u32, String), QuizError> {
    let trimmed = text.trim();
    // Expected format: "1. Prompt text"
    let (num_str, prompt) = trimmed.split_once('.').ok_or_else(|| {
        QuizError::Parse(format!(
            "question heading must be in format '## N. Prompt', got: {}",
            trimmed
        ))
    })?;
    let number: u32 = num_str
        .trim()
        .parse()
        .map_err(|_| QuizError::Parse(format!("invalid question number in heading: {}", trimmed)))?;
    Ok((number, prompt.trim().to_string()))
}
