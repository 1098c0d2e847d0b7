use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::state::AppState;

pub fn draw_preamble(f: &mut Frame, area: Rect, state: &AppState) {
    let quiz = &state.quiz;
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            quiz.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if !quiz.subject.is_empty() || !quiz.topic.is_empty() {
        lines.push(Line::from(format!("{} · {}", quiz.subject, quiz.topic)));
    }
    lines.push(Line::from(format!(
        "{} questions · {} marks · {} · {} min",
        quiz.questions.len(),
        quiz.total_marks,
        quiz.difficulty,
        quiz.duration_minutes
    )));
    lines.push(Line::from(""));

    for text in &quiz.preamble {
        lines.push(Line::from(text.as_str()));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "The timer starts when you press Enter.",
        Style::default().fg(Color::Yellow),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] Start    [Esc] Leave",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default().borders(Borders::ALL);
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
