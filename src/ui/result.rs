use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::score::is_correct;
use crate::state::AppState;
use crate::submission::Trigger;
use crate::timer::format_remaining;
use crate::ui::sidebar::option_label;

pub fn draw_result(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(result) = state.session.result() else {
        return;
    };

    let headline = match result.trigger {
        Trigger::Timeout => "⏱  Time's Up: Quiz Submitted",
        _ => "✓  Quiz Submitted",
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            headline,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Score: {} / {}  ({}%)",
                result.score.correct_count, result.score.total, result.score.percentage
            ),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Time taken: {}", format_remaining(result.elapsed_seconds))),
        Line::from(""),
    ];

    for (i, q) in state.quiz.questions.iter().enumerate() {
        let chosen = result
            .answers
            .get(&q.id)
            .map(|&o| option_label(o).to_string())
            .unwrap_or_else(|| "-".to_string());
        let (icon, color) = if is_correct(q, &result.answers) {
            ("✓", Color::Green)
        } else {
            ("✗", Color::Red)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", icon), Style::default().fg(color)),
            Span::raw(format!(
                "{:>2}. answered {}, correct {}",
                i + 1,
                chosen,
                option_label(q.correct_option)
            )),
        ]));
    }
    lines.push(Line::from(""));

    let listener = state.session.listener();
    if let Some(path) = &listener.written_to {
        lines.push(Line::from(format!("Report saved to {}", path.display())));
        lines.push(Line::from(""));
    }
    if let Some(err) = &state.report_error {
        lines.push(Line::from(Span::styled(
            format!("Report could not be saved: {}", err),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "[Enter] Exit",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default().borders(Borders::ALL);
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

pub fn draw_cancelled(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Quiz Abandoned",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Your answers were discarded. Nothing was scored."),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Exit",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    let block = Block::default().borders(Borders::ALL);
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}
