use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::state::AppState;
use crate::ui::markdown::prompt_to_lines;
use crate::ui::sidebar::option_label;

pub fn draw_question(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(question) = state.current_question() else {
        return;
    };
    let selected = state.session.selected_option(&question.id);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            format!(
                "Question {} of {}",
                state.current_index() + 1,
                state.quiz.questions.len()
            ),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    lines.extend(prompt_to_lines(&question.prompt));
    lines.push(Line::from(""));

    for (i, option) in question.options.iter().enumerate() {
        let marker = if selected == Some(i) { "(●)" } else { "( )" };
        let under_cursor = i == state.choice_cursor;
        let style = match (selected == Some(i), under_cursor) {
            (true, _) => Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
            (false, true) => Style::default().fg(Color::White).bg(Color::DarkGray),
            (false, false) => Style::default(),
        };
        lines.push(Line::from(vec![
            Span::raw(if under_cursor { " ▸" } else { "  " }),
            Span::styled(format!("{} {}. {}", marker, option_label(i), option), style),
        ]));
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: false });
    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(1),
    };
    f.render_widget(widget, inner);
}
