use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;

use crate::model::MAX_OPTIONS;
use crate::state::{AppState, QuestionStatus};

pub fn draw_sidebar(f: &mut Frame, area: Rect, state: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    let visible = area.height.saturating_sub(1) as usize; // title row
    let current = state.current_index();
    let total = state.quiz.questions.len();

    let scroll_offset = state.sidebar_offset(visible);

    for (qi, q) in state
        .quiz
        .questions
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible)
    {
        let (icon, color) = match state.question_status(&q.id) {
            QuestionStatus::Answered => ("●", Color::LightBlue),
            QuestionStatus::Unanswered => ("○", Color::White),
        };

        let is_current = qi == current;
        let style = if is_current {
            Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let choice = state
            .session
            .selected_option(&q.id)
            .map(|i| format!("({})", option_label(i)))
            .unwrap_or_default();

        lines.push(Line::from(vec![
            Span::styled(if is_current { " ▸ " } else { "   " }, style),
            Span::styled(format!("{} ", icon), style.fg(color)),
            Span::styled(format!("{:>2}. ", qi + 1), style),
            Span::styled(choice, style),
        ]));
    }

    let block = Block::default()
        .borders(Borders::RIGHT)
        .title(format!(" {} Questions ", total))
        .title_style(Style::default().add_modifier(Modifier::BOLD));

    let widget = Paragraph::new(lines).block(block);
    f.render_widget(widget, area);

    if total > visible {
        let scrollbar_area = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: visible as u16,
        };
        let mut scrollbar_state = ScrollbarState::new(total.saturating_sub(1)).position(current);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
        f.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}

/// Letter shown for an option. Definitions are limited to
/// `MAX_OPTIONS` options, so every index maps to `a`-`z`.
pub fn option_label(index: usize) -> char {
    char::from(b'a' + index.min(MAX_OPTIONS - 1) as u8)
}
