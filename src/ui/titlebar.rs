use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::AppState;
use crate::timer::Urgency;

pub fn draw_titlebar(f: &mut Frame, area: Rect, state: &AppState) {
    let formatted = format!(" {} remaining ", state.session.remaining_display());
    let timer_style = match state.session.urgency() {
        Urgency::Warning => Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD),
        Urgency::Normal => Style::default().fg(Color::Rgb(200, 200, 120)),
    };
    let timer_len = formatted.chars().count();
    let timer_text = Span::styled(formatted, timer_style);

    let title_text = format!("[ {} ]", state.quiz.title);
    let title_len = title_text.chars().count();
    let title_span = Span::styled(
        title_text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    // Center the title; the timer sits at the right edge
    let available = area.width as usize;
    let center_pad = available.saturating_sub(title_len) / 2;
    let right_pad = available.saturating_sub(center_pad + title_len + timer_len);

    let line = Line::from(vec![
        Span::raw(" ".repeat(center_pad)),
        title_span,
        Span::raw(" ".repeat(right_pad)),
        timer_text,
    ]);

    let widget = Paragraph::new(line)
        .style(Style::default().bg(Color::DarkGray))
        .alignment(Alignment::Left);
    f.render_widget(widget, area);
}
