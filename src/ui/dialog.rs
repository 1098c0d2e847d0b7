use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::state::{AppState, Dialog};

pub fn draw_dialog(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(dialog) = state.top_dialog() else {
        return;
    };

    match dialog {
        Dialog::ConfirmSubmit => draw_confirm_submit(f, area, state),
        Dialog::ConfirmCancel => draw_confirm_cancel(f, area),
        Dialog::LowTime => draw_low_time(f, area, state),
        Dialog::Help => draw_help(f, area),
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn confirm_row() -> Line<'static> {
    Line::from(vec![
        Span::styled("   [Enter] Confirm", Style::default().fg(Color::Green)),
        Span::raw("    "),
        Span::styled("[Esc] Back", Style::default().fg(Color::DarkGray)),
    ])
}

fn render_box(f: &mut Frame, area: Rect, width: u16, lines: Vec<Line>, border: Color) {
    let rect = centered_rect(width, lines.len() as u16 + 2, area);
    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    f.render_widget(Paragraph::new(lines).block(block), rect);
}

fn draw_confirm_submit(f: &mut Frame, area: Rect, state: &AppState) {
    let counts = state.status_counts();
    let mut lines: Vec<Line> = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Submit your quiz?",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if counts.unanswered > 0 {
        lines.push(Line::from(format!(
            "   {} questions are not answered.",
            counts.unanswered
        )));
        lines.push(Line::from("   They will be scored as wrong."));
        lines.push(Line::from(""));
    }

    lines.push(confirm_row());
    lines.push(Line::from(""));

    render_box(f, area, 42, lines, Color::Yellow);
}

fn draw_confirm_cancel(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Abandon this quiz?",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("   Your answers will be discarded"),
        Line::from("   and nothing will be scored."),
        Line::from(""),
        confirm_row(),
        Line::from(""),
    ];

    render_box(f, area, 40, lines, Color::Yellow);
}

fn draw_low_time(f: &mut Frame, area: Rect, state: &AppState) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("   ⚠  {} REMAINING", state.session.remaining_display()),
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("   Your quiz will be submitted"),
        Line::from("   automatically when time runs out."),
        Line::from(""),
        Line::from(Span::styled(
            "          [Enter] Continue",
            Style::default().fg(Color::Green),
        )),
        Line::from(""),
    ];

    render_box(f, area, 42, lines, Color::Red);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Key Bindings",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("   a-z        Select option"),
        Line::from("   ↑/↓        Move option cursor"),
        Line::from("   Enter      Select option under cursor"),
        Line::from("   ←/→        Previous/Next question"),
        Line::from("   Home/End   First/Last question"),
        Line::from("   Ctrl+S     Submit quiz"),
        Line::from("   Ctrl+Q     Abandon quiz"),
        Line::from("   ?          This help"),
        Line::from("   Esc        Close dialog"),
        Line::from(""),
        Line::from(Span::styled(
            "        [Esc] Close",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    render_box(f, area, 46, lines, Color::Cyan);
}
