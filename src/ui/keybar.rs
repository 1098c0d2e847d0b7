use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

const BINDINGS: [(&str, &str); 6] = [
    ("a-z", "answer"),
    ("←/→", "prev/next"),
    ("↑/↓ Enter", "pick"),
    ("Ctrl+S", "submit"),
    ("Ctrl+Q", "cancel"),
    ("?", "help"),
];

pub fn draw_keybar(f: &mut Frame, area: Rect) {
    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, action)) in BINDINGS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}", action)));
    }

    let line = Line::from(spans);
    let widget = Paragraph::new(line).style(Style::default().bg(Color::Rgb(20, 20, 20)));
    f.render_widget(widget, area);
}
