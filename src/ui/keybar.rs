use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::{AppState, Screen};

pub fn bindings(state: &AppState) -> Vec<(&'static str, &'static str)> {
    match state.screen {
        Screen::Lesson => {
            let mut b = vec![
                ("↑/↓", "prev/next check"),
                ("a-z", "answer check"),
                ("PgUp/PgDn", "scroll"),
            ];
            if !state.quiz.is_empty() {
                b.push(("Enter", "quiz"));
            }
            b.push(("Ctrl+Q", "quit"));
            b
        }
        Screen::Quiz => vec![
            ("a-z", "answer"),
            ("←/→", "prev/next"),
            ("↑/↓", "choice"),
            ("PgUp/PgDn", "jump 5"),
            ("Ctrl+S", "submit"),
            ("Ctrl+R", "reset"),
            ("Ctrl+Q", "quit"),
        ],
        Screen::Result => vec![
            ("arrows", "review"),
            ("Ctrl+R", "retake"),
            ("Enter", "exit"),
        ],
    }
}

pub fn draw_keybar(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, action)) in bindings(state).iter().enumerate() {
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
