use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::{AppState, Screen};

pub fn draw_statusbar(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![Span::raw(" ")];

    if let Some(msg) = &state.message {
        spans.push(Span::styled(msg.clone(), Style::default().fg(Color::Yellow)));
    } else if state.screen == Screen::Lesson {
        let revealed = state.checks.iter().filter(|c| c.is_revealed()).count();
        spans.push(Span::styled(
            format!("{} of {} checks answered", revealed, state.checks.len()),
            Style::default().fg(Color::White),
        ));
    } else {
        let counts = state.status_counts();
        spans.push(Span::styled(
            format!(
                "◐ {} of {} answered",
                state.quiz.answered_count(),
                state.quiz.gradable_count()
            ),
            Style::default().fg(Color::LightBlue),
        ));
        if counts.degraded > 0 {
            spans.push(Span::raw("   "));
            spans.push(Span::styled(
                format!("⚠ {} not gradable", counts.degraded),
                Style::default().fg(Color::Magenta),
            ));
        }
    }

    spans.push(Span::raw("   "));
    spans.push(Span::styled("[?] help", Style::default().fg(Color::DarkGray)));

    let widget =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Rgb(30, 30, 30)));
    f.render_widget(widget, area);
}
