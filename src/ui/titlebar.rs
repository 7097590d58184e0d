use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::{AppState, Screen};
use crate::timer::format_duration;

pub fn draw_titlebar(f: &mut Frame, area: Rect, state: &AppState) {
    let title = match state.screen {
        Screen::Lesson => state.title.as_str(),
        _ => state.quiz.title().unwrap_or(state.title.as_str()),
    };

    let timer_text = match state.remaining_seconds {
        Some(secs) if !state.is_finished() => {
            let formatted = format!(" {} remaining ", format_duration(secs));
            let style = if secs <= state.warning_secs {
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Rgb(200, 200, 120))
            };
            Span::styled(formatted, style)
        }
        _ => Span::raw(""),
    };

    let title_text = format!("[ {} ]", title);
    let title_len = title_text.chars().count();
    let title_span = Span::styled(
        title_text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    // Center the title over the full width; the timer sits at the right edge.
    let available = area.width as usize;
    let timer_len = timer_text.content.chars().count();
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
