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
        Dialog::Incomplete(missing) => draw_incomplete(f, area, missing),
        Dialog::ConfirmReset => draw_confirm(
            f,
            area,
            "   Reset the quiz?",
            "   All answers will be cleared.",
        ),
        Dialog::ConfirmQuit => {
            let note = if state.is_finished() {
                "   Your result has been recorded."
            } else {
                "   Unsubmitted answers are lost."
            };
            draw_confirm(f, area, "   Quit?", note)
        }
        Dialog::TimeWarning => draw_time_warning(f, area),
        Dialog::Help => draw_help(f, area),
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn confirm_line() -> Line<'static> {
    Line::from(vec![
        Span::styled("   [Enter] Confirm", Style::default().fg(Color::Green)),
        Span::raw("    "),
        Span::styled("[Esc] Cancel", Style::default().fg(Color::DarkGray)),
    ])
}

fn render_box(f: &mut Frame, area: Rect, width: u16, lines: Vec<Line>, color: Color) {
    let rect = centered_rect(width, lines.len() as u16 + 2, area);
    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let widget = Paragraph::new(lines).block(block);
    f.render_widget(widget, rect);
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

    if counts.not_answered > 0 {
        lines.push(Line::from(format!(
            "   {} questions are not answered.",
            counts.not_answered
        )));
    }
    if counts.degraded > 0 {
        lines.push(Line::from(format!(
            "   {} questions cannot be graded.",
            counts.degraded
        )));
    }

    lines.push(Line::from(""));
    lines.push(confirm_line());
    render_box(f, area, 42, lines, Color::Yellow);
}

fn draw_incomplete(f: &mut Frame, area: Rect, missing: &[usize]) {
    let numbers: Vec<String> = missing.iter().map(|i| (i + 1).to_string()).collect();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Not all questions are answered",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("   Missing: {}", numbers.join(", "))),
        Line::from(""),
        Line::from(Span::styled(
            "   [Enter] Go to first missing",
            Style::default().fg(Color::Green),
        )),
    ];
    render_box(f, area, 44, lines, Color::Yellow);
}

fn draw_confirm(f: &mut Frame, area: Rect, heading: &'static str, note: &'static str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            heading,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(note),
        Line::from(""),
        confirm_line(),
    ];
    render_box(f, area, 40, lines, Color::Yellow);
}

fn draw_time_warning(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   ⚠  2 MINUTES REMAINING",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("   The quiz is graded as it stands"),
        Line::from("   when time runs out."),
        Line::from(""),
        Line::from(Span::styled(
            "          [Enter] Continue",
            Style::default().fg(Color::Green),
        )),
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
        Line::from("   ↑/↓        Previous/Next check (lesson)"),
        Line::from("   ←/→        Previous/Next question"),
        Line::from("   PgUp/PgDn  Scroll / jump 5 questions"),
        Line::from("   Home/End   First/Last question"),
        Line::from("   a-z        Choose an option"),
        Line::from("   Enter      Start quiz / choose"),
        Line::from("   Tab        Switch panel"),
        Line::from("   Esc        Back to the lesson"),
        Line::from("   Ctrl+S     Submit quiz"),
        Line::from("   Ctrl+R     Reset quiz"),
        Line::from("   Ctrl+Q     Quit"),
        Line::from("   ?          This help"),
        Line::from(""),
        Line::from(Span::styled(
            "        [Esc] Close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let rect = centered_rect(48, lines.len() as u16 + 2, area);
    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(Color::Cyan));
    let widget = Paragraph::new(lines).block(block);
    f.render_widget(widget, rect);
}
