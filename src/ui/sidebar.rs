use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;

use crate::state::{ActivePanel, AppState, QuestionStatus};

const STATUS_ROWS: usize = 5; // 1 separator + 4 status lines

pub fn status_icon(status: QuestionStatus) -> (&'static str, Color) {
    match status {
        QuestionStatus::Unread => ("·", Color::DarkGray),
        QuestionStatus::Seen => ("○", Color::White),
        QuestionStatus::Answered => ("◐", Color::LightBlue),
        QuestionStatus::Missing => ("!", Color::Yellow),
        QuestionStatus::Correct => ("✓", Color::Green),
        QuestionStatus::Incorrect => ("✗", Color::Red),
        QuestionStatus::Degraded => ("⚠", Color::Magenta),
    }
}

pub fn draw_sidebar(f: &mut Frame, area: Rect, state: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    let inner_height = area.height.saturating_sub(2) as usize;
    let inner_width = area.width.saturating_sub(1) as usize; // -1 for right border
    let question_height = inner_height.saturating_sub(STATUS_ROWS).max(1);
    let current = state.current_question;
    let total = state.quiz.len();

    // Keep the current question in view.
    let scroll_offset = current.saturating_sub(question_height - 1);
    let id_max_len = area.width.saturating_sub(11) as usize;

    for (qi, q) in state
        .quiz
        .questions()
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(question_height)
    {
        let status = state.question_status(qi);
        let (icon, color) = status_icon(status);

        let is_current = qi == current;
        let bg = if is_current {
            Color::DarkGray
        } else {
            Color::Reset
        };
        let style = if is_current {
            Style::default()
                .fg(Color::White)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(bg)
        };

        let id = q.id.to_string();
        let id_display = if id.chars().count() > id_max_len {
            let cut: String = id.chars().take(id_max_len.saturating_sub(1)).collect();
            format!("{}…", cut)
        } else {
            id
        };

        lines.push(Line::from(vec![
            Span::styled(if is_current { " ▸ " } else { "   " }, style),
            Span::styled(format!("{} ", icon), Style::default().fg(color).bg(bg)),
            Span::styled(format!("{:>2}. ", qi + 1), style),
            Span::styled(id_display, style),
        ]));
    }

    while lines.len() < question_height {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "─".repeat(inner_width),
        Style::default().fg(Color::DarkGray),
    )));

    let counts = state.status_counts();
    let status_items: Vec<(&str, usize, Color, &str)> = if state.is_finished() {
        vec![
            ("✓", counts.correct, Color::Green, "correct"),
            ("✗", counts.incorrect, Color::Red, "incorrect"),
            ("⚠", counts.degraded, Color::Magenta, "not gradable"),
        ]
    } else {
        vec![
            ("◐", counts.answered, Color::LightBlue, "answered"),
            ("○", counts.not_answered, Color::White, "not answered"),
            ("!", counts.missing, Color::Yellow, "missing"),
            ("⚠", counts.degraded, Color::Magenta, "not gradable"),
        ]
    };
    for (icon, count, color, label) in status_items {
        lines.push(Line::from(Span::styled(
            format!("  {} {:>2} {}", icon, count, label),
            Style::default().fg(color),
        )));
    }

    let border_style = if state.active_panel == ActivePanel::Sidebar {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::RIGHT)
        .title(format!(" {} Questions ", total))
        .title_style(Style::default().add_modifier(Modifier::BOLD))
        .border_style(border_style);

    let widget = Paragraph::new(lines).block(block);
    f.render_widget(widget, area);

    if total > question_height {
        let scrollbar_area = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: question_height as u16,
        };
        let mut scrollbar_state = ScrollbarState::new(total.saturating_sub(1))
            .position(current)
            .viewport_content_length(3);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
        f.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}
