use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;

use crate::check::{CheckState, InlineCheck};
use crate::model::LessonBlock;
use crate::state::AppState;
use crate::ui::markdown::{body_element_lines, markdown_to_lines, wrap_lines};
use crate::ui::question::{degraded_lines, feedback_lines, option_lines};

fn check_lines(
    check: &InlineCheck,
    number: usize,
    focused: bool,
    cursor: usize,
) -> Vec<Line<'static>> {
    let q = check.question();
    let header_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let mut lines = vec![Line::from(vec![
        Span::styled(if focused { "▸ " } else { "  " }, header_style),
        Span::styled(format!("Check {}", number), header_style),
        Span::styled(format!("   [{}]", q.id), Style::default().fg(Color::DarkGray)),
    ])];
    lines.extend(markdown_to_lines(&q.question));

    let cursor = (focused && matches!(check.state(), CheckState::Unanswered)).then_some(cursor);
    lines.extend(option_lines(
        q,
        |i| check.option_mark(i),
        cursor,
        !check.is_degraded(),
    ));

    match check.state() {
        CheckState::Degraded(reason) => lines.extend(degraded_lines(&reason.to_string())),
        CheckState::Revealed { .. } => {
            if let Some(fb) = check.feedback() {
                lines.extend(feedback_lines(q, &fb));
            }
        }
        CheckState::Unanswered => {}
    }
    lines.push(Line::from(""));
    lines
}

/// Wrapped lesson lines and the row where the focused check starts.
pub fn lesson_lines(state: &AppState, width: usize) -> (Vec<Line<'static>>, usize) {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut focus_row = 0;

    for block in &state.blocks {
        match block {
            LessonBlock::Body(elem) => lines.extend(wrap_lines(body_element_lines(elem), width)),
            LessonBlock::Check(idx) => {
                let Some(check) = state.checks.get(*idx) else {
                    continue;
                };
                let focused = *idx == state.check_cursor;
                if focused {
                    focus_row = lines.len();
                }
                lines.extend(wrap_lines(
                    check_lines(check, idx + 1, focused, state.choice_cursor),
                    width,
                ));
            }
        }
    }

    if !state.quiz.is_empty() {
        let label = if state.is_finished() {
            "Quiz finished. Press Enter to review your result."
        } else {
            "Press Enter to start the quiz."
        };
        lines.push(Line::from(Span::styled(
            label,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
    }

    (lines, focus_row)
}

pub fn draw_lesson(f: &mut Frame, area: Rect, state: &AppState) {
    let width = area.width.saturating_sub(4) as usize;
    let height = area.height.saturating_sub(2) as usize;
    let (lines, focus_row) = lesson_lines(state, width);

    let max_scroll = lines.len().saturating_sub(height);
    let scroll = if state.lesson_follow && !state.checks.is_empty() {
        focus_row.saturating_sub(2)
    } else {
        state.lesson_scroll
    }
    .min(max_scroll);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", state.title))
        .border_style(Style::default().fg(Color::Cyan));

    let total = lines.len();
    let widget = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0));
    f.render_widget(widget, area);

    if total > height {
        let mut scrollbar_state = ScrollbarState::new(max_scroll).position(scroll);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
        f.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}
