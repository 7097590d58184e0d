use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::quiz::Phase;
use crate::state::AppState;
use crate::ui::question::draw_question;

pub fn summary_lines(state: &AppState) -> Vec<Line<'static>> {
    let (score, expired) = match state.quiz.phase() {
        Phase::Completed(s) => (s, false),
        Phase::Expired(s) => (s, true),
        _ => return vec![Line::from("Quiz not finished.")],
    };

    let mut headline = vec![Span::styled(
        format!(
            " Score: {} / {} ({}%)",
            score.correct,
            score.total,
            score.percent()
        ),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(threshold) = state.pass_threshold {
        let (text, color) = if score.passed(threshold) {
            ("PASS", Color::Green)
        } else {
            ("FAIL", Color::Red)
        };
        headline.push(Span::raw("   "));
        headline.push(Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        headline.push(Span::styled(
            format!("  (pass mark {}%)", threshold),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mut lines = vec![Line::from(headline)];
    if expired {
        lines.push(Line::from(Span::styled(
            " Time ran out; unanswered questions count as incorrect.",
            Style::default().fg(Color::Yellow),
        )));
    }
    let excluded = state.quiz.len() - state.quiz.gradable_count();
    if excluded > 0 {
        lines.push(Line::from(Span::styled(
            format!(" {} question(s) could not be graded and are not counted.", excluded),
            Style::default().fg(Color::Magenta),
        )));
    }
    lines
}

pub fn draw_result(f: &mut Frame, area: Rect, state: &AppState) {
    let summary = summary_lines(state);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(summary.len() as u16 + 2),
            Constraint::Min(3),
        ])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Result ")
        .border_style(Style::default().fg(Color::Green));
    f.render_widget(Paragraph::new(summary).block(block), chunks[0]);

    draw_question(f, chunks[1], state);
}
