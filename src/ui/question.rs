use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::grading::{Feedback, OptionMark};
use crate::model::Question;
use crate::state::{ActivePanel, AppState};
use crate::ui::markdown::{markdown_to_lines, wrap_lines};

/// Option rows: letter, mark and text. `cursor` highlights one row.
pub fn option_lines(
    question: &Question,
    mark: impl Fn(usize) -> OptionMark,
    cursor: Option<usize>,
    gradable: bool,
) -> Vec<Line<'static>> {
    question
        .options
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let label = (b'a' + (i as u8).min(25)) as char;
            let (bullet, style) = match mark(i) {
                OptionMark::Plain => ("( )", Style::default()),
                OptionMark::Selected => ("(●)", Style::default().fg(Color::Cyan)),
                OptionMark::Correct => (
                    "(✓)",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                OptionMark::ChosenWrong => ("(✗)", Style::default().fg(Color::Red)),
            };
            let style = if cursor == Some(i) && gradable {
                style.bg(Color::DarkGray)
            } else {
                style
            };
            let prefix = if gradable {
                format!("  {} {}. ", bullet, label)
            } else {
                "  -  ".to_string()
            };
            Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(text.clone(), style),
            ])
        })
        .collect()
}

/// Verdict line plus explanation, shown once an answer is revealed.
pub fn feedback_lines(question: &Question, feedback: &Feedback<'_>) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from("")];
    let verdict = match (feedback.selected, feedback.is_correct) {
        (_, true) => Span::styled(
            "✓ Correct",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        (None, false) => Span::styled(
            "○ Not answered",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        (Some(_), false) => Span::styled(
            "✗ Incorrect",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };
    let mut verdict_line = vec![verdict];
    if !feedback.is_correct {
        let label = (b'a' + (feedback.correct as u8).min(25)) as char;
        verdict_line.push(Span::raw(format!(
            "  correct answer: {}. {}",
            label,
            question.correct_option().unwrap_or("")
        )));
    }
    lines.push(Line::from(verdict_line));

    if !feedback.explanation.trim().is_empty() {
        lines.push(Line::from(""));
        for l in markdown_to_lines(feedback.explanation) {
            let mut spans = vec![Span::styled("  ", Style::default())];
            spans.extend(l.spans.into_iter().map(|s| {
                let style = s.style.fg(Color::Gray);
                Span::styled(s.content.into_owned(), style)
            }));
            lines.push(Line::from(spans));
        }
    }
    lines
}

pub fn degraded_lines(reason: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            "⚠ This question cannot be checked",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("  {}", reason),
            Style::default().fg(Color::Red),
        )),
    ]
}

pub fn question_lines(state: &AppState, width: usize) -> Vec<Line<'static>> {
    let quiz = &state.quiz;
    let idx = state.current_question;
    let Some(q) = quiz.questions().get(idx) else {
        return vec![Line::from("This quiz has no questions.")];
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("Question {} of {}", idx + 1, quiz.len()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   [{}]", q.id),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(""),
    ];

    if quiz.missing().contains(&idx) {
        lines.push(Line::from(Span::styled(
            "! Answer this question before submitting",
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(""));
    }

    lines.extend(markdown_to_lines(&q.question));
    lines.push(Line::from(""));

    let gradable = quiz.is_gradable(idx);
    let cursor = (!quiz.phase().is_finished()).then_some(state.choice_cursor);
    lines.extend(option_lines(q, |i| quiz.option_mark(idx, i), cursor, gradable));

    if let Some(reason) = quiz.degraded_reason(idx) {
        lines.extend(degraded_lines(&reason.to_string()));
    } else if let Some(fb) = quiz.feedback(idx) {
        lines.extend(feedback_lines(q, &fb));
    }

    wrap_lines(lines, width)
}

pub fn draw_question(f: &mut Frame, area: Rect, state: &AppState) {
    let width = area.width.saturating_sub(4) as usize;
    let lines = question_lines(state, width);

    let border_style = if state.active_panel == ActivePanel::Main {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", state.quiz.title().unwrap_or("Quiz")))
        .border_style(border_style);

    let widget = Paragraph::new(lines).block(block);
    f.render_widget(widget, area);
}
