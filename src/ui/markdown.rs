use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::model::BodyElement;

/// Renders inline Markdown (emphasis, code spans, lists) as styled lines.
pub fn markdown_to_lines(text: &str) -> Vec<Line<'static>> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut styles: Vec<Style> = vec![Style::default()];

    let flush = |current: &mut Vec<Span<'static>>, lines: &mut Vec<Line<'static>>| {
        if !current.is_empty() {
            lines.push(Line::from(std::mem::take(current)));
        }
    };

    for event in Parser::new_ext(text, opts) {
        let top = *styles.last().unwrap_or(&Style::default());
        match event {
            Event::Start(Tag::Strong) => styles.push(top.add_modifier(Modifier::BOLD)),
            Event::Start(Tag::Emphasis) => styles.push(top.add_modifier(Modifier::ITALIC)),
            Event::Start(Tag::Strikethrough) => {
                styles.push(top.add_modifier(Modifier::CROSSED_OUT))
            }
            Event::End(TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough) => {
                styles.pop();
            }
            Event::Start(Tag::Item) => {
                flush(&mut current, &mut lines);
                current.push(Span::raw("  • "));
            }
            Event::End(TagEnd::Item | TagEnd::Paragraph) => flush(&mut current, &mut lines),
            Event::Text(t) => current.push(Span::styled(t.to_string(), top)),
            Event::Code(code) => current.push(Span::styled(
                code.to_string(),
                Style::default().fg(Color::Yellow),
            )),
            Event::SoftBreak => current.push(Span::raw(" ")),
            Event::HardBreak => flush(&mut current, &mut lines),
            _ => {}
        }
    }
    flush(&mut current, &mut lines);

    if lines.is_empty() {
        lines.push(Line::from(""));
    }
    lines
}

pub fn body_element_lines(elem: &BodyElement) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    match elem {
        BodyElement::Heading(text) => {
            lines.push(Line::from(Span::styled(
                text.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
        }
        BodyElement::Text(text) => {
            lines.extend(markdown_to_lines(text));
            lines.push(Line::from(""));
        }
        BodyElement::Code(code) => {
            for code_line in code.lines() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", code_line),
                    Style::default().fg(Color::Green),
                )));
            }
            lines.push(Line::from(""));
        }
        BodyElement::ListItem(text) => {
            let mut spans = vec![Span::raw("  • ")];
            for l in markdown_to_lines(text) {
                spans.extend(l.spans);
            }
            lines.push(Line::from(spans));
        }
        BodyElement::Table { header, rows } => {
            lines.extend(table_lines(header, rows));
            lines.push(Line::from(""));
        }
    }
    lines
}

fn table_lines(header: &[String], rows: &[Vec<String>]) -> Vec<Line<'static>> {
    let cols = rows
        .iter()
        .map(|r| r.len())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0);
    let mut widths = vec![0usize; cols];
    for row in std::iter::once(header).chain(rows.iter().map(|r| r.as_slice())) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let render_row = |row: &[String], style: Style| -> Line<'static> {
        let mut spans = vec![Span::raw("  ")];
        for (i, w) in widths.iter().enumerate() {
            let cell = row.get(i).map(|s| s.as_str()).unwrap_or("");
            let pad = w.saturating_sub(cell.chars().count());
            spans.push(Span::styled(format!("{}{}", cell, " ".repeat(pad)), style));
            if i + 1 < cols {
                spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
            }
        }
        Line::from(spans)
    };

    let mut lines = Vec::new();
    if !header.is_empty() {
        lines.push(render_row(header, Style::default().add_modifier(Modifier::BOLD)));
        let rule: usize = widths.iter().sum::<usize>() + 3 * cols.saturating_sub(1);
        lines.push(Line::from(Span::styled(
            format!("  {}", "─".repeat(rule)),
            Style::default().fg(Color::DarkGray),
        )));
    }
    for row in rows {
        lines.push(render_row(row, Style::default()));
    }
    lines
}

/// Wraps a styled line at `width` columns, breaking on spaces where
/// possible and keeping each character's style.
pub fn wrap_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return vec![line];
    }
    let total: usize = line.spans.iter().map(|s| s.content.chars().count()).sum();
    if total <= width {
        return vec![line];
    }

    let chars: Vec<(char, Style)> = line
        .spans
        .iter()
        .flat_map(|s| s.content.chars().map(move |c| (c, s.style)))
        .collect();

    let mut out = Vec::new();
    let mut pos = 0;
    while pos < chars.len() {
        if chars.len() - pos <= width {
            out.push(styled_chars_to_line(&chars[pos..]));
            break;
        }
        let end = pos + width;
        let cut = if chars[end].0 == ' ' {
            end
        } else {
            match chars[pos..end].iter().rposition(|(c, _)| *c == ' ') {
                Some(sp) if sp > 0 => pos + sp,
                _ => end,
            }
        };
        out.push(styled_chars_to_line(&chars[pos..cut]));
        pos = cut;
        while pos < chars.len() && chars[pos].0 == ' ' {
            pos += 1;
        }
    }
    out
}

pub fn wrap_lines(lines: Vec<Line<'static>>, width: usize) -> Vec<Line<'static>> {
    lines.into_iter().flat_map(|l| wrap_line(l, width)).collect()
}

fn styled_chars_to_line(chars: &[(char, Style)]) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut text = String::new();
    let mut style = chars.first().map(|c| c.1).unwrap_or_default();

    for &(c, s) in chars {
        if s != style && !text.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut text), style));
        }
        style = s;
        text.push(c);
    }
    if !text.is_empty() {
        spans.push(Span::styled(text, style));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn wraps_on_spaces() {
        let lines = wrap_line(Line::from("alpha beta gamma delta"), 11);
        let text: Vec<String> = lines.iter().map(plain).collect();
        assert_eq!(text, vec!["alpha beta", "gamma delta"]);
    }

    #[test]
    fn bold_survives_markdown() {
        let lines = markdown_to_lines("Use **V = I × R** here");
        let bold = lines[0]
            .spans
            .iter()
            .find(|s| s.content.as_ref() == "V = I × R")
            .map(|s| s.style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(bold, Some(true));
    }
}
