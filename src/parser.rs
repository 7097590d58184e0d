use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::error::ParseError;
use crate::model::*;

/// Parses a Markdown lesson.
///
/// `## Check: <id>` starts an inline check and `## Quiz: <id>` a question
/// for the closing quiz. Within such a section the paragraphs before the
/// task list form the prompt, `- [x]` marks the correct option and a
/// `:::explanation ... :::` block holds the explanation. Any later prose
/// belongs to the lesson again.
pub fn parse_lesson(content: &str) -> Result<Lesson, ParseError> {
    let (front, body) = split_frontmatter(content)?;
    let fm: LessonFrontMatter = match front {
        Some(yaml) if !yaml.trim().is_empty() => serde_yaml::from_str(&yaml)?,
        _ => LessonFrontMatter::default(),
    };

    let mut builder = LessonBuilder::default();
    builder.run(&body)?;

    let title = fm
        .title
        .or(builder.title.take())
        .unwrap_or_else(|| "Untitled lesson".to_string());
    log::debug!(
        "parsed lesson '{}': {} blocks, {} checks, {} quiz questions",
        title,
        builder.blocks.len(),
        builder.checks.len(),
        builder.quiz.len()
    );

    Ok(Lesson {
        title,
        quiz_title: fm.quiz_title,
        pass_threshold: fm.pass_threshold,
        blocks: builder.blocks,
        checks: builder.checks,
        quiz: builder.quiz,
    })
}

fn split_frontmatter(content: &str) -> Result<(Option<String>, String), ParseError> {
    let trimmed = content.trim_start();
    if !trimmed.starts_with("---") {
        return Ok((None, content.to_string()));
    }

    let after_first = &trimmed[3..];
    let end_pos = after_first
        .find("\n---")
        .ok_or(ParseError::UnterminatedFrontMatter)?;

    let fm = after_first[..end_pos].trim().to_string();
    let body = after_first[end_pos + 4..].to_string();
    Ok((Some(fm), body))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SectionKind {
    Check,
    Quiz,
}

#[derive(Debug)]
struct PendingQuestion {
    kind: SectionKind,
    id: QuestionId,
    prompt: Vec<String>,
    options: Vec<(String, bool)>,
    explanation: Vec<String>,
}

#[derive(Debug, Default)]
struct LessonBuilder {
    title: Option<String>,
    blocks: Vec<LessonBlock>,
    checks: Vec<Question>,
    quiz: Vec<Question>,

    pending: Option<PendingQuestion>,
    in_explanation: bool,

    heading: Option<(HeadingLevel, String)>,
    in_paragraph: bool,
    paragraph_text: String,
    in_list_item: bool,
    list_item_text: String,
    task_marker: Option<bool>,
    in_code_block: bool,
    code_block_text: String,
    table: Option<TableBuf>,
}

#[derive(Debug, Default)]
struct TableBuf {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell: Option<String>,
}

impl LessonBuilder {
    fn run(&mut self, body: &str) -> Result<(), ParseError> {
        let mut opts = Options::empty();
        opts.insert(Options::ENABLE_TASKLISTS);
        opts.insert(Options::ENABLE_STRIKETHROUGH);
        opts.insert(Options::ENABLE_TABLES);

        for event in Parser::new_ext(body, opts) {
            self.event(event)?;
        }
        self.finalize_question()
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), ParseError> {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                self.heading = Some((level, String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, text)) = self.heading.take() {
                    self.end_heading(level, text.trim().to_string())?;
                }
            }
            Event::Start(Tag::Paragraph) => {
                self.in_paragraph = true;
                self.paragraph_text.clear();
            }
            Event::End(TagEnd::Paragraph) => {
                self.in_paragraph = false;
                if !self.in_list_item {
                    let text = std::mem::take(&mut self.paragraph_text);
                    self.end_paragraph(text.trim().to_string())?;
                }
            }
            Event::Start(Tag::Item) => {
                self.in_list_item = true;
                self.list_item_text.clear();
                self.task_marker = None;
            }
            Event::End(TagEnd::Item) => {
                self.in_list_item = false;
                let text = std::mem::take(&mut self.list_item_text).trim().to_string();
                let marker = self.task_marker.take();
                self.end_item(text, marker)?;
            }
            Event::TaskListMarker(checked) => {
                self.task_marker = Some(checked);
            }
            Event::Start(Tag::CodeBlock(_)) => {
                self.in_code_block = true;
                self.code_block_text.clear();
            }
            Event::End(TagEnd::CodeBlock) => {
                self.in_code_block = false;
                let code = std::mem::take(&mut self.code_block_text);
                self.prose(BodyElement::Code(code))?;
            }
            Event::Start(Tag::Table(_)) => {
                self.table = Some(TableBuf::default());
            }
            Event::End(TagEnd::Table) => {
                if let Some(t) = self.table.take() {
                    self.prose(BodyElement::Table {
                        header: t.header,
                        rows: t.rows,
                    })?;
                }
            }
            Event::Start(Tag::TableCell) => {
                if let Some(t) = self.table.as_mut() {
                    t.cell = Some(String::new());
                }
            }
            Event::End(TagEnd::TableCell) => {
                if let Some(t) = self.table.as_mut() {
                    let cell = t.cell.take().unwrap_or_default();
                    t.row.push(cell.trim().to_string());
                }
            }
            Event::End(TagEnd::TableHead) => {
                if let Some(t) = self.table.as_mut() {
                    t.header = std::mem::take(&mut t.row);
                }
            }
            Event::End(TagEnd::TableRow) => {
                if let Some(t) = self.table.as_mut() {
                    let row = std::mem::take(&mut t.row);
                    t.rows.push(row);
                }
            }
            Event::Start(Tag::Strong) | Event::End(TagEnd::Strong) => self.push_inline("**"),
            Event::Start(Tag::Emphasis) | Event::End(TagEnd::Emphasis) => self.push_inline("*"),
            Event::Text(text) => {
                if self.in_code_block {
                    self.code_block_text.push_str(&text);
                } else {
                    self.push_inline(&text);
                }
            }
            Event::Code(code) => self.push_inline(&format!("`{}`", code)),
            Event::SoftBreak | Event::HardBreak => self.push_inline(" "),
            _ => {}
        }
        Ok(())
    }

    fn push_inline(&mut self, s: &str) {
        if let Some((_, text)) = self.heading.as_mut() {
            text.push_str(s);
        } else if let Some(cell) = self.table.as_mut().and_then(|t| t.cell.as_mut()) {
            cell.push_str(s);
        } else if self.in_list_item {
            self.list_item_text.push_str(s);
        } else if self.in_paragraph {
            self.paragraph_text.push_str(s);
        }
    }

    fn end_heading(&mut self, level: HeadingLevel, text: String) -> Result<(), ParseError> {
        if level == HeadingLevel::H1 && self.title.is_none() {
            self.finalize_question()?;
            self.title = Some(text);
            return Ok(());
        }
        if level == HeadingLevel::H2 {
            if let Some((kind, id)) = parse_question_heading(&text)? {
                self.finalize_question()?;
                self.pending = Some(PendingQuestion {
                    kind,
                    id,
                    prompt: Vec::new(),
                    options: Vec::new(),
                    explanation: Vec::new(),
                });
                return Ok(());
            }
        }
        self.prose(BodyElement::Heading(text))
    }

    fn end_paragraph(&mut self, text: String) -> Result<(), ParseError> {
        if text.is_empty() {
            return Ok(());
        }

        if self.in_explanation {
            let (body, closed) = strip_close(&text);
            self.push_explanation(body);
            self.in_explanation = !closed;
            return Ok(());
        }

        if self.pending.is_some() {
            if let Some(rest) = text.strip_prefix(":::explanation") {
                let (body, closed) = strip_close(rest.trim());
                self.push_explanation(body);
                self.in_explanation = !closed;
                return Ok(());
            }
        }

        match self.pending.as_mut() {
            Some(p) if p.options.is_empty() => {
                p.prompt.push(text);
                Ok(())
            }
            _ => self.prose(BodyElement::Text(text)),
        }
    }

    fn end_item(&mut self, text: String, marker: Option<bool>) -> Result<(), ParseError> {
        match (self.pending.as_mut(), marker) {
            (Some(p), Some(checked)) if p.explanation.is_empty() => {
                p.options.push((text, checked));
                Ok(())
            }
            (Some(p), None) if p.options.is_empty() && !text.is_empty() => {
                p.prompt.push(format!("• {}", text));
                Ok(())
            }
            _ if text.is_empty() => Ok(()),
            _ => self.prose(BodyElement::ListItem(text)),
        }
    }

    fn push_explanation(&mut self, body: &str) {
        if body.is_empty() {
            return;
        }
        if let Some(p) = self.pending.as_mut() {
            p.explanation.push(body.to_string());
        }
    }

    /// Lesson prose. Closes any open question section first.
    fn prose(&mut self, element: BodyElement) -> Result<(), ParseError> {
        if let Some(p) = &self.pending {
            if p.options.is_empty() && !self.in_explanation {
                // Still collecting the prompt.
                if let BodyElement::Code(code) | BodyElement::Text(code) = &element {
                    let code = code.clone();
                    if let Some(p) = self.pending.as_mut() {
                        p.prompt.push(code);
                    }
                    return Ok(());
                }
            }
            self.finalize_question()?;
        }
        self.blocks.push(LessonBlock::Body(element));
        Ok(())
    }

    fn finalize_question(&mut self) -> Result<(), ParseError> {
        self.in_explanation = false;
        let Some(p) = self.pending.take() else {
            return Ok(());
        };

        let marked: Vec<usize> = p
            .options
            .iter()
            .enumerate()
            .filter(|(_, (_, checked))| *checked)
            .map(|(i, _)| i)
            .collect();
        let correct_answer = match marked.as_slice() {
            [only] => *only,
            [] => return Err(ParseError::NoCorrectOption { id: p.id }),
            many => {
                return Err(ParseError::MultipleCorrectOptions {
                    id: p.id,
                    count: many.len(),
                })
            }
        };

        let question = Question {
            id: p.id,
            question: p.prompt.join("\n\n"),
            options: p.options.into_iter().map(|(text, _)| text).collect(),
            correct_answer,
            explanation: p.explanation.join("\n\n"),
            section: None,
            difficulty: None,
            topic: None,
            category: None,
        };

        match p.kind {
            SectionKind::Check => {
                self.blocks.push(LessonBlock::Check(self.checks.len()));
                self.checks.push(question);
            }
            SectionKind::Quiz => self.quiz.push(question),
        }
        Ok(())
    }
}

/// `Check: id` / `Quiz: id`, case-insensitive. `None` for ordinary headings.
fn parse_question_heading(text: &str) -> Result<Option<(SectionKind, QuestionId)>, ParseError> {
    let Some((prefix, rest)) = text.split_once(':') else {
        return Ok(None);
    };
    let kind = match prefix.trim().to_ascii_lowercase().as_str() {
        "check" => SectionKind::Check,
        "quiz" => SectionKind::Quiz,
        _ => return Ok(None),
    };
    let id = rest.trim();
    if id.is_empty() {
        return Err(ParseError::MissingId(text.to_string()));
    }
    Ok(Some((kind, QuestionId::from(id))))
}

fn strip_close(text: &str) -> (&str, bool) {
    match text.strip_suffix(":::") {
        Some(body) => (body.trim(), true),
        None => (text, false),
    }
}
