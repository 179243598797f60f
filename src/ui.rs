//! Styles and response rendering
//!
//! Everything here is a pure function of its input; `main.rs` lays the
//! results out on screen.

use ratatui::prelude::*;

use crate::constants::{BODY_PREVIEW_LIMIT, TRUNCATION_MARKER};
use crate::models::{HttpOutcome, HttpResponse, ResponseHeaders};

pub const ACCENT: Color = Color::Indexed(205);
pub const MUTED: Color = Color::Indexed(240);
pub const RESPONSE_BORDER: Color = Color::Indexed(32);

pub fn title_style() -> Style {
    Style::default().fg(ACCENT).bold()
}

pub fn field_border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    }
}

/// Scroll offset and caret cell for an unwrapped text box
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaretView {
    /// `(rows, cols)` for `Paragraph::scroll`
    pub scroll: (u16, u16),
    /// Caret cell relative to the top-left inner cell
    pub caret: (u16, u16),
}

/// Scroll just enough to keep the caret at `(line, col)` inside a box of
/// `width` x `height` inner cells.
pub fn caret_view(line: usize, col: usize, width: u16, height: u16) -> CaretView {
    let (scroll_y, caret_y) = follow(line, height);
    let (scroll_x, caret_x) = follow(col, width);
    CaretView {
        scroll: (scroll_y, scroll_x),
        caret: (caret_x, caret_y),
    }
}

fn follow(pos: usize, extent: u16) -> (u16, u16) {
    let pos = u16::try_from(pos).unwrap_or(u16::MAX);
    let scroll = pos.saturating_sub(extent.saturating_sub(1));
    (scroll, pos - scroll)
}

/// How a status code should be presented
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Ok,
    Warning,
    Error,
}

impl StatusTone {
    /// Informational and 2xx are Ok, 3xx Warning, 4xx and up Error
    pub fn from_code(code: u16) -> Self {
        match code {
            400.. => StatusTone::Error,
            300..=399 => StatusTone::Warning,
            _ => StatusTone::Ok,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            StatusTone::Ok => Color::Green,
            StatusTone::Warning => Color::Yellow,
            StatusTone::Error => Color::Red,
        }
    }
}

/// Body text ready for display
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormattedBody {
    pub text: String,
    /// The body parsed as JSON and `text` is the pretty-printed form
    pub is_json: bool,
    pub truncated: bool,
}

/// Pretty-print JSON bodies, leave anything else alone, then cap the length.
///
/// The cap applies to the pretty-printed text when the body is JSON.
pub fn format_body(body: &str) -> FormattedBody {
    let pretty = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| serde_json::to_string_pretty(&json).ok());
    let is_json = pretty.is_some();
    let (text, truncated) = truncate_chars(pretty.as_deref().unwrap_or(body), BODY_PREVIEW_LIMIT);
    FormattedBody {
        text,
        is_json,
        truncated,
    }
}

/// Keep at most `limit` chars, appending the truncation marker when anything was cut
pub fn truncate_chars(text: &str, limit: usize) -> (String, bool) {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => (format!("{}{}", &text[..idx], TRUNCATION_MARKER), true),
        None => (text.to_string(), false),
    }
}

/// Indented dump of the response headers
pub fn format_headers(headers: &ResponseHeaders) -> String {
    serde_json::to_string_pretty(headers).unwrap_or_default()
}

/// A finished outcome together with its screen lines.
///
/// Pretty-printing and highlighting happen once, when the completion
/// arrives; redraws only read `lines`.
#[derive(Debug)]
pub struct ResponseView {
    pub outcome: HttpOutcome,
    pub lines: Vec<Line<'static>>,
}

impl ResponseView {
    pub fn new(outcome: HttpOutcome) -> Self {
        let lines = response_lines(&outcome);
        ResponseView { outcome, lines }
    }
}

/// The whole response screen for one outcome
pub fn response_lines(outcome: &HttpOutcome) -> Vec<Line<'static>> {
    match outcome {
        HttpOutcome::Failure(err) => vec![Line::from(vec![
            Span::styled("❌ Error: ", Style::default().fg(Color::Red).bold()),
            Span::raw(err.message().to_string()),
        ])],
        HttpOutcome::Response(resp) => success_lines(resp),
    }
}

fn success_lines(resp: &HttpResponse) -> Vec<Line<'static>> {
    let tone = StatusTone::from_code(resp.status_code);
    let mut lines = vec![
        Line::from(vec![
            Span::raw("Status: "),
            Span::styled(resp.status_line.clone(), Style::default().fg(tone.color()).bold()),
            Span::raw(format!(" ({:?})", resp.elapsed)),
            Span::styled(
                format!("  at {}", resp.received_at.format("%H:%M:%S")),
                Style::default().fg(MUTED),
            ),
        ]),
        Line::default(),
        Line::from(Span::styled("Response Headers:", Style::default().bold())),
    ];
    lines.extend(format_headers(&resp.headers).lines().map(|l| Line::raw(l.to_string())));

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Response Body:", Style::default().bold())));
    let body = format_body(&resp.body);
    if body.is_json {
        lines.extend(highlight_json(&body.text));
    } else {
        lines.extend(body.text.lines().map(|l| Line::raw(l.to_string())));
    }
    lines
}

/// JSON syntax highlighting for pretty-printed text, one `Line` per input line
pub fn highlight_json(text: &str) -> Vec<Line<'static>> {
    text.lines().map(highlight_json_line).collect()
}

fn highlight_json_line(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut chars = line.char_indices().peekable();
    let mut plain_start = 0;

    while let Some((start, c)) = chars.next() {
        let (end, style) = match c {
            '"' => {
                let mut escaped = false;
                let mut end = line.len();
                for (i, c) in chars.by_ref() {
                    if escaped {
                        escaped = false;
                    } else if c == '\\' {
                        escaped = true;
                    } else if c == '"' {
                        end = i + 1;
                        break;
                    }
                }
                let is_key = line[end..].trim_start().starts_with(':');
                let color = if is_key { Color::Cyan } else { Color::Green };
                (end, Style::default().fg(color))
            }
            '{' | '}' | '[' | ']' => (start + 1, Style::default().fg(Color::Yellow)),
            '-' | '0'..='9' => {
                let mut end = start + 1;
                while let Some(&(i, c)) = chars.peek() {
                    if !(c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')) {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }
                (end, Style::default().fg(Color::Yellow))
            }
            't' | 'f' | 'n' => {
                let word = ["true", "false", "null"]
                    .into_iter()
                    .find(|w| line[start..].starts_with(w));
                match word {
                    Some(w) => {
                        for _ in 1..w.len() {
                            chars.next();
                        }
                        (start + w.len(), Style::default().fg(Color::Magenta))
                    }
                    None => continue,
                }
            }
            _ => continue,
        };

        if plain_start < start {
            spans.push(Span::raw(line[plain_start..start].to_string()));
        }
        spans.push(Span::styled(line[start..end].to_string(), style));
        plain_start = end;
    }

    if plain_start < line.len() {
        spans.push(Span::raw(line[plain_start..].to_string()));
    }
    Line::from(spans)
}
