//! Minimal markdown to terminal lines
//!
//! Backend answers are markdown. Only the constructs that show up in them
//! are handled: headings, bullets, fenced code, `**bold**` and `code`
//! spans. Everything else passes through as plain text.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

pub fn render_rich_text(text: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut in_code_block = false;

    for raw in text.lines() {
        let trimmed = raw.trim_start();

        if trimmed.starts_with("```") {
            in_code_block = !in_code_block;
            continue;
        }

        if in_code_block {
            lines.push(Line::from(Span::styled(
                format!("  {}", raw),
                Style::default().fg(Color::Yellow),
            )));
            continue;
        }

        if let Some(heading) = heading_text(trimmed) {
            lines.push(Line::from(Span::styled(
                heading.to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )));
            continue;
        }

        if let Some(item) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* ")) {
            let indent = raw.len() - trimmed.len();
            let mut spans = vec![Span::raw(format!("{}  • ", " ".repeat(indent)))];
            spans.extend(inline_spans(item));
            lines.push(Line::from(spans));
            continue;
        }

        lines.push(Line::from(inline_spans(raw)));
    }

    lines
}

fn heading_text(line: &str) -> Option<&str> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    line[hashes..].strip_prefix(' ').map(str::trim)
}

/// Split a line into styled spans for `**bold**` and `code`
fn inline_spans(text: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut bold = false;
    let mut code = false;
    let mut chars = text.chars().peekable();

    let style_for = |bold: bool, code: bool| {
        let mut style = Style::default();
        if bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if code {
            style = style.fg(Color::Yellow);
        }
        style
    };

    while let Some(c) = chars.next() {
        match c {
            '*' if !code && chars.peek() == Some(&'*') => {
                chars.next();
                if !current.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut current), style_for(bold, code)));
                }
                bold = !bold;
            }
            '`' => {
                if !current.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut current), style_for(bold, code)));
                }
                code = !code;
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        spans.push(Span::styled(current, style_for(bold, code)));
    }
    spans
}
