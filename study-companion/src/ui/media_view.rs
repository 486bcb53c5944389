//! Diagram and equation views

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::rich_text::render_rich_text;
use crate::workflows::{MediaAnalysisWorkflow, MediaPhase};

pub fn render_media(f: &mut Frame, area: Rect, media: &MediaAnalysisWorkflow, spinner: char) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Selected image
            Constraint::Length(3), // Action
            Constraint::Min(0),    // Result or error
        ])
        .split(area);

    render_selection(f, chunks[0], media);
    render_action(f, chunks[1], media, spinner);
    render_outcome(f, chunks[2], media);
}

fn render_selection(f: &mut Frame, area: Rect, media: &MediaAnalysisWorkflow) {
    let kind = media.kind();
    let label = Style::default().fg(Color::DarkGray);

    let lines = match media.preview() {
        Some(preview) => {
            let info = preview.info();
            vec![
                Line::from(vec![
                    Span::styled("File:    ", label),
                    Span::styled(info.file_name.clone(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
                ]),
                Line::from(vec![Span::styled("Type:    ", label), Span::raw(info.mime.clone())]),
                Line::from(vec![Span::styled("Size:    ", label), Span::raw(format_size(info.size))]),
                Line::from(vec![
                    Span::styled("Preview: ", label),
                    Span::styled(info.uri.clone(), Style::default().fg(Color::Cyan)),
                ]),
            ]
        }
        None => vec![
            Line::from(Span::styled(
                kind.empty_prompt(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::raw("Drag an image onto the terminal or press "),
                Span::styled("[O]", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" to browse (PNG, JPG, WEBP)"),
            ]),
        ],
    };

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", kind.title())),
    );
    f.render_widget(widget, area);
}

fn render_action(f: &mut Frame, area: Rect, media: &MediaAnalysisWorkflow, spinner: char) {
    let kind = media.kind();
    let line = match media.phase() {
        MediaPhase::Analyzing => Line::from(Span::styled(
            format!("{} {}", spinner, kind.busy_label()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        )),
        MediaPhase::Ready => Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(format!(" {}  ", kind.action_label())),
            Span::styled("[C]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Clear"),
        ]),
        MediaPhase::Complete | MediaPhase::Failed => Line::from(vec![
            Span::styled("[O]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Choose another image  "),
            Span::styled("[C]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Clear"),
        ]),
        MediaPhase::Empty => Line::from(Span::styled(
            kind.action_label(),
            Style::default().fg(Color::DarkGray),
        )),
    };

    let widget = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn render_outcome(f: &mut Frame, area: Rect, media: &MediaAnalysisWorkflow) {
    let kind = media.kind();

    if let Some(error) = media.error() {
        let widget = Paragraph::new(error.to_string())
            .style(Style::default().fg(Color::Red))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Error ")
                    .border_style(Style::default().fg(Color::Red)),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(widget, area);
        return;
    }

    let body = match media.result() {
        Some(text) => render_rich_text(text),
        None => Vec::new(),
    };

    let widget = Paragraph::new(body)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", kind.result_heading())),
        )
        .wrap(Wrap { trim: false })
        .scroll((media.result_scroll(), 0));
    f.render_widget(widget, area);
}

fn format_size(bytes: usize) -> String {
    match bytes {
        b if b >= 1024 * 1024 => format!("{:.1} MB", b as f64 / (1024.0 * 1024.0)),
        b if b >= 1024 => format!("{:.1} KB", b as f64 / 1024.0),
        b => format!("{} B", b),
    }
}
