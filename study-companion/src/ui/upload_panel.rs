//! Sidebar: upload area and indexed documents

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::workflows::Outcome;

pub fn render_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(area);

    render_upload_area(f, chunks[0], app);
    render_documents(f, chunks[1], app);
}

fn render_upload_area(f: &mut Frame, area: Rect, app: &App) {
    let upload = app.session.upload();
    let mut lines = Vec::new();

    if let Some(name) = upload.in_flight() {
        let elapsed = upload.elapsed_seconds().unwrap_or(0);
        lines.push(Line::from(Span::styled(
            format!("{} Uploading... ({}s)", app.session.spinner_char(), elapsed),
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(Span::styled(name.to_string(), Style::default().fg(Color::White))));
    } else {
        lines.push(Line::from("Drop a PDF or text file here"));
        lines.push(Line::from(vec![
            Span::raw("or press "),
            Span::styled("[Ctrl+U]", Style::default().add_modifier(Modifier::BOLD)),
        ]));
    }

    if let Some(attempt) = upload.last_attempt() {
        let color = match attempt.outcome {
            Outcome::Success => Color::Green,
            Outcome::Failure => Color::Red,
        };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(attempt.detail.clone(), Style::default().fg(color))));
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Upload Documents "))
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}

fn render_documents(f: &mut Frame, area: Rect, app: &App) {
    let names = app.documents.names();
    let title = if app.documents.is_loading() {
        " Documents (loading) ".to_string()
    } else {
        format!(" Documents ({}) ", names.len())
    };

    let items: Vec<ListItem> = if names.is_empty() {
        let text = app.documents.error().unwrap_or("No documents uploaded yet.");
        vec![ListItem::new(Span::styled(text.to_string(), Style::default().fg(Color::DarkGray)))]
    } else {
        names
            .iter()
            .map(|name| ListItem::new(Line::from(vec![Span::raw("• "), Span::raw(name.clone())])))
            .collect()
    };

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}
