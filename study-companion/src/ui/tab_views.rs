//! View tab bar

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::session::ActiveView;
use crate::workflows::MediaPhase;

pub fn render_view_tabs(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    for view in ActiveView::ALL {
        let is_active = view == app.session.active_view();
        let title = format!("[ {} {} ]", view.title(), status_icon(app, view));

        let style = if is_active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        spans.push(Span::styled(title, style));
        spans.push(Span::raw(" "));
    }

    let tabs = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(tabs, area);
}

fn status_icon(app: &App, view: ActiveView) -> &'static str {
    match view.media_kind() {
        None => {
            if app.session.conversation().is_awaiting_reply() {
                "●"
            } else {
                "○"
            }
        }
        Some(kind) => match app.session.media(kind).phase() {
            MediaPhase::Empty => "○",
            MediaPhase::Ready => "◐",
            MediaPhase::Analyzing => "●",
            MediaPhase::Complete => "✓",
            MediaPhase::Failed => "✗",
        },
    }
}
