//! Terminal rendering
//!
//! Rendering is a pure function of [`App`] state; nothing here mutates it.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::App;

mod chat_view;
mod components;
mod header_footer;
mod media_view;
mod notifications;
mod rich_text;
mod tab_views;
mod upload_panel;

pub use chat_view::render_chat;
pub use components::{centered_rect, render_file_browser};
pub use header_footer::{render_footer, render_header};
pub use media_view::render_media;
pub use notifications::render_notifications;
pub use rich_text::render_rich_text;
pub use tab_views::render_view_tabs;
pub use upload_panel::render_sidebar;

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // View tabs
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);
    render_view_tabs(f, chunks[1], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(0)])
        .split(chunks[2]);

    render_sidebar(f, body[0], app);

    match app.session.active_view().media_kind() {
        None => render_chat(f, body[1], app.session.conversation(), app.session.spinner_char()),
        Some(kind) => render_media(
            f,
            body[1],
            app.session.media(kind),
            app.session.spinner_char(),
        ),
    }

    render_footer(f, chunks[3], app);

    if app.file_browser.is_open() {
        render_file_browser(f, f.area(), app);
    }

    render_notifications(f, app, f.area());
}
