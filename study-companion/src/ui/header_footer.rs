//! Header and footer rendering functions

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::session::ActiveView;

pub fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Study Companion",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" - "),
        Span::raw(app.session.active_view().title()),
        Span::raw("      "),
        Span::styled(app.backend_url.clone(), Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn key(label: &'static str) -> Span<'static> {
    Span::styled(label, Style::default().add_modifier(Modifier::BOLD))
}

pub fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let footer_text = if app.file_browser.is_open() {
        Line::from(vec![
            key("[↑↓]"),
            Span::raw(" Navigate  "),
            key("[Enter]"),
            Span::raw(" Open/Select  "),
            Span::raw("TYPE to filter  "),
            key("[Esc]"),
            Span::raw(" Cancel"),
        ])
    } else {
        match app.session.active_view() {
            ActiveView::Chat => Line::from(vec![
                key("[Enter]"),
                Span::raw(" Send  "),
                key("[↑↓/PgUp/PgDn]"),
                Span::raw(" Scroll  "),
                key("[Tab]"),
                Span::raw(" Switch  "),
                key("[Ctrl+U]"),
                Span::raw(" Upload  "),
                key("[Ctrl+D]"),
                Span::raw(" Refresh  "),
                key("[Ctrl+Q]"),
                Span::raw(" Quit"),
            ]),
            ActiveView::Diagram | ActiveView::Equation => Line::from(vec![
                key("[O]"),
                Span::raw(" Open image  "),
                key("[Enter/A]"),
                Span::raw(" Analyze  "),
                key("[C]"),
                Span::raw(" Clear  "),
                key("[↑↓]"),
                Span::raw(" Scroll  "),
                key("[Tab]"),
                Span::raw(" Switch  "),
                key("[Ctrl+U]"),
                Span::raw(" Upload  "),
                key("[Ctrl+Q]"),
                Span::raw(" Quit"),
            ]),
        }
    };

    let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
