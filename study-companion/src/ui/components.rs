//! Overlays shared by every view

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};

use crate::app::App;

pub fn render_file_browser(f: &mut Frame, area: Rect, app: &App) {
    let popup_area = centered_rect(80, 80, area);
    let browser = &app.file_browser;

    let items: Vec<ListItem> = browser
        .visible_items()
        .into_iter()
        .enumerate()
        .map(|(idx, (path, is_dir))| {
            let is_selected = idx == browser.selected();
            let icon = if is_dir { "📁" } else { "📄" };
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("..");

            let style = if is_selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if is_dir {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(Line::from(vec![
                Span::raw(if is_selected { "▶ " } else { "  " }),
                Span::raw(format!("{} ", icon)),
                Span::styled(name.to_string(), style),
            ]))
        })
        .collect();

    let title = if browser.search().is_empty() {
        format!(" {}: {} ", browser.target().title(), browser.current_dir().display())
    } else {
        format!(" {} [search: {}] ", browser.target().title(), browser.search())
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().bg(Color::Black)),
    );

    f.render_widget(Clear, popup_area);
    f.render_widget(list, popup_area);
}

/// Rect of the given percentage size centered in `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
