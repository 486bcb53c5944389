//! Chat view rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::rich_text::render_rich_text;
use crate::workflows::{ConversationWorkflow, Speaker};

pub fn render_chat(f: &mut Frame, area: Rect, chat: &ConversationWorkflow, spinner: char) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Messages
            Constraint::Length(3), // Input box
        ])
        .split(area);

    let mut message_lines = Vec::new();
    for msg in chat.messages() {
        let (label, role_style) = match msg.role() {
            Speaker::User => ("You", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Speaker::Assistant => ("Assistant", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        };

        message_lines.push(Line::from(Span::styled(format!("{}: ", label), role_style)));
        match msg.role() {
            Speaker::User => message_lines.extend(msg.content().lines().map(|l| Line::from(l.to_string()))),
            Speaker::Assistant => message_lines.extend(render_rich_text(msg.content())),
        }
        message_lines.push(Line::from(""));
    }

    if chat.is_awaiting_reply() {
        let elapsed = chat.elapsed_seconds().unwrap_or(0);
        message_lines.push(Line::from(Span::styled(
            format!("{} Thinking... ({}s)", spinner, elapsed),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        )));
    }

    // Follow the newest message unless the user scrolled up
    let inner_width = chunks[0].width.saturating_sub(2).max(1) as usize;
    let inner_height = chunks[0].height.saturating_sub(2) as usize;
    let total_rows: usize = message_lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(inner_width))
        .sum();
    let max_offset = total_rows.saturating_sub(inner_height).min(u16::MAX as usize) as u16;
    chat.set_scroll_limit(max_offset);
    let offset = max_offset.saturating_sub(chat.effective_scroll());

    let title = if chat.effective_scroll() > 0 {
        " Study Assistant [scrolled - End to follow] "
    } else {
        " Study Assistant "
    };

    let messages_widget = Paragraph::new(message_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .style(Style::default().fg(Color::White)),
        )
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));

    f.render_widget(messages_widget, chunks[0]);

    let (input_title, input_style) = if chat.is_awaiting_reply() {
        (" Waiting for reply... ", Style::default().fg(Color::DarkGray))
    } else {
        (" Ask a question about your study material (Enter to send) ", Style::default().fg(Color::White))
    };

    let input_widget = Paragraph::new(chat.input())
        .block(Block::default().borders(Borders::ALL).title(input_title))
        .style(input_style);

    f.render_widget(input_widget, chunks[1]);
}
