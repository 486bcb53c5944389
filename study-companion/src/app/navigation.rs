//! Keyboard and paste handling

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::*;
use crate::session::ActiveView;

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('u') => self.open_file_browser(BrowseTarget::Upload),
                KeyCode::Char('d') => {
                    self.notifications.info("Documents", "Refreshing document list");
                    self.documents.refresh();
                }
                _ => {}
            }
            return;
        }

        if self.file_browser.is_open() {
            self.handle_file_browser_key(key);
            return;
        }

        match key.code {
            KeyCode::Tab => self.session.next_view(),
            KeyCode::BackTab => self.session.previous_view(),
            KeyCode::Esc => self.notifications.dismiss_latest(),
            _ => match self.session.active_view() {
                ActiveView::Chat => self.handle_chat_key(key),
                ActiveView::Diagram => self.handle_media_key(MediaKind::Diagram, key),
                ActiveView::Equation => self.handle_media_key(MediaKind::Equation, key),
            },
        }
    }

    fn handle_file_browser_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down => self.file_browser.next(),
            KeyCode::Up => self.file_browser.previous(),
            KeyCode::Esc => self.file_browser.close(),
            KeyCode::Backspace => self.file_browser.pop_search(),
            KeyCode::Enter => {
                let target = self.file_browser.target();
                if let Some(path) = self.file_browser.select() {
                    self.apply_browsed_file(target, &path);
                }
            }
            KeyCode::Char(c) => self.file_browser.push_search(c),
            _ => {}
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) {
        let chat = self.session.conversation_mut();
        match key.code {
            KeyCode::Enter => {
                chat.submit_input();
            }
            KeyCode::Backspace => chat.backspace(),
            KeyCode::Char(c) => chat.push_char(c),
            KeyCode::Up => chat.scroll_up(1),
            KeyCode::Down => chat.scroll_down(1),
            KeyCode::PageUp => chat.scroll_up(10),
            KeyCode::PageDown => chat.scroll_down(10),
            KeyCode::End => chat.scroll_to_bottom(),
            _ => {}
        }
    }

    fn handle_media_key(&mut self, kind: MediaKind, key: KeyEvent) {
        match key.code {
            KeyCode::Char('o') | KeyCode::Char('O') => self.open_file_browser(BrowseTarget::Media(kind)),
            KeyCode::Enter | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.session.media_mut(kind).analyze();
            }
            KeyCode::Char('c') | KeyCode::Char('C') => self.session.media_mut(kind).clear(),
            KeyCode::Up => self.session.media_mut(kind).scroll_up(1),
            KeyCode::Down => self.session.media_mut(kind).scroll_down(1),
            KeyCode::PageUp => self.session.media_mut(kind).scroll_up(10),
            KeyCode::PageDown => self.session.media_mut(kind).scroll_down(10),
            _ => {}
        }
    }

    /// Terminals paste a file's path when it is dragged onto the window.
    /// A pasted path to an existing file is treated as a drop; anything
    /// else is typed into the chat input.
    pub fn handle_paste(&mut self, text: &str) {
        if self.file_browser.is_open() {
            return;
        }

        if let Some(path) = dropped_path(text) {
            match self.session.active_view() {
                ActiveView::Chat => self.upload_path(&path),
                ActiveView::Diagram => self.select_media_path(MediaKind::Diagram, &path),
                ActiveView::Equation => self.select_media_path(MediaKind::Equation, &path),
            }
            return;
        }

        if self.session.active_view() == ActiveView::Chat {
            let single_line = text.replace(['\r', '\n'], " ");
            self.session.conversation_mut().push_str(&single_line);
        }
    }
}

/// Interpret pasted text as a dropped file path
fn dropped_path(text: &str) -> Option<PathBuf> {
    let trimmed = text.trim().trim_matches(|c| c == '\'' || c == '"');
    let trimmed = trimmed.strip_prefix("file://").unwrap_or(trimmed);
    if trimmed.is_empty() || trimmed.contains('\n') {
        return None;
    }
    // Shells escape spaces when pasting dragged paths
    let path = PathBuf::from(trimmed.replace("\\ ", " "));
    path.is_file().then_some(path)
}
