//! Transient user-visible notifications

use std::time::{Duration, Instant};

const DEFAULT_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: usize,
    pub created: Instant,
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
    pub ttl: Option<Duration>,
}

impl Notification {
    fn is_expired(&self, now: Instant) -> bool {
        match self.ttl {
            Some(ttl) => now.duration_since(self.created) >= ttl,
            None => false,
        }
    }
}

pub struct NotificationManager {
    notifications: Vec<Notification>,
    next_id: usize,
    max_notifications: usize,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self {
            notifications: Vec::new(),
            next_id: 0,
            max_notifications: 20,
        }
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) -> usize {
        self.push(NotificationLevel::Error, title.into(), message.into())
    }

    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) -> usize {
        self.push(NotificationLevel::Success, title.into(), message.into())
    }

    pub fn warning(&mut self, title: impl Into<String>, message: impl Into<String>) -> usize {
        self.push(NotificationLevel::Warning, title.into(), message.into())
    }

    pub fn info(&mut self, title: impl Into<String>, message: impl Into<String>) -> usize {
        self.push(NotificationLevel::Info, title.into(), message.into())
    }

    pub fn push(&mut self, level: NotificationLevel, title: String, message: String) -> usize {
        self.push_with_ttl(level, title, message, Some(DEFAULT_TTL))
    }

    pub fn push_with_ttl(
        &mut self,
        level: NotificationLevel,
        title: String,
        message: String,
        ttl: Option<Duration>,
    ) -> usize {
        let id = self.next_id;
        self.next_id += 1;

        self.notifications.push(Notification {
            id,
            created: Instant::now(),
            level,
            title,
            message,
            ttl,
        });

        if self.notifications.len() > self.max_notifications {
            self.notifications.remove(0);
        }

        id
    }

    pub fn dismiss(&mut self, id: usize) {
        self.notifications.retain(|n| n.id != id);
    }

    /// Dismiss the most recent notification
    pub fn dismiss_latest(&mut self) {
        self.notifications.pop();
    }

    /// Non-expired notifications, newest last
    pub fn active(&self) -> Vec<&Notification> {
        let now = Instant::now();
        self.notifications.iter().filter(|n| !n.is_expired(now)).collect()
    }

    pub fn cleanup_expired(&mut self) {
        let now = Instant::now();
        self.notifications.retain(|n| !n.is_expired(now));
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}
