//! Commands sent to the App from callbacks and background tasks

use super::notifications::NotificationLevel;

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Show a notification to the user
    ShowNotification {
        level: NotificationLevel,
        title: String,
        message: String,
    },

    /// Re-fetch the corpus document list
    RefreshDocuments,
}
