//! UI-agnostic application state types
//!
//! Data structures shared between the session controller and any frontend.
//! Nothing here depends on a specific UI framework.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single entry in the chat transcript. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub body: String,
    /// Local time formatted for display, e.g. `10:30 AM`
    pub timestamp: String,
}

/// Who produced a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatMessage {
    pub fn new(role: ChatRole, body: impl Into<String>) -> Self {
        Self::at(role, body, Local::now())
    }

    pub fn user(body: impl Into<String>) -> Self {
        Self::new(ChatRole::User, body)
    }

    pub fn assistant(body: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, body)
    }

    /// Build a message stamped with an explicit time
    pub fn at(role: ChatRole, body: impl Into<String>, time: DateTime<Local>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            body: body.into(),
            timestamp: format_timestamp(&time),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == ChatRole::User
    }
}

/// 12-hour clock without a leading zero on the hour
pub fn format_timestamp(time: &DateTime<Local>) -> String {
    time.format("%-I:%M %p").to_string()
}
