//! User-facing notices and confirmation prompts.

use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A message shown to the user, blocking until acknowledged where the front end supports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub text: String,
}

impl Notice {
    pub const UNAUTHORIZED_TEXT: &'static str = "Unauthorized access, please login!";

    pub fn new(level: NoticeLevel, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, title, text)
    }

    pub fn warning(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, title, text)
    }

    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, text)
    }

    /// Raised once for every call the backend rejects with 401.
    pub fn unauthorized() -> Self {
        Self::error("Unauthorized", Self::UNAUTHORIZED_TEXT)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.text == Self::UNAUTHORIZED_TEXT
    }
}

/// Notifier trait - abstraction over alert dialogs, terminal output, toasts.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Question asked before a destructive action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub title: String,
    pub text: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl Confirmation {
    pub fn delete_product() -> Self {
        Self {
            title: "Are you sure?".to_string(),
            text: "You won't be able to revert this!".to_string(),
            confirm_label: "Yes, delete it!".to_string(),
            cancel_label: "No, cancel!".to_string(),
        }
    }
}

/// Confirmer trait - asks the user to approve or cancel.
#[async_trait]
pub trait Confirmer: Send + Sync {
    /// Returns `true` only when the user explicitly confirmed.
    async fn confirm(&self, request: &Confirmation) -> bool;
}
