//! User-facing notice texts

pub const UPLOAD_FAILED: &str = "Upload failed";
pub const FEEDBACK_PRECONDITION: &str = "Photo + place required!";
pub const FEEDBACK_THANKS: &str = "Thank you! Your feedback helps improve recognition.";
pub const FEEDBACK_FAILED: &str = "Failed to submit feedback.";
pub const PERMISSION_DENIED: &str = "Permission denied.";
pub const CHAT_SERVER_ERROR: &str = "Server error. Try again.";
pub const NO_RESPONSE: &str = "No response.";

/// Severity of a notice shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A message for the user, the terminal equivalent of an alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, text: text.into() }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
