use async_trait::async_trait;
use serde::Serialize;

/// Severity attached to a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeSeverity {
    /// Informational notice.
    Info,
    /// Degraded-data warning; the UI stays usable.
    Warning,
}

/// Non-blocking user-visible notification emitted on degraded reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Notice severity.
    pub severity: NoticeSeverity,
    /// Human-readable message for the current session's UI.
    pub message: String,
}

impl Notice {
    /// Creates an informational notice.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Info,
            message: message.into(),
        }
    }

    /// Creates a degraded-data warning notice.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Warning,
            message: message.into(),
        }
    }
}

/// Port for surfacing notices to the current session's UI.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Publishes a notice. Must never block or fail the calling service.
    async fn publish(&self, notice: Notice);
}
