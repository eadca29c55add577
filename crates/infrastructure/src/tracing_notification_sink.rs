use async_trait::async_trait;
use tracing::{info, warn};

use semestra_application::{Notice, NoticeSeverity, NotificationSink};

/// Notification sink that forwards notices to the tracing output.
///
/// Stands in for the UI toast surface in headless hosts and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotificationSink;

#[async_trait]
impl NotificationSink for TracingNotificationSink {
    async fn publish(&self, notice: Notice) {
        match notice.severity {
            NoticeSeverity::Info => info!(message = %notice.message, "user notice"),
            NoticeSeverity::Warning => warn!(message = %notice.message, "user notice"),
        }
    }
}
