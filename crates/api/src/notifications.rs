//! Request-scoped notification sink.
//!
//! Every notice raised while handling a request is logged through `tracing`
//! and kept so the handler can return it alongside the response body.

use pianoshop_core::notify::{Notice, NoticeKind, NoticeLog, NotificationSink};

#[derive(Debug, Default)]
pub struct TracingNotifier {
    log: NoticeLog,
}

impl TracingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices raised so far, oldest first.
    pub fn take(&self) -> Vec<Notice> {
        self.log.drain()
    }
}

impl NotificationSink for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Success => {
                tracing::info!(title = %notice.title, message = %notice.message, "Notice");
            }
            NoticeKind::Error => {
                tracing::warn!(title = %notice.title, message = %notice.message, "Notice");
            }
        }
        self.log.notify(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_are_kept_until_taken() {
        let sink = TracingNotifier::new();
        sink.notify(Notice::error("Could not load pianos", "timeout"));

        let taken = sink.take();
        assert_eq!(taken.len(), 1);
        assert_eq!(taken[0].kind, NoticeKind::Error);
        assert!(sink.take().is_empty());
    }
}
