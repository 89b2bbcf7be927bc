//! User-facing notices.
//!
//! Handlers never block on the user. When something needs to be reported
//! (a refused connection, a context-menu click) a [`Notice`] is handed to a
//! [`NoticeSink`] before the handler returns. The UI decides how to show it.

use crate::graph::ValidationError;
use crate::ids::NodeId;
use crate::kind::NodeKind;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// A connection attempt was refused; nothing was changed.
    ConnectionRejected {
        source: NodeId,
        target: NodeId,
        reason: ValidationError,
        /// Text to show the user, e.g. "Only Block A can connect to Block B".
        message: String,
    },
    /// A node was right-clicked.
    ContextMenu { node: NodeId, kind: NodeKind },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionRejected { message, .. } => f.write_str(message),
            Self::ContextMenu { node, kind } => {
                write!(f, "Context menu on node {} ({})", node, kind)
            }
        }
    }
}

/// Receiver of notices.
pub trait NoticeSink {
    fn notify(&self, notice: &Notice);
}

/// Sink that writes notices to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotices;

impl NoticeSink for LogNotices {
    fn notify(&self, notice: &Notice) {
        match notice {
            Notice::ConnectionRejected { source, target, reason, .. } => {
                log::warn!("connection {} -> {} rejected: {} ({})", source, target, notice, reason);
            }
            Notice::ContextMenu { .. } => log::info!("{}", notice),
        }
    }
}

/// Sink that records notices in order.
///
/// Clones share the same buffer, so one clone can be handed to the
/// controller while another is drained by the UI.
#[derive(Clone, Debug, Default)]
pub struct NoticeLog {
    notices: Rc<RefCell<Vec<Notice>>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.notices.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.borrow().is_empty()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }

    pub fn snapshot(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.borrow_mut())
    }
}

impl NoticeSink for NoticeLog {
    fn notify(&self, notice: &Notice) {
        self.notices.borrow_mut().push(notice.clone());
    }
}

impl<F> NoticeSink for F
where
    F: Fn(&Notice),
{
    fn notify(&self, notice: &Notice) {
        self(notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected() -> Notice {
        Notice::ConnectionRejected {
            source: NodeId(4),
            target: NodeId(3),
            reason: ValidationError::KindMismatch {
                source_kind: NodeKind::receiver(),
                target_kind: NodeKind::emitter(),
            },
            message: "Only Block A can connect to Block B".to_string(),
        }
    }

    #[test]
    fn test_notice_display() {
        assert_eq!(rejected().to_string(), "Only Block A can connect to Block B");
        assert_eq!(
            Notice::ContextMenu { node: NodeId(3), kind: NodeKind::emitter() }.to_string(),
            "Context menu on node 3 (emitter)"
        );
    }

    #[test]
    fn test_notice_log_records_in_order() {
        let log = NoticeLog::new();
        assert!(log.is_empty());

        log.notify(&rejected());
        log.notify(&Notice::ContextMenu { node: NodeId(1), kind: NodeKind::receiver() });

        assert_eq!(log.len(), 2);
        assert_eq!(log.snapshot()[0], rejected());
        assert!(matches!(log.last(), Some(Notice::ContextMenu { .. })));
    }

    #[test]
    fn test_notice_log_clones_share_buffer() {
        let log = NoticeLog::new();
        let handle = log.clone();
        handle.notify(&rejected());

        assert_eq!(log.len(), 1);
        assert_eq!(log.drain(), vec![rejected()]);
        assert!(handle.is_empty());
    }

    #[test]
    fn test_closure_sink() {
        let count = Rc::new(RefCell::new(0));
        let sink = {
            let count = count.clone();
            move |_: &Notice| *count.borrow_mut() += 1
        };
        sink.notify(&rejected());
        sink.notify(&rejected());
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn test_log_sink_does_not_panic() {
        LogNotices.notify(&rejected());
        LogNotices.notify(&Notice::ContextMenu { node: NodeId(1), kind: NodeKind::emitter() });
    }
}
