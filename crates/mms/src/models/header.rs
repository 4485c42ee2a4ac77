//! Conversation header: the record a list row displays
//!
//! Most fields are fixed at creation. The sender's display name is resolved
//! in the background and the read/draft/error/attachment flags can change
//! upstream, so those live behind a lock.
//!
//! A header remembers at most one *waiting view*: the row that rendered a
//! placeholder and wants to hear when the name arrives. The reference is weak
//! so a recycled or dropped row is never kept alive by a header, and the last
//! registration wins.

use chrono::{DateTime, Utc};
use log::debug;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use super::{ConversationSummary, ThreadId};
use crate::contacts::NameResolver;

/// Receiver of "display name resolved" notifications
///
/// Implemented by row views. Called from whatever thread completed the
/// resolution, so implementations must not touch render state directly.
pub trait HeaderObserver: Send + Sync {
    fn on_header_loaded(&self, header: &Arc<ConversationHeader>);
}

/// Flags that can change after the header is created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderFlags {
    pub has_attachment: bool,
    pub has_draft: bool,
    pub has_error: bool,
    pub is_read: bool,
}

struct HeaderState {
    from: Option<String>,
    flags: HeaderFlags,
    waiting_view: Option<Weak<dyn HeaderObserver>>,
}

/// One conversation's summary as shown in the conversation list
pub struct ConversationHeader {
    id: ThreadId,
    from_token: String,
    message_count: usize,
    subject: String,
    date: DateTime<Utc>,
    state: Mutex<HeaderState>,
}

impl ConversationHeader {
    /// Create a header with an unresolved sender name
    pub fn new(summary: ConversationSummary) -> Self {
        Self {
            id: summary.id,
            from_token: summary.from_token,
            message_count: summary.message_count.max(1),
            subject: summary.subject,
            date: summary.date,
            state: Mutex::new(HeaderState {
                from: None,
                flags: HeaderFlags {
                    has_attachment: summary.has_attachment,
                    has_draft: summary.has_draft,
                    has_error: summary.has_error,
                    is_read: summary.is_read,
                },
                waiting_view: None,
            }),
        }
    }

    /// Create a header whose sender name is already known
    pub fn with_from(summary: ConversationSummary, from: impl Into<String>) -> Self {
        let header = Self::new(summary);
        header.lock_state().from = Some(from.into());
        header
    }

    fn lock_state(&self) -> MutexGuard<'_, HeaderState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn id(&self) -> &ThreadId {
        &self.id
    }

    /// Raw sender token the display name is resolved from
    pub fn from_token(&self) -> &str {
        &self.from_token
    }

    /// Resolved sender display name, `None` while still loading
    pub fn from(&self) -> Option<String> {
        self.lock_state().from.clone()
    }

    pub fn message_count(&self) -> usize {
        self.message_count
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Current flag values, read under one lock
    pub fn flags(&self) -> HeaderFlags {
        self.lock_state().flags
    }

    pub fn has_attachment(&self) -> bool {
        self.flags().has_attachment
    }

    pub fn has_draft(&self) -> bool {
        self.flags().has_draft
    }

    pub fn has_error(&self) -> bool {
        self.flags().has_error
    }

    pub fn is_read(&self) -> bool {
        self.flags().is_read
    }

    pub fn set_read(&self, is_read: bool) {
        self.lock_state().flags.is_read = is_read;
    }

    pub fn set_has_draft(&self, has_draft: bool) {
        self.lock_state().flags.has_draft = has_draft;
    }

    pub fn set_has_error(&self, has_error: bool) {
        self.lock_state().flags.has_error = has_error;
    }

    pub fn set_has_attachment(&self, has_attachment: bool) {
        self.lock_state().flags.has_attachment = has_attachment;
    }

    /// Register `view` as the one row to notify when the name resolves
    ///
    /// Replaces any earlier registration.
    pub fn set_waiting_view(&self, view: Weak<dyn HeaderObserver>) {
        self.lock_state().waiting_view = Some(view);
    }

    /// Return the resolved name, or register `view` as waiting if there is none yet
    ///
    /// Checking and registering under the same lock means a resolution can't
    /// slip in between and leave the view waiting forever.
    pub fn from_or_wait(&self, view: Weak<dyn HeaderObserver>) -> Option<String> {
        let mut state = self.lock_state();
        match &state.from {
            Some(from) => Some(from.clone()),
            None => {
                state.waiting_view = Some(view);
                None
            }
        }
    }

    /// Whether a live view is currently registered as waiting
    pub fn has_waiting_view(&self) -> bool {
        self.lock_state()
            .waiting_view
            .as_ref()
            .is_some_and(|view| view.strong_count() > 0)
    }

    /// Completion entry point for name resolution
    ///
    /// Stores the name and notifies the waiting view. A duplicate completion
    /// after the name is set is ignored.
    pub fn on_from_resolved(self: &Arc<Self>, from: String) {
        {
            let mut state = self.lock_state();
            if state.from.is_some() {
                debug!("Ignoring duplicate name resolution for {}", self.id);
                return;
            }
            state.from = Some(from);
        }
        self.notify_resolved();
    }

    /// Hand the resolved name to the waiting view, if any
    ///
    /// The registration is consumed, so a second call is a no-op. Does nothing
    /// while the name is still unresolved.
    pub fn notify_resolved(self: &Arc<Self>) {
        let waiting = {
            let mut state = self.lock_state();
            if state.from.is_none() {
                return;
            }
            state.waiting_view.take()
        };

        if let Some(view) = waiting.and_then(|view| view.upgrade()) {
            view.on_header_loaded(self);
        }
    }

    /// Ask `resolver` for the display name unless it is already known
    ///
    /// The completion holds only a weak reference, so a header discarded
    /// before resolution finishes is simply dropped.
    pub fn start_resolving(self: &Arc<Self>, resolver: &dyn NameResolver) {
        if self.lock_state().from.is_some() {
            return;
        }

        let header = Arc::downgrade(self);
        resolver.resolve(
            &self.from_token,
            Box::new(move |name| match header.upgrade() {
                Some(header) => header.on_from_resolved(name),
                None => debug!("Name resolved for a discarded header"),
            }),
        );
    }
}

impl std::fmt::Debug for ConversationHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock_state();
        f.debug_struct("ConversationHeader")
            .field("id", &self.id)
            .field("from_token", &self.from_token)
            .field("from", &state.from)
            .field("message_count", &self.message_count)
            .field("subject", &self.subject)
            .field("date", &self.date)
            .field("flags", &state.flags)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingObserver {
        calls: AtomicUsize,
    }

    impl HeaderObserver for CountingObserver {
        fn on_header_loaded(&self, _header: &Arc<ConversationHeader>) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn make_header(id: &str) -> Arc<ConversationHeader> {
        Arc::new(ConversationHeader::new(ConversationSummary::new(
            ThreadId::new(id),
            "+15550100",
            2,
            "Hello",
            Utc::now(),
        )))
    }

    fn weak(observer: &Arc<CountingObserver>) -> Weak<dyn HeaderObserver> {
        let observer: Arc<dyn HeaderObserver> = observer.clone();
        Arc::downgrade(&observer)
    }

    #[test]
    fn test_notify_reaches_waiting_view() {
        let header = make_header("t1");
        let observer = Arc::new(CountingObserver::default());
        header.set_waiting_view(weak(&observer));

        header.on_from_resolved("Alice".to_string());

        assert_eq!(header.from().as_deref(), Some("Alice"));
        assert_eq!(observer.calls.load(Ordering::SeqCst), 1);
        assert!(!header.has_waiting_view());
    }

    #[test]
    fn test_last_registration_wins() {
        let header = make_header("t1");
        let first = Arc::new(CountingObserver::default());
        let second = Arc::new(CountingObserver::default());
        header.set_waiting_view(weak(&first));
        header.set_waiting_view(weak(&second));

        header.on_from_resolved("Alice".to_string());

        assert_eq!(first.calls.load(Ordering::SeqCst), 0);
        assert_eq!(second.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_duplicate_resolution_is_ignored() {
        let header = make_header("t1");
        let observer = Arc::new(CountingObserver::default());
        header.set_waiting_view(weak(&observer));

        header.on_from_resolved("Alice".to_string());
        header.on_from_resolved("Mallory".to_string());
        header.notify_resolved();

        assert_eq!(header.from().as_deref(), Some("Alice"));
        assert_eq!(observer.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_notify_before_resolution_keeps_waiting_view() {
        let header = make_header("t1");
        let observer = Arc::new(CountingObserver::default());
        header.set_waiting_view(weak(&observer));

        header.notify_resolved();

        assert_eq!(observer.calls.load(Ordering::SeqCst), 0);
        assert!(header.has_waiting_view());
    }

    #[test]
    fn test_dropped_view_is_not_kept_alive() {
        let header = make_header("t1");
        let observer = Arc::new(CountingObserver::default());
        header.set_waiting_view(weak(&observer));
        drop(observer);

        assert!(!header.has_waiting_view());
        // Nothing to notify, must not panic
        header.on_from_resolved("Alice".to_string());
    }

    #[test]
    fn test_from_or_wait() {
        let header = make_header("t1");
        let observer = Arc::new(CountingObserver::default());

        assert_eq!(header.from_or_wait(weak(&observer)), None);
        assert!(header.has_waiting_view());

        header.on_from_resolved("Alice".to_string());
        let other = Arc::new(CountingObserver::default());
        assert_eq!(header.from_or_wait(weak(&other)).as_deref(), Some("Alice"));
        assert!(!header.has_waiting_view());
    }

    #[test]
    fn test_flag_updates() {
        let header = make_header("t1");
        header.set_read(false);
        header.set_has_draft(true);
        header.set_has_error(true);
        header.set_has_attachment(true);

        assert_eq!(
            header.flags(),
            HeaderFlags {
                has_attachment: true,
                has_draft: true,
                has_error: true,
                is_read: false,
            }
        );
    }
}
