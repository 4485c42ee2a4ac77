//! Conversation list row
//!
//! A [`ConversationHeaderView`] is one visual slot in the conversation list.
//! The host recycles it for different headers as the user scrolls, while
//! sender names resolve in the background. The rule is simple: a resolved
//! name is only drawn if the view still shows that exact header when the
//! update runs.
//!
//! The bound header, a bind generation and the rendered [`HeaderRow`] sit
//! behind one mutex. Name notifications are checked against the bound
//! header when they arrive, then posted to the render thread and checked
//! again (header identity and generation) right before they are applied.

use chrono::Utc;
use log::debug;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use super::format::{RowStrings, StyledText, format_date, format_from};
use super::render::RenderQueue;
use crate::models::{ConversationHeader, HeaderObserver};

/// What a conversation row currently displays
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderRow {
    pub from: StyledText,
    pub subject: String,
    pub date: String,
    pub attachment_visible: bool,
    pub unread_indicator_visible: bool,
    pub error_visible: bool,
    /// Unread conversations use the bold face
    pub bold: bool,
}

struct ViewState {
    header: Option<Arc<ConversationHeader>>,
    /// Bumped on every bind, so deferred updates can tell they are stale
    generation: u64,
    row: HeaderRow,
    face_changes: usize,
}

impl ViewState {
    fn is_bound_to(&self, header: &Arc<ConversationHeader>) -> bool {
        self.header
            .as_ref()
            .is_some_and(|bound| Arc::ptr_eq(bound, header))
    }
}

struct ViewInner {
    me: Weak<ViewInner>,
    state: Mutex<ViewState>,
    render: RenderQueue,
    strings: Arc<RowStrings>,
}

impl ViewInner {
    fn lock_state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Runs on the render thread
    fn apply_loaded(&self, header: &Arc<ConversationHeader>, generation: u64) {
        let mut state = self.lock_state();
        if !state.is_bound_to(header) || state.generation != generation {
            debug!(
                "View was rebound before the name for {} could be applied",
                header.id()
            );
            return;
        }

        let from = header.from();
        state.row.from = format_from(
            from.as_deref(),
            header.message_count(),
            header.has_draft(),
            &self.strings,
        );
    }
}

impl HeaderObserver for ViewInner {
    fn on_header_loaded(&self, header: &Arc<ConversationHeader>) {
        let state = self.lock_state();
        if !state.is_bound_to(header) {
            debug!("View scrolled away from {} before its name loaded", header.id());
            return;
        }

        let generation = state.generation;
        let view = self.me.clone();
        let header = Arc::clone(header);
        let posted = self.render.post(move || {
            if let Some(view) = view.upgrade() {
                view.apply_loaded(&header, generation);
            }
        });

        if posted.is_err() {
            debug!("Render loop closed, dropping name update");
        }
    }
}

/// A recyclable conversation list row
///
/// Cloning gives another handle to the same row.
#[derive(Clone)]
pub struct ConversationHeaderView {
    inner: Arc<ViewInner>,
}

impl ConversationHeaderView {
    /// Create an empty row that renders through `render`
    pub fn new(render: RenderQueue, strings: Arc<RowStrings>) -> Self {
        let inner = Arc::new_cyclic(|me| ViewInner {
            me: me.clone(),
            state: Mutex::new(ViewState {
                header: None,
                generation: 0,
                row: HeaderRow::default(),
                face_changes: 0,
            }),
            render,
            strings,
        });
        Self { inner }
    }

    /// Display `header` in this row
    ///
    /// Must be called on the render thread. Everything but the sender name is
    /// rendered from the header's current values. If the name is still
    /// loading, a placeholder is shown and this row registers as the header's
    /// waiting view. Earlier headers are not unregistered; their late updates
    /// are discarded when they arrive.
    pub fn bind(&self, header: &Arc<ConversationHeader>) {
        let inner = &self.inner;
        let mut state = inner.lock_state();

        let old = state.header.replace(Arc::clone(header));
        state.generation += 1;

        let flags = header.flags();
        state.row.attachment_visible = flags.has_attachment;
        state.row.date = format_date(header.date(), Utc::now());

        let waiting: Weak<dyn HeaderObserver> = inner.me.clone();
        let from = header.from_or_wait(waiting);
        state.row.from = format_from(
            from.as_deref(),
            header.message_count(),
            flags.has_draft,
            &inner.strings,
        );

        let bold = !flags.is_read;
        if old.is_none() || state.row.bold != bold {
            state.row.bold = bold;
            state.face_changes += 1;
        }
        state.row.unread_indicator_visible = !flags.is_read;

        state.row.subject = header.subject().to_string();
        state.row.error_visible = flags.has_error;
    }

    /// Display a static title row, e.g. the "new message" entry
    ///
    /// Unbinds any header, so a pending name update can't overwrite the title.
    pub fn bind_title(&self, title: &str, explain: &str) {
        let mut state = self.inner.lock_state();
        state.header = None;
        state.generation += 1;
        state.row = HeaderRow {
            from: StyledText::plain(title),
            subject: explain.to_string(),
            bold: state.row.bold,
            ..HeaderRow::default()
        };
    }

    /// The header this row currently represents
    pub fn header(&self) -> Option<Arc<ConversationHeader>> {
        self.inner.lock_state().header.clone()
    }

    /// Snapshot of what the row currently displays
    pub fn row(&self) -> HeaderRow {
        self.inner.lock_state().row.clone()
    }

    /// Number of binds so far
    pub fn generation(&self) -> u64 {
        self.inner.lock_state().generation
    }

    /// How many times the row switched between the bold and regular face
    pub fn face_changes(&self) -> usize {
        self.inner.lock_state().face_changes
    }
}

impl std::fmt::Debug for ConversationHeaderView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.lock_state();
        f.debug_struct("ConversationHeaderView")
            .field("header", &state.header.as_ref().map(|h| h.id().clone()))
            .field("generation", &state.generation)
            .field("row", &state.row)
            .finish()
    }
}
