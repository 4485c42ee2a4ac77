//! Conversation list host - recycles a fixed pool of rows over the headers

use log::debug;
use mms::{ConversationHeader, ConversationHeaderView, HeaderRow, RenderQueue, RowStrings, ThreadId};
use std::sync::Arc;

/// A scrolling window over the conversation list
///
/// Header `k` is always shown by row `k % rows.len()`, so scrolling by one
/// rebinds only the row that left the window.
pub struct ConversationListHost {
    headers: Vec<Arc<ConversationHeader>>,
    rows: Vec<ConversationHeaderView>,
    first_visible: usize,
    binds: usize,
}

impl ConversationListHost {
    pub fn new(
        headers: Vec<Arc<ConversationHeader>>,
        render: RenderQueue,
        strings: Arc<RowStrings>,
        visible_rows: usize,
    ) -> Self {
        let rows = (0..visible_rows.max(1))
            .map(|_| ConversationHeaderView::new(render.clone(), Arc::clone(&strings)))
            .collect();

        let mut host = Self {
            headers,
            rows,
            first_visible: 0,
            binds: 0,
        };
        host.scroll_to(0);
        host
    }

    /// Largest valid first visible index
    fn max_first(&self) -> usize {
        self.headers.len().saturating_sub(self.rows.len())
    }

    /// Show the window starting at `first`, clamped to the list
    pub fn scroll_to(&mut self, first: usize) {
        self.first_visible = first.min(self.max_first());
        let end = (self.first_visible + self.rows.len()).min(self.headers.len());

        for index in self.first_visible..end {
            let header = &self.headers[index];
            let row = &self.rows[index % self.rows.len()];
            let already_bound = row
                .header()
                .is_some_and(|bound| Arc::ptr_eq(&bound, header));
            if !already_bound {
                row.bind(header);
                self.binds += 1;
            }
        }
        debug!(
            "Showing conversations {}..{} ({} binds so far)",
            self.first_visible, end, self.binds
        );
    }

    /// Scroll one row down, returns false at the end of the list
    pub fn scroll_down(&mut self) -> bool {
        if self.first_visible >= self.max_first() {
            return false;
        }
        self.scroll_to(self.first_visible + 1);
        true
    }

    pub fn first_visible(&self) -> usize {
        self.first_visible
    }

    /// Total number of binds performed
    pub fn binds(&self) -> usize {
        self.binds
    }

    /// What the visible rows display, top to bottom
    pub fn visible_rows(&self) -> Vec<(ThreadId, HeaderRow)> {
        let end = (self.first_visible + self.rows.len()).min(self.headers.len());
        (self.first_visible..end)
            .map(|index| {
                let row = &self.rows[index % self.rows.len()];
                (self.headers[index].id().clone(), row.row())
            })
            .collect()
    }
}
