//! Materializing conversation headers for the list

use log::debug;
use std::sync::Arc;

use crate::contacts::NameResolver;
use crate::models::{ConversationHeader, ConversationSummary, ThreadId};

/// Turn summaries into headers and start resolving their sender names
///
/// Returns headers sorted by date descending (newest first). Names that
/// `resolver` answers synchronously are already set on return; the rest
/// arrive whenever the resolver completes.
///
/// # Arguments
/// * `summaries` - Conversation rows from the message store
/// * `resolver` - Where sender tokens are resolved to display names
pub fn load_headers(
    summaries: Vec<ConversationSummary>,
    resolver: &dyn NameResolver,
) -> Vec<Arc<ConversationHeader>> {
    let mut headers: Vec<Arc<ConversationHeader>> = summaries
        .into_iter()
        .map(|summary| Arc::new(ConversationHeader::new(summary)))
        .collect();
    headers.sort_by(|a, b| b.date().cmp(&a.date()));

    for header in &headers {
        header.start_resolving(resolver);
    }

    debug!(
        "Loaded {} headers, {} names still resolving",
        headers.len(),
        unresolved_count(&headers)
    );
    headers
}

/// Find the header for `id`
pub fn find_header<'a>(
    headers: &'a [Arc<ConversationHeader>],
    id: &ThreadId,
) -> Option<&'a Arc<ConversationHeader>> {
    headers.iter().find(|header| header.id() == id)
}

/// Number of headers whose sender name hasn't resolved yet
pub fn unresolved_count(headers: &[Arc<ConversationHeader>]) -> usize {
    headers.iter().filter(|header| header.from().is_none()).count()
}
