//! Text formatting shared by the list rows

use chrono::{DateTime, Local, TimeZone, Utc};
use std::ops::Range;

/// Localizable strings used by the rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowStrings {
    /// Shown in place of the sender while its name is loading
    pub loading_placeholder: String,
    /// Marker appended to the sender when the conversation has a draft
    pub has_draft: String,
    pub status_received: String,
    pub status_failed: String,
    pub status_pending: String,
    pub status_rejected: String,
}

impl Default for RowStrings {
    fn default() -> Self {
        Self {
            loading_placeholder: "...".to_string(),
            has_draft: "Draft".to_string(),
            status_received: "Received".to_string(),
            status_failed: "Failed".to_string(),
            status_pending: "Pending".to_string(),
            status_rejected: "Rejected".to_string(),
        }
    }
}

/// Text with an optional distinctly styled draft marker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    pub text: String,
    /// Byte range of the draft marker within `text`
    pub draft_span: Option<Range<usize>>,
}

impl StyledText {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            draft_span: None,
        }
    }
}

/// Format the sender line of a conversation row
///
/// `"name"` for a single message, `"name (n)"` otherwise, followed by the
/// draft marker when there is one. An unresolved name renders as the
/// loading placeholder with the same decorations.
pub fn format_from(
    from: Option<&str>,
    message_count: usize,
    has_draft: bool,
    strings: &RowStrings,
) -> StyledText {
    let mut text = from.unwrap_or(&strings.loading_placeholder).to_string();

    if message_count > 1 {
        text.push_str(&format!(" ({})", message_count));
    }

    let mut draft_span = None;
    if has_draft {
        text.push(' ');
        let start = text.len();
        text.push_str(&strings.has_draft);
        draft_span = Some(start..text.len());
    }

    StyledText { text, draft_span }
}

/// Format a conversation timestamp in the local time zone
pub fn format_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format_date_in(date, now, &Local)
}

/// Format a conversation timestamp in `tz`
///
/// Today shows the time, the last week shows the weekday, anything older
/// (or later than today) shows month and day.
pub fn format_date_in<Tz: TimeZone>(date: DateTime<Utc>, now: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let local = date.with_timezone(tz);
    let now = now.with_timezone(tz);

    if local.date_naive() == now.date_naive() {
        local.format("%H:%M").to_string()
    } else if local <= now && (now.clone() - local.clone()).num_days() < 7 {
        local.format("%a").to_string()
    } else {
        local.format("%b %d").to_string()
    }
}
