//! Per-recipient delivery status shown in delivery reports

use crate::ui::RowStrings;

/// Delivery state of a message for one recipient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Received,
    Failed,
    Pending,
    Rejected,
    /// No report yet, or a status string we don't recognise
    Unknown,
}

impl DeliveryStatus {
    /// Map a localized status string back to a status
    pub fn parse(status: &str, strings: &RowStrings) -> Self {
        if status == strings.status_received {
            Self::Received
        } else if status == strings.status_failed {
            Self::Failed
        } else if status == strings.status_pending {
            Self::Pending
        } else if status == strings.status_rejected {
            Self::Rejected
        } else {
            Self::Unknown
        }
    }
}
