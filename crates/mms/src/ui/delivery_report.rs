//! Delivery report row: status of one message for one recipient

use crate::contacts::ContactNameCache;
use crate::models::DeliveryStatus;

use super::format::RowStrings;

/// Icon shown next to a delivery status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    Delivered,
    NotDelivered,
    Pending,
}

impl StatusIcon {
    /// Icon for `status`, `None` when the icon should be left alone
    pub fn for_status(status: DeliveryStatus) -> Option<Self> {
        match status {
            DeliveryStatus::Received => Some(Self::Delivered),
            // No dedicated rejected artwork
            DeliveryStatus::Failed | DeliveryStatus::Rejected => Some(Self::NotDelivered),
            DeliveryStatus::Pending => Some(Self::Pending),
            DeliveryStatus::Unknown => None,
        }
    }
}

/// What a delivery report row displays
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReportRow {
    pub recipient: String,
    pub status: String,
    pub icon: Option<StatusIcon>,
}

/// One row of the delivery report list
///
/// Binding is synchronous: the recipient is looked up in the contact cache
/// directly, so there is nothing to go stale.
#[derive(Debug, Default)]
pub struct DeliveryReportListItem {
    row: DeliveryReportRow,
}

impl DeliveryReportListItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(
        &mut self,
        recipient: &str,
        status: &str,
        contacts: &ContactNameCache,
        strings: &RowStrings,
    ) {
        self.row.recipient = contacts.get_contact_name(recipient);
        self.row.status = status.to_string();

        // An unknown status keeps whatever icon the recycled row had
        if let Some(icon) = StatusIcon::for_status(DeliveryStatus::parse(status, strings)) {
            self.row.icon = Some(icon);
        }
    }

    pub fn row(&self) -> &DeliveryReportRow {
        &self.row
    }
}
