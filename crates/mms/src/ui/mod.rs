//! Row views for the conversation list and delivery reports
//!
//! Nothing here depends on a UI toolkit. Views keep a plain snapshot of what
//! they would draw, and every mutation of that snapshot happens on the render
//! thread that drains the [`RenderLoop`].

mod delivery_report;
mod format;
mod header_view;
mod render;

pub use delivery_report::{DeliveryReportListItem, DeliveryReportRow, StatusIcon};
pub use format::{RowStrings, StyledText, format_date, format_date_in, format_from};
pub use header_view::{ConversationHeaderView, HeaderRow};
pub use render::{RenderLoop, RenderQueue, RenderQueueClosed, RenderTask, render_queue};
