//! Timesheet rendering input and delivery.
//!
//! Builds the per-day [`Timesheet`] grid and sends it, or a reminder,
//! through host-provided collaborators with bounded retry.

mod dispatcher;
mod retry;
mod timesheet;

pub use dispatcher::{
    Attachment, CollaboratorError, Delivery, Dispatcher, Mailer, OutgoingMail, TimesheetExporter,
};
pub use retry::RetryPolicy;
pub use timesheet::{Timesheet, TimesheetRow};
