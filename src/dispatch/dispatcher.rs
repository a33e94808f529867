//! Timesheet export and email, with retry on rate limiting.
//!
//! PDF export and mail delivery belong to the host platform. They are
//! reached through the [`TimesheetExporter`] and [`Mailer`] traits so the
//! retry and message assembly here stay independent of any one provider.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::config::{DispatchSettings, EmployeeProfile};
use crate::error::{EngineError, EngineResult};
use crate::models::PeriodDates;

use super::retry::RetryPolicy;
use super::timesheet::Timesheet;

/// Failure reported by a host collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    /// The service asked the caller to slow down; the call may be retried.
    #[error("rate limited: {message}")]
    RateLimited {
        /// Message from the service.
        message: String,
    },

    /// The service refused the request; retrying will not help.
    #[error("rejected: {message}")]
    Rejected {
        /// Message from the service.
        message: String,
    },
}

impl CollaboratorError {
    /// Returns true for errors worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CollaboratorError::RateLimited { .. })
    }
}

/// A file attached to an outgoing email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File name shown to the recipient.
    pub file_name: String,
    /// MIME type of the content.
    pub content_type: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

/// An email ready to hand to a [`Mailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    /// Recipient addresses.
    pub to: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    /// Optional attachment.
    pub attachment: Option<Attachment>,
}

/// Renders a timesheet to PDF.
pub trait TimesheetExporter {
    /// Exports `timesheet` and returns the PDF bytes.
    fn export_pdf(
        &self,
        timesheet: &Timesheet,
    ) -> impl Future<Output = Result<Vec<u8>, CollaboratorError>> + Send;
}

/// Delivers email.
pub trait Mailer {
    /// Sends `mail`.
    fn send(&self, mail: &OutgoingMail) -> impl Future<Output = Result<(), CollaboratorError>> + Send;
}

/// Outcome of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Period label of the dispatched timesheet or reminder.
    pub label: String,
    /// Number of addresses the mail went to.
    pub recipients: usize,
    /// Attempts used across export and send.
    pub attempts: u32,
}

/// Exports timesheets and sends them, retrying rate-limited calls.
#[derive(Debug)]
pub struct Dispatcher<E, M> {
    exporter: E,
    mailer: M,
    employee: EmployeeProfile,
    policy: RetryPolicy,
    subject_prefix: String,
}

impl<E, M> Dispatcher<E, M>
where
    E: TimesheetExporter + Sync,
    M: Mailer + Sync,
{
    /// Creates a dispatcher for `employee`.
    pub fn new(exporter: E, mailer: M, employee: EmployeeProfile, settings: &DispatchSettings) -> Self {
        Self {
            exporter,
            mailer,
            employee,
            policy: settings.retry,
            subject_prefix: settings.subject_prefix.clone(),
        }
    }

    /// Exports `timesheet` to PDF and emails it to the configured recipients.
    ///
    /// `dates` is consumed: once a submission has been attempted, the dates
    /// must be resolved again rather than reused.
    ///
    /// # Errors
    ///
    /// - [`EngineError::SchedulingError`] when `dates` belongs to a different
    ///   period than `timesheet`
    /// - [`EngineError::DispatchFailed`] when export or delivery is rejected,
    ///   or stays rate limited for every allowed attempt
    pub async fn submit(&self, timesheet: &Timesheet, dates: PeriodDates) -> EngineResult<Delivery> {
        if dates.label() != timesheet.label {
            return Err(EngineError::SchedulingError {
                message: format!(
                    "timesheet '{}' does not match period '{}'",
                    timesheet.label,
                    dates.label()
                ),
            });
        }

        let label = dates.label();
        let (pdf, export_attempts) = self
            .with_retry(label, "export", || self.exporter.export_pdf(timesheet))
            .await?;

        let mail = OutgoingMail {
            to: self.employee.recipients.clone(),
            subject: format!("{} {}", self.subject_prefix, label),
            body: format!(
                "Timesheet for {} ({}), pay date {}.",
                self.employee.name,
                label,
                dates.pay_date().format("%m/%d/%Y")
            ),
            attachment: Some(Attachment {
                file_name: attachment_name(label),
                content_type: "application/pdf".to_string(),
                bytes: pdf,
            }),
        };
        let ((), send_attempts) = self
            .with_retry(label, "send", || self.mailer.send(&mail))
            .await?;

        info!(
            label = %label,
            recipients = mail.to.len(),
            attempts = export_attempts + send_attempts,
            "Timesheet submitted"
        );

        Ok(Delivery {
            label: label.to_string(),
            recipients: mail.to.len(),
            attempts: export_attempts + send_attempts,
        })
    }

    /// Reminds the employee that the timesheet goes out at the email time.
    pub async fn remind(&self, dates: &PeriodDates) -> EngineResult<Delivery> {
        let label = dates.label();
        let mail = OutgoingMail {
            to: vec![self.employee.email.clone()],
            subject: format!("{} reminder: {}", self.subject_prefix, label),
            body: format!(
                "Please complete your timesheet for {}. It will be sent on {}.",
                label,
                dates.email_date().format("%m/%d/%Y at %H:%M")
            ),
            attachment: None,
        };
        let ((), attempts) = self
            .with_retry(label, "remind", || self.mailer.send(&mail))
            .await?;

        info!(label = %label, attempts, "Reminder sent");

        Ok(Delivery {
            label: label.to_string(),
            recipients: 1,
            attempts,
        })
    }

    /// Runs `call` until it succeeds, fails fatally, or the attempt budget is
    /// spent. Returns the value and the number of attempts used.
    async fn with_retry<T, F, Fut>(
        &self,
        label: &str,
        operation: &str,
        mut call: F,
    ) -> EngineResult<(T, u32)>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CollaboratorError>>,
    {
        let mut attempt = 1;
        loop {
            match call().await {
                Ok(value) => return Ok((value, attempt)),
                Err(err) if err.is_retryable() && self.policy.allows_retry_after(attempt) => {
                    let delay = self.policy.delay_for(attempt);
                    warn!(
                        label = %label,
                        operation,
                        attempt,
                        delay_ms = millis(delay),
                        error = %err,
                        "Collaborator rate limited, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    warn!(
                        label = %label,
                        operation,
                        attempt,
                        error = %err,
                        "Dispatch failed"
                    );
                    return Err(EngineError::DispatchFailed {
                        label: label.to_string(),
                        attempts: attempt,
                        message: format!("{} {}", operation, err),
                    });
                }
            }
        }
    }
}

fn millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}

/// "10/01/2024 - 10/15/2024" becomes "timesheet_10-01-2024_10-15-2024.pdf".
fn attachment_name(label: &str) -> String {
    format!("timesheet_{}.pdf", label.replace(" - ", "_").replace('/', "-"))
}
