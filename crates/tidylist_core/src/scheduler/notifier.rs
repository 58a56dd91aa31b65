//! Alert dispatch contract.
//!
//! # Responsibility
//! - Define the notification seam implemented by the platform layer.
//! - Provide a log-backed default for headless and test use.
//!
//! # Invariants
//! - Permission is granted once up front; dispatch only consults a boolean
//!   gate, never re-prompts.

use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error raised when an alert cannot reach the user.
///
/// Best-effort by design: the scheduler logs it and still latches the task
/// as fired.
#[derive(Debug, PartialEq, Eq)]
pub enum NotifyError {
    /// Notification permission was not granted or the platform channel is
    /// missing.
    Unavailable,
}

impl Display for NotifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "notification channel unavailable"),
        }
    }
}

impl Error for NotifyError {}

/// User-visible alert trigger implemented by the presentation/platform
/// layer.
pub trait Notifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError>;
}

/// Default notifier writing alerts to the log.
///
/// Stands in wherever no platform notification channel exists; the
/// permission flag mirrors the one-time grant a real channel would hold.
pub struct LogNotifier {
    permitted: bool,
}

impl LogNotifier {
    pub fn new(permitted: bool) -> Self {
        Self { permitted }
    }
}

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        if !self.permitted {
            return Err(NotifyError::Unavailable);
        }
        info!("event=notify module=scheduler status=ok title={title} body={body}");
        Ok(())
    }
}
