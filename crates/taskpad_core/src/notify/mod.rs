//! Notification surface contracts.
//!
//! # Responsibility
//! - Define how the controller reports success, validation errors and
//!   destructive-action confirmations to whatever presents them.
//! - Keep all user-facing copy in an external `MessageCatalog`.
//!
//! # Invariants
//! - Notifications are fire-and-forget; only `confirm` returns a value.

pub mod catalog;
pub mod recording;

pub use catalog::{Locale, MessageCatalog};
pub use recording::{Notification, RecordingNotifier};

/// One user-facing message: a short heading plus body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub title: String,
    pub text: String,
}

impl Message {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Presentation-side sink for controller feedback.
pub trait Notifier {
    fn notify_success(&mut self, message: &Message);
    fn notify_error(&mut self, message: &Message);
    /// Asks a yes/no question; `true` means the user confirmed.
    fn confirm(&mut self, message: &Message) -> bool;
}

impl<T: Notifier + ?Sized> Notifier for Box<T> {
    fn notify_success(&mut self, message: &Message) {
        (**self).notify_success(message);
    }

    fn notify_error(&mut self, message: &Message) {
        (**self).notify_error(message);
    }

    fn confirm(&mut self, message: &Message) -> bool {
        (**self).confirm(message)
    }
}
