//! # Folio Mail
//!
//! Forwards contact-form submissions to the site owner's inbox.
//!
//! The transport sits behind the [`MailTransport`] trait; [`SmtpMailer`] is
//! the production implementation. Without SMTP credentials the relay only
//! logs submissions and still reports success to the visitor.

pub mod compose;
pub mod error;
pub mod relay;
pub mod smtp;

pub use compose::{OutboundMail, compose};
pub use error::MailError;
pub use relay::{ContactRelay, ContactSubmission, RelayOutcome};
pub use smtp::SmtpMailer;

use async_trait::async_trait;

/// Something that can deliver one composed mail.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Human-readable transport name
    fn name(&self) -> &str;

    /// Deliver the mail; one attempt, no retries.
    async fn send(&self, mail: OutboundMail) -> Result<(), MailError>;
}
