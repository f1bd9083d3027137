//! The contact relay: one submission in, at most one mail out.

use std::sync::Arc;

use chrono::Utc;
use folio_config::SmtpConfig;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::compose::compose;
use crate::error::MailError;
use crate::smtp::SmtpMailer;
use crate::MailTransport;

fn default_subject() -> String {
    "Portfolio Contact".into()
}

/// A visitor's contact-form submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    /// Where replies go
    pub email: String,
    #[serde(default = "default_subject")]
    pub subject: String,
    pub message: String,
}

/// What happened to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Delivered to the transport
    Sent,
    /// Mail is not configured; the submission was only logged
    Logged,
}

impl RelayOutcome {
    /// Message shown to the visitor.
    pub fn message(&self) -> &'static str {
        match self {
            RelayOutcome::Sent => "Message sent successfully",
            RelayOutcome::Logged => "Message received (SMTP not configured)",
        }
    }
}

struct Route {
    transport: Arc<dyn MailTransport>,
    sender: String,
    recipient: String,
}

/// Forwards submissions to the owner's inbox, or logs them when mail is
/// not configured.
pub struct ContactRelay {
    route: Option<Route>,
}

impl ContactRelay {
    /// A relay that delivers through `transport`.
    pub fn new(
        transport: Arc<dyn MailTransport>,
        sender: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            route: Some(Route {
                transport,
                sender: sender.into(),
                recipient: recipient.into(),
            }),
        }
    }

    /// A relay that only logs.
    pub fn log_only() -> Self {
        Self { route: None }
    }

    /// SMTP relay when both credential halves are set, log-only otherwise.
    pub fn from_config(config: &SmtpConfig) -> Result<Self, MailError> {
        let (Some(user), Some(password)) = (config.user.as_deref(), config.password.as_deref()) else {
            return Ok(Self::log_only());
        };
        let recipient = config.recipient().unwrap_or(user);
        let mailer = SmtpMailer::new(&config.host, config.port, user, password)?;
        Ok(Self::new(Arc::new(mailer), user, recipient))
    }

    pub fn is_configured(&self) -> bool {
        self.route.is_some()
    }

    /// Relay one submission.
    pub async fn relay(&self, submission: &ContactSubmission) -> Result<RelayOutcome, MailError> {
        let Some(route) = &self.route else {
            warn!("SMTP not configured, logging contact message only");
            info!(
                name = %submission.name,
                email = %submission.email,
                subject = %submission.subject,
                "Contact message received"
            );
            return Ok(RelayOutcome::Logged);
        };

        let mail = compose(submission, &route.sender, &route.recipient, Utc::now());
        match route.transport.send(mail).await {
            Ok(()) => {
                info!(name = %submission.name, email = %submission.email, transport = route.transport.name(), "Contact mail sent");
                Ok(RelayOutcome::Sent)
            }
            Err(e) => {
                error!(error = %e, "Contact mail failed");
                Err(e)
            }
        }
    }
}
