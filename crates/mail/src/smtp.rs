//! SMTP transport on lettre: STARTTLS, then authenticated send.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, warn};

use crate::compose::OutboundMail;
use crate::error::MailError;
use crate::MailTransport;

/// Upper bound for one SMTP conversation.
pub const SMTP_TIMEOUT: Duration = Duration::from_secs(20);

pub struct SmtpMailer {
    host: String,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build a STARTTLS relay. No connection is made until the first send.
    pub fn new(host: &str, port: u16, user: &str, password: &str) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(port)
            .credentials(Credentials::new(user.to_string(), password.to_string()))
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        Ok(Self {
            host: host.to_string(),
            transport,
        })
    }
}

fn mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.parse::<Mailbox>().map_err(|e| MailError::Address {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

/// Convert to a lettre message with a plain and an HTML alternative.
///
/// `reply_to` is visitor input. When it is not a valid mailbox the header is
/// left out; the address still appears in the body.
pub fn to_message(mail: OutboundMail) -> Result<Message, MailError> {
    let mut builder = Message::builder()
        .from(mailbox(&mail.from)?)
        .to(mailbox(&mail.to)?);
    match mailbox(&mail.reply_to) {
        Ok(reply_to) => builder = builder.reply_to(reply_to),
        Err(e) => warn!(error = %e, "Omitting Reply-To header"),
    }

    builder
        .subject(mail.subject)
        .multipart(MultiPart::alternative_plain_html(mail.text_body, mail.html_body))
        .map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait]
impl MailTransport for SmtpMailer {
    fn name(&self) -> &str {
        "smtp"
    }

    async fn send(&self, mail: OutboundMail) -> Result<(), MailError> {
        let message = to_message(mail)?;
        debug!(host = %self.host, "Sending mail over SMTP");
        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| MailError::Transport(e.to_string()))
    }
}
