//! Formatting a submission into an outbound mail.

use chrono::{DateTime, Utc};

use crate::relay::ContactSubmission;

/// Site name used in subjects and footers.
pub const SITE_TAG: &str = "pk-portfolio";

/// A fully formatted mail, independent of any transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMail {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Format `submission` as a mail from `sender` to `recipient`.
pub fn compose(
    submission: &ContactSubmission,
    sender: &str,
    recipient: &str,
    sent_at: DateTime<Utc>,
) -> OutboundMail {
    let footer = format!("Sent via {SITE_TAG} · {}", sent_at.format("%Y-%m-%d %H:%M UTC"));

    let text_body = format!(
        "New message via {SITE_TAG}\n\n\
         From: {}\nEmail: {}\nSubject: {}\n\n{}\n\n{footer}\n",
        submission.name, submission.email, submission.subject, submission.message
    );

    let name = html_escape(&submission.name);
    let email = html_escape(&submission.email);
    let subject = html_escape(&submission.subject);
    let message = html_escape(&submission.message);
    let html_body = format!(
        r#"<html><body style="font-family:-apple-system,sans-serif;color:#1c1c1e;max-width:600px;">
  <div style="background:#0a0a0a;padding:20px;border-radius:12px;margin-bottom:20px;">
    <span style="color:#e50914;font-size:18px;font-weight:bold;">{SITE_TAG}</span>
    <span style="color:rgba(255,255,255,0.4);font-size:12px;margin-left:8px;">new message</span>
  </div>
  <table style="width:100%;border-collapse:collapse;">
    <tr><td style="padding:8px 0;color:#666;width:100px;">From</td>
        <td style="padding:8px 0;font-weight:600;">{name}</td></tr>
    <tr><td style="padding:8px 0;color:#666;">Email</td>
        <td style="padding:8px 0;"><a href="mailto:{email}">{email}</a></td></tr>
    <tr><td style="padding:8px 0;color:#666;">Subject</td>
        <td style="padding:8px 0;">{subject}</td></tr>
  </table>
  <hr style="border:none;border-top:1px solid #eee;margin:16px 0;"/>
  <div style="white-space:pre-wrap;line-height:1.6;">{message}</div>
  <hr style="border:none;border-top:1px solid #eee;margin:16px 0;"/>
  <p style="color:#999;font-size:12px;">{footer}</p>
</body></html>"#
    );

    OutboundMail {
        from: sender.to_string(),
        to: recipient.to_string(),
        reply_to: submission.email.clone(),
        subject: format!("[{SITE_TAG}] {}", submission.subject),
        text_body,
        html_body,
    }
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
