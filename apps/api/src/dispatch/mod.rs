//! Dispatch: message assembly and mailbox transport.
//!
//! Assembly is pure and testable; transmission sits behind `MailTransport`
//! so the handlers never touch SMTP directly.

pub mod docx;
pub mod smtp;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::Message;
use serde::Serialize;
use thiserror::Error;

use crate::dispatch::docx::{cover_letter_docx, COVER_LETTER_FILE_NAME, DOCX_MIME};
use crate::errors::AppError;

pub const INDIVIDUAL_SUBJECT: &str = "Exciting Career Opportunity Inquiry";

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Invalid email address '{address}': {reason}")]
    Address { address: String, reason: String },

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("Failed to build attachment: {0}")]
    Attachment(String),

    #[error("Mailbox credentials are not configured (MAILBOX_USER / MAILBOX_OAUTH_TOKEN)")]
    MissingCredentials,

    #[error("{0}")]
    Transport(String),
}

impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Address { .. } => AppError::Validation(err.to_string()),
            other => AppError::Dispatch(other.to_string()),
        }
    }
}

/// The uploaded resume, re-attached as-is.
#[derive(Debug, Clone)]
pub struct ResumeAttachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Acknowledgment returned by the mail server.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryReceipt {
    pub code: String,
    pub message: String,
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: Message) -> Result<DeliveryReceipt, DispatchError>;
}

/// Rejects a send with no recipient or sender before any network call.
pub fn check_addresses(to: &str, from: &str) -> Result<(), AppError> {
    if to.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter recipient's Email Address.".to_string(),
        ));
    }
    if from.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter your Email Address.".to_string(),
        ));
    }
    Ok(())
}

/// Individual path: body, optional resume, and the cover letter as `.docx`.
pub fn individual_message(
    from: &str,
    to: &str,
    subject: &str,
    body: &str,
    resume: Option<&ResumeAttachment>,
    cover_letter: &str,
) -> Result<Message, DispatchError> {
    let mut parts = MultiPart::mixed().singlepart(SinglePart::plain(body.to_string()));

    if let Some(resume) = resume {
        parts = parts.singlepart(
            Attachment::new(resume.file_name.clone())
                .body(resume.bytes.clone(), content_type("application/octet-stream")?),
        );
    }

    parts = parts.singlepart(
        Attachment::new(COVER_LETTER_FILE_NAME.to_string())
            .body(cover_letter_docx(cover_letter)?, content_type(DOCX_MIME)?),
    );

    Message::builder()
        .from(mailbox(from)?)
        .to(mailbox(to)?)
        .subject(subject)
        .multipart(parts)
        .map_err(|e| DispatchError::Build(e.to_string()))
}

/// Organization path: plain text, no attachments.
pub fn organization_message(
    from: &str,
    to: &str,
    subject: &str,
    body: &str,
) -> Result<Message, DispatchError> {
    Message::builder()
        .from(mailbox(from)?)
        .to(mailbox(to)?)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())
        .map_err(|e| DispatchError::Build(e.to_string()))
}

fn mailbox(address: &str) -> Result<Mailbox, DispatchError> {
    address.trim().parse().map_err(|e| DispatchError::Address {
        address: address.to_string(),
        reason: format!("{e}"),
    })
}

fn content_type(mime: &str) -> Result<ContentType, DispatchError> {
    ContentType::parse(mime).map_err(|e| DispatchError::Attachment(format!("{mime}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(message: &Message) -> String {
        String::from_utf8_lossy(&message.formatted()).into_owned()
    }

    #[test]
    fn test_missing_recipient_is_rejected() {
        let err = check_addresses("  ", "me@example.com").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Please enter recipient's Email Address."
        );
    }

    #[test]
    fn test_missing_sender_is_rejected() {
        let err = check_addresses("hr@acme.com", "").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_individual_message_has_both_attachments() {
        let resume = ResumeAttachment {
            file_name: "jordan_lee_resume.pdf".to_string(),
            bytes: b"%PDF-1.4 fake".to_vec(),
        };
        let message = individual_message(
            "jordan@example.com",
            "hr@acme.com",
            INDIVIDUAL_SUBJECT,
            "Hello Dana,\n\nBest Regards,\nJordan Lee",
            Some(&resume),
            "Jordan Lee\nI am writing to apply.",
        )
        .unwrap();

        let text = rendered(&message);
        assert!(text.contains("Subject: Exciting Career Opportunity Inquiry"));
        assert!(text.contains("jordan_lee_resume.pdf"));
        assert!(text.contains(COVER_LETTER_FILE_NAME));
        assert!(text.contains("multipart/mixed"));
    }

    #[test]
    fn test_individual_message_without_resume_still_has_cover_letter() {
        let message = individual_message(
            "jordan@example.com",
            "hr@acme.com",
            INDIVIDUAL_SUBJECT,
            "Body",
            None,
            "Letter",
        )
        .unwrap();
        let text = rendered(&message);
        assert!(text.contains(COVER_LETTER_FILE_NAME));
        assert!(!text.contains("application/octet-stream"));
    }

    #[test]
    fn test_organization_message_is_plain_text() {
        let message = organization_message(
            "bd@innovaedge.example",
            "talent@globex.example",
            "Exciting Collaboration Opportunity",
            "Dear Hiring Team,",
        )
        .unwrap();
        let text = rendered(&message);
        assert!(text.contains("text/plain"));
        assert!(!text.contains("multipart"));
        assert!(text.contains("Dear Hiring Team,"));
    }

    #[test]
    fn test_invalid_address_maps_to_validation() {
        let err = organization_message("not-an-address", "a@b.com", "s", "b").unwrap_err();
        assert!(matches!(AppError::from(err), AppError::Validation(_)));
    }
}
