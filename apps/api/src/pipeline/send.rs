//! Dispatch of operator-approved drafts.
//!
//! Address checks run before any message is built, so a missing recipient or
//! sender never reaches the mail server.

use serde::Deserialize;
use tracing::info;

use crate::config::SenderProfile;
use crate::dispatch::{
    check_addresses, individual_message, organization_message, DeliveryReceipt, MailTransport,
    ResumeAttachment, INDIVIDUAL_SUBJECT,
};
use crate::errors::AppError;

/// Individual-path send: edited cold email plus the cover letter.
#[derive(Debug, Clone, Default)]
pub struct IndividualSend {
    pub to: String,
    pub from: String,
    pub subject: Option<String>,
    pub body: String,
    pub cover_letter: String,
    pub resume: Option<ResumeAttachment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizationSend {
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: String,
}

pub fn organization_subject(sender: &SenderProfile) -> String {
    format!("Exciting Collaboration Opportunity with {}", sender.company)
}

pub async fn send_individual(
    mailer: &dyn MailTransport,
    request: &IndividualSend,
) -> Result<DeliveryReceipt, AppError> {
    check_addresses(&request.to, &request.from)?;

    let subject = non_blank(request.subject.as_deref()).unwrap_or(INDIVIDUAL_SUBJECT);
    let message = individual_message(
        &request.from,
        &request.to,
        subject,
        &request.body,
        request.resume.as_ref(),
        &request.cover_letter,
    )?;

    let receipt = mailer.send(message).await?;
    info!("Individual email sent to {}", request.to.trim());
    Ok(receipt)
}

pub async fn send_organization(
    mailer: &dyn MailTransport,
    sender: &SenderProfile,
    request: &OrganizationSend,
) -> Result<DeliveryReceipt, AppError> {
    check_addresses(&request.to, &request.from)?;

    let subject = non_blank(request.subject.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| organization_subject(sender));
    let message = organization_message(&request.from, &request.to, &subject, &request.body)?;

    let receipt = mailer.send(message).await?;
    info!("Organization email sent to {}", request.to.trim());
    Ok(receipt)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
