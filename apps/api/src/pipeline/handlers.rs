//! Axum route handlers for the outreach pipelines.

use axum::{
    extract::{multipart::Field, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::dispatch::{DeliveryReceipt, ResumeAttachment};
use crate::errors::{AppError, RunFailure};
use crate::extraction::job_extractor::{extract, SchemaVariant};
use crate::ingest::normalizer::clean_text;
use crate::models::job::JobPosting;
use crate::pipeline::individual::{run_individual, ResumeUpload};
use crate::pipeline::organization::run_organization;
use crate::pipeline::send::{send_individual, send_organization, IndividualSend, OrganizationSend};
use crate::pipeline::{PipelinePath, PipelineRun};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
    pub variant: SchemaVariant,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub jobs: Vec<JobPosting>,
}

#[derive(Debug, Deserialize)]
pub struct OrganizationGenerateRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub status: &'static str,
    pub receipt: DeliveryReceipt,
}

impl From<DeliveryReceipt> for SendResponse {
    fn from(receipt: DeliveryReceipt) -> Self {
        Self {
            status: "sent",
            receipt,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::Validation("text must not be empty".to_string()));
    }
    let cleaned = clean_text(&req.text);
    let jobs = extract(&cleaned, req.variant, state.llm.as_ref()).await?;
    Ok(Json(ExtractResponse { jobs }))
}

/// POST /api/v1/individual/generate
/// Multipart: `job_url` text field and `resume` file.
pub async fn handle_individual_generate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PipelineRun>, RunFailure> {
    let mut job_url = String::new();
    let mut resume = ResumeUpload::default();

    // Malformed form data fails before a run exists, so it carries an empty run.
    let parsed: Result<(), AppError> = async {
        while let Some(field) = next_field(&mut multipart).await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "job_url" => job_url = field_text(field).await?,
                "resume" => {
                    resume.file_name = field.file_name().map(str::to_string);
                    resume.content_type = field.content_type().map(str::to_string);
                    resume.bytes = field_bytes(field).await?.to_vec();
                }
                _ => {}
            }
        }
        Ok(())
    }
    .await;

    if let Err(error) = parsed {
        return Err(PipelineRun::new(PipelinePath::Individual, &job_url).fail(error));
    }

    run_individual(&state, &job_url, &resume).await.map(Json)
}

/// POST /api/v1/individual/send
/// Multipart: `to`, `from`, optional `subject`, `body`, `cover_letter`,
/// optional `resume` file.
pub async fn handle_individual_send(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SendResponse>, AppError> {
    let mut request = IndividualSend::default();

    while let Some(field) = next_field(&mut multipart).await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "to" => request.to = field_text(field).await?,
            "from" => request.from = field_text(field).await?,
            "subject" => request.subject = Some(field_text(field).await?),
            "body" => request.body = field_text(field).await?,
            "cover_letter" => request.cover_letter = field_text(field).await?,
            "resume" => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let bytes = field_bytes(field).await?;
                if !bytes.is_empty() {
                    request.resume = Some(ResumeAttachment {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    let receipt = send_individual(state.mailer.as_ref(), &request).await?;
    Ok(Json(receipt.into()))
}

/// POST /api/v1/organization/generate
pub async fn handle_organization_generate(
    State(state): State<AppState>,
    Json(req): Json<OrganizationGenerateRequest>,
) -> Result<Json<PipelineRun>, RunFailure> {
    run_organization(&state, &req.url).await.map(Json)
}

/// POST /api/v1/organization/send
pub async fn handle_organization_send(
    State(state): State<AppState>,
    Json(req): Json<OrganizationSend>,
) -> Result<Json<SendResponse>, AppError> {
    let receipt = send_organization(state.mailer.as_ref(), &state.config.sender, &req).await?;
    Ok(Json(receipt.into()))
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart helpers
// ────────────────────────────────────────────────────────────────────────────

async fn next_field(multipart: &mut Multipart) -> Result<Option<Field<'_>>, AppError> {
    multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))
}

async fn field_text(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid form field: {e}")))
}

async fn field_bytes(field: Field<'_>) -> Result<Bytes, AppError> {
    field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid file upload: {e}")))
}
