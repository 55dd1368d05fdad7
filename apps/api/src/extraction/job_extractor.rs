//! Structured Extractor: turns cleaned page text into `JobPosting` records.
//!
//! Two schema variants:
//! - `Organization`: careers page, object or array, always normalized to a list.
//! - `Individual`: one posting with snake_case keys and a recruiter email,
//!   located as the first balanced `{...}` span in the completion.
//!
//! No retries. A parse failure carries the raw completion for diagnosis.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::extraction::json_repair::{
    close_truncated_json, find_fenced_block, first_balanced_object, strip_json_fences,
};
use crate::extraction::prompts::{INDIVIDUAL_EXTRACT_TEMPLATE, ORGANIZATION_EXTRACT_TEMPLATE};
use crate::llm_client::prompts::{fill, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{CompletionService, ModelTier};
use crate::models::job::JobPosting;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVariant {
    Organization,
    Individual,
}

/// Runs the variant's extraction and returns the postings as a list.
/// The individual variant always yields exactly one element.
pub async fn extract(
    cleaned_text: &str,
    variant: SchemaVariant,
    llm: &dyn CompletionService,
) -> Result<Vec<JobPosting>, AppError> {
    match variant {
        SchemaVariant::Organization => extract_jobs(cleaned_text, llm).await,
        SchemaVariant::Individual => Ok(vec![extract_job_info(cleaned_text, llm).await?]),
    }
}

/// Organization variant. An empty list means "no jobs", not a failure.
pub async fn extract_jobs(
    cleaned_text: &str,
    llm: &dyn CompletionService,
) -> Result<Vec<JobPosting>, AppError> {
    let prompt = fill(ORGANIZATION_EXTRACT_TEMPLATE, &[("page_data", cleaned_text)]);
    let raw = llm
        .complete(&prompt, ModelTier::Extraction)
        .await
        .map_err(|e| AppError::Llm(format!("Job extraction failed: {e}")))?;

    let jobs = parse_organization_response(&raw)?;
    info!("Extracted {} job posting(s) from careers page", jobs.len());
    Ok(jobs)
}

/// Individual variant.
pub async fn extract_job_info(
    cleaned_text: &str,
    llm: &dyn CompletionService,
) -> Result<JobPosting, AppError> {
    let prompt = fill(
        INDIVIDUAL_EXTRACT_TEMPLATE,
        &[("page_data", cleaned_text), ("json_only", JSON_ONLY_INSTRUCTION)],
    );
    let raw = llm
        .complete(prompt.trim(), ModelTier::Extraction)
        .await
        .map_err(|e| AppError::Llm(format!("Job extraction failed: {e}")))?;

    let job = parse_individual_response(&raw)?;
    info!("Extracted posting: role={:?} company={:?}", job.role, job.company_name);
    Ok(job)
}

/// Decodes a careers-page completion: bare JSON, fenced JSON, a fenced block
/// after prose, or JSON cut off mid-stream (closed after its last complete
/// element). Objects are wrapped; arrays are returned as-is.
pub fn parse_organization_response(raw: &str) -> Result<Vec<JobPosting>, AppError> {
    const FAILURE: &str = "Context too big. Unable to parse jobs.";

    let unfenced = strip_json_fences(raw);
    let value = serde_json::from_str::<Value>(unfenced)
        .map_err(|e| debug!("Direct JSON parse failed ({e}), looking for a fenced block"))
        .ok()
        .or_else(|| find_fenced_block(raw).and_then(|block| serde_json::from_str(block).ok()))
        .or_else(|| {
            let closed = close_truncated_json(unfenced)?;
            let value = serde_json::from_str::<Value>(&closed).ok()?;
            warn!("Recovered job list from a truncated completion");
            Some(value)
        })
        .ok_or_else(|| AppError::extraction(FAILURE, raw))?;

    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| posting_from_value(item, raw))
            .collect(),
        obj @ Value::Object(_) => Ok(vec![posting_from_value(obj, raw)?]),
        _ => Err(AppError::extraction(FAILURE, raw)),
    }
}

/// Decodes an individual-path completion from its first balanced `{...}` span.
pub fn parse_individual_response(raw: &str) -> Result<JobPosting, AppError> {
    let content = raw.trim();

    let json_text = first_balanced_object(content)
        .ok_or_else(|| AppError::extraction("Failed to find JSON in LLM response.", content))?;

    serde_json::from_str::<JobPosting>(json_text)
        .map_err(|e| AppError::extraction(format!("Failed to parse extracted JSON: {e}"), content))
}

fn posting_from_value(value: Value, raw: &str) -> Result<JobPosting, AppError> {
    if !value.is_object() {
        return Err(AppError::extraction(
            "Job list contained a non-object entry.",
            raw,
        ));
    }
    serde_json::from_value(value)
        .map_err(|e| AppError::extraction(format!("Failed to read job posting: {e}"), raw))
}
