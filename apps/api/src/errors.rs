use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::pipeline::PipelineRun;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Model output could not be read as the expected JSON shape.
    /// `raw` is the untouched completion text, kept for diagnosis.
    #[error("{message}\nContent was: {raw}")]
    ExtractionFailed { message: String, raw: String },

    #[error("Page load error: {0}")]
    PageLoad(String),

    #[error("Resume parse error: {0}")]
    ResumeParse(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Dispatch failed: {0}")]
    Dispatch(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn extraction(message: impl Into<String>, raw: impl Into<String>) -> Self {
        AppError::ExtractionFailed {
            message: message.into(),
            raw: raw.into(),
        }
    }

    fn parts(&self) -> (StatusCode, &'static str, String, Option<String>) {
        match self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
            }
            AppError::ExtractionFailed { message, raw } => {
                tracing::error!("Extraction failed: {message}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_FAILED",
                    message.clone(),
                    Some(raw.clone()),
                )
            }
            AppError::PageLoad(msg) => {
                tracing::error!("Page load error: {msg}");
                (StatusCode::BAD_GATEWAY, "PAGE_LOAD_ERROR", msg.clone(), None)
            }
            AppError::ResumeParse(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "RESUME_PARSE_ERROR",
                msg.clone(),
                None,
            ),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (StatusCode::BAD_GATEWAY, "LLM_ERROR", msg.clone(), None)
            }
            AppError::Dispatch(msg) => {
                tracing::error!("Dispatch error: {msg}");
                (StatusCode::BAD_GATEWAY, "DISPATCH_FAILED", msg.clone(), None)
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        }
    }

    fn body(&self) -> (StatusCode, serde_json::Value) {
        let (status, code, message, details) = self.parts();
        let mut error = json!({
            "code": code,
            "message": message,
        });
        if let Some(details) = details {
            error["details"] = json!(details);
        }
        (status, json!({ "error": error }))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.body();
        (status, Json(body)).into_response()
    }
}

/// A pipeline run that stopped at a failing stage.
/// The run context collected so far is returned with the error so the
/// operator can inspect partial results and retry by hand.
#[derive(Debug)]
pub struct RunFailure {
    pub run: Box<PipelineRun>,
    pub error: AppError,
}

impl IntoResponse for RunFailure {
    fn into_response(self) -> Response {
        let (status, mut body) = self.error.body();
        body["partial_run"] = serde_json::to_value(&*self.run).unwrap_or_default();
        (status, Json(body)).into_response()
    }
}
