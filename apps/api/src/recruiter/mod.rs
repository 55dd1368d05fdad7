//! Recruiter Email Resolver: best-effort lookup of a recruiter's address.
//!
//! Two steps against a contact-lookup service: company → domain, then
//! (full name, domain) → email. Nothing here ever fails the pipeline: every
//! error collapses to an empty result.

pub mod hunter;
pub mod resolver;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Lookup API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Contact lookup is not configured")]
    NotConfigured,
}

/// Contact-lookup service. `Ok(None)` means the service had no answer.
#[async_trait]
pub trait ContactLookup: Send + Sync {
    async fn domain_search(&self, company: &str) -> Result<Option<String>, LookupError>;

    async fn email_finder(
        &self,
        full_name: &str,
        domain: &str,
    ) -> Result<Option<String>, LookupError>;
}
