//! Contact Info Extractor: pattern-matches resume text for applicant details.
//!
//! Pure and infallible: every field falls back to a placeholder so a sparse
//! resume never aborts the pipeline. The operator reviews the draft before
//! sending.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::applicant::{
    ApplicantInfo, PLACEHOLDER_EMAIL, PLACEHOLDER_LINKEDIN, PLACEHOLDER_NAME, PLACEHOLDER_PHONE,
};

lazy_static! {
    /// local@domain with a dot-segmented domain.
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+").unwrap();

    /// Optional country code, then 3-3-4 digits separated by dash, dot or space,
    /// with optional parentheses around the area code.
    static ref PHONE_REGEX: Regex =
        Regex::new(r"(\+?\d{1,3})?[-.\s]?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap();

    /// Optional scheme and www, then a linkedin.com/in/ handle.
    static ref LINKEDIN_REGEX: Regex =
        Regex::new(r"(https?://)?(www\.)?(linkedin\.com/in/[a-zA-Z0-9_/-]+)").unwrap();
}

/// Extracts email, phone and profile URL from resume text.
/// The name stays a placeholder; the content generator may infer it later.
pub fn extract_contact(text: &str) -> ApplicantInfo {
    ApplicantInfo {
        name: PLACEHOLDER_NAME.to_string(),
        email: first_match(&EMAIL_REGEX, text).unwrap_or_else(|| PLACEHOLDER_EMAIL.to_string()),
        phone: first_match(&PHONE_REGEX, text)
            .map(|p| p.trim().to_string())
            .unwrap_or_else(|| PLACEHOLDER_PHONE.to_string()),
        linkedin: first_match(&LINKEDIN_REGEX, text)
            .unwrap_or_else(|| PLACEHOLDER_LINKEDIN.to_string()),
    }
}

fn first_match(re: &Regex, text: &str) -> Option<String> {
    re.find(text).map(|m| m.as_str().to_string())
}
