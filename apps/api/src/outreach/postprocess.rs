//! Deterministic text surgery on drafted emails.
//!
//! The marker filter and signature truncation are literal-substring rules
//! tuned to one model family's habits; other completion services may need
//! different markers.

use crate::models::applicant::ApplicantInfo;
use crate::models::job::JobPosting;

/// Everything from the first occurrence of this phrase is replaced by the
/// canonical signature block.
pub const SIGNATURE_MARKER: &str = "Best Regards,";

/// Lines containing any of these (case-insensitive) describe a cover letter
/// instead of being part of the email, and are dropped.
pub const HALLUCINATION_MARKERS: &[&str] = &[
    "here is the cover letter",
    "attached is the cover letter",
    "generated cover letter",
];

pub const GENERIC_GREETING: &str = "To Whom It May Concern,";

/// Guesses the applicant's name from the first non-empty line of a cover letter.
///
/// Accepts 2-4 whitespace-separated, purely alphabetic words. Known false
/// positive: an opener like "Dear Hiring Manager" has the same shape and is
/// returned as a name.
pub fn infer_applicant_name(cover_letter: &str) -> Option<&str> {
    let first_line = cover_letter
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())?;

    let words: Vec<&str> = first_line.split_whitespace().collect();
    let looks_like_name = (2..=4).contains(&words.len())
        && words
            .iter()
            .all(|w| w.chars().all(char::is_alphabetic));

    looks_like_name.then_some(first_line)
}

/// "Hello {first name}," when a recruiter is known, else the generic salutation.
pub fn select_greeting(job: &JobPosting) -> String {
    match job.recruiter_first_name() {
        Some(first_name) => format!("Hello {first_name},"),
        None => GENERIC_GREETING.to_string(),
    }
}

/// Drops lines carrying any hallucination marker.
pub fn strip_hallucinated_lines(text: &str) -> String {
    text.lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            !HALLUCINATION_MARKERS.iter().any(|m| lower.contains(m))
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Cuts the text at the first literal signature marker.
pub fn truncate_at_signature(text: &str) -> &str {
    match text.find(SIGNATURE_MARKER) {
        Some(idx) => text[..idx].trim(),
        None => text.trim(),
    }
}

pub fn signature_block(applicant: &ApplicantInfo) -> String {
    format!(
        "{SIGNATURE_MARKER}\n{}\n{} | {}",
        applicant.name, applicant.phone, applicant.email
    )
}

/// Full post-processing pass: filter markers, truncate at the model's
/// signature, append the canonical one built from `applicant`.
pub fn finalize_cold_email(raw: &str, applicant: &ApplicantInfo) -> String {
    let filtered = strip_hallucinated_lines(raw.trim());
    let body = truncate_at_signature(&filtered);
    let signature = signature_block(applicant);

    if body.is_empty() {
        signature
    } else {
        format!("{body}\n\n{signature}")
    }
}
