use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_NAME: &str = "Your Name";
pub const PLACEHOLDER_EMAIL: &str = "youremail@example.com";
pub const PLACEHOLDER_PHONE: &str = "(123) 456-7890";
pub const PLACEHOLDER_LINKEDIN: &str = "https://linkedin.com/in/yourname";

/// Applicant contact details pulled from the resume.
/// Missing fields hold obviously-fake placeholders for the operator to review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
}

impl Default for ApplicantInfo {
    fn default() -> Self {
        Self {
            name: PLACEHOLDER_NAME.to_string(),
            email: PLACEHOLDER_EMAIL.to_string(),
            phone: PLACEHOLDER_PHONE.to_string(),
            linkedin: PLACEHOLDER_LINKEDIN.to_string(),
        }
    }
}
