use serde::{Deserialize, Serialize};

/// Text produced by the drafting stages of one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratedArtifacts {
    pub cover_letter_text: String,
    /// Always ends with the canonical signature block on the individual path.
    pub cold_email_text: String,
}
