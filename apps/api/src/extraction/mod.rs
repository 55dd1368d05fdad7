// Extraction: cleaned page text and resume text → validated records.
// All completion output is treated as untrusted text; JSON location and
// schema coercion happen here and nowhere else.

pub mod contact;
pub mod job_extractor;
pub mod json_repair;
pub mod prompts;
