// Outreach drafting: cover letter, cold emails, and the deterministic
// post-processing that makes their closing lines trustworthy.

pub mod generator;
pub mod portfolio;
pub mod postprocess;
pub mod prompts;
