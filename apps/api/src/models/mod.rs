pub mod applicant;
pub mod artifacts;
pub mod job;
