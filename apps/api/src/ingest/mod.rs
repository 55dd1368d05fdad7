// Ingest collaborators: page loading, text normalization, resume reading.
// These sit in front of extraction and only produce plain text.

pub mod normalizer;
pub mod page_loader;
pub mod resume_reader;
