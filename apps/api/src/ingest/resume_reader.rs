//! Resume Reader: plain text from an uploaded PDF, DOCX or text file.

use std::io::{Cursor, Read};

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::AppError;

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

lazy_static! {
    static ref XML_TAG_REGEX: Regex = Regex::new(r"<[^>]+>").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
    PlainText,
}

impl ResumeFormat {
    /// Picks the format from the upload's content type, falling back to the
    /// file extension when the type is missing or generic.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Option<Self> {
        let by_type = content_type.and_then(|ct| {
            match ct.split(';').next().unwrap_or("").trim() {
                "application/pdf" => Some(ResumeFormat::Pdf),
                DOCX_CONTENT_TYPE | "application/msword" => Some(ResumeFormat::Docx),
                "text/plain" => Some(ResumeFormat::PlainText),
                _ => None,
            }
        });

        by_type.or_else(|| {
            let extension = file_name?.rsplit_once('.')?.1.to_ascii_lowercase();
            match extension.as_str() {
                "pdf" => Some(ResumeFormat::Pdf),
                "docx" => Some(ResumeFormat::Docx),
                "txt" => Some(ResumeFormat::PlainText),
                _ => None,
            }
        })
    }
}

/// Extracts resume text in the given format.
pub fn read_resume(bytes: &[u8], format: ResumeFormat) -> Result<String, AppError> {
    match format {
        ResumeFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::ResumeParse(format!("Failed to read PDF resume: {e}"))),
        ResumeFormat::Docx => read_docx(bytes),
        ResumeFormat::PlainText => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}

fn read_docx(bytes: &[u8]) -> Result<String, AppError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AppError::ResumeParse(format!("Resume is not a valid DOCX archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| AppError::ResumeParse(format!("DOCX has no document body: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| AppError::ResumeParse(format!("Failed to read DOCX body: {e}")))?;

    Ok(document_xml_to_text(&xml))
}

/// One output line per `<w:p>` paragraph.
fn document_xml_to_text(xml: &str) -> String {
    let marked = xml
        .replace("</w:p>", "\n")
        .replace("<w:tab/>", "\t")
        .replace("<w:br/>", "\n");
    let stripped = XML_TAG_REGEX.replace_all(&marked, "");
    unescape_xml(&stripped).trim().to_string()
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
