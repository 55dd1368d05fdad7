//! Minimal WordprocessingML writer for the generated cover letter attachment.

use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::dispatch::DispatchError;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const COVER_LETTER_FILE_NAME: &str = "Cover_Letter.docx";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_HEAD: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;
const DOCUMENT_TAIL: &str = "</w:body></w:document>";

/// Serializes the letter as a `.docx`, one paragraph per line.
pub fn cover_letter_docx(text: &str) -> Result<Vec<u8>, DispatchError> {
    let mut document = String::from(DOCUMENT_HEAD);
    for line in text.lines() {
        document.push_str(r#"<w:p><w:r><w:t xml:space="preserve">"#);
        document.push_str(&escape_xml(line));
        document.push_str("</w:t></w:r></w:p>");
    }
    document.push_str(DOCUMENT_TAIL);

    write_package(&document).map_err(|e| DispatchError::Attachment(e.to_string()))
}

fn write_package(document_xml: &str) -> zip::result::ZipResult<Vec<u8>> {
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for (name, body) in [
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", RELS_XML),
        ("word/document.xml", document_xml),
    ] {
        zip.start_file(name, options)?;
        zip.write_all(body.as_bytes())?;
    }

    Ok(zip.finish()?.into_inner())
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_package_has_required_parts() {
        let bytes = cover_letter_docx("Hello").unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        for part in ["[Content_Types].xml", "_rels/.rels", "word/document.xml"] {
            assert!(archive.by_name(part).is_ok(), "missing {part}");
        }
    }

    #[test]
    fn test_lines_are_escaped_paragraphs() {
        let bytes = cover_letter_docx("A & B\n<C>").unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        assert_eq!(xml.matches("<w:p>").count(), 2);
        assert!(xml.contains("A &amp; B"));
        assert!(xml.contains("&lt;C&gt;"));
    }
}
