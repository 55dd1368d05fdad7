//! Text Normalizer: strips markup residue and excess whitespace from page text.
//! Total: any input produces some (possibly empty) output.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TAG_REGEX: Regex = Regex::new(r"<[^>]*?>").unwrap();
    static ref URL_REGEX: Regex = Regex::new(r"https?://\S+").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// Removes leftover tags, URLs and control characters, then collapses whitespace.
/// Punctuation is kept so addresses like `jobs@acme.com` survive into extraction.
pub fn clean_text(raw: &str) -> String {
    let text = TAG_REGEX.replace_all(raw, " ");
    let text = URL_REGEX.replace_all(&text, " ");
    let text: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    WHITESPACE_REGEX.replace_all(&text, " ").trim().to_string()
}
