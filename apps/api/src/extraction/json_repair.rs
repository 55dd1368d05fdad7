//! Locating JSON inside free-form completion text.
//!
//! Models wrap JSON in code fences or in prose ("Sure! {...} Hope this helps!")
//! despite instructions. These helpers find the JSON payload; decoding and
//! schema coercion stay with the caller.

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Returns the body of the first fenced code block anywhere in the text.
pub fn find_fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after = &text[start + 3..];
    let after = after.strip_prefix("json").unwrap_or(after);
    let end = after.find("```")?;
    Some(after[..end].trim())
}

/// Returns the earliest `{...}` span whose braces balance.
///
/// Braces inside JSON string literals (including escaped quotes) are not
/// counted. A `{` that never closes is skipped and the scan resumes at the
/// next `{`.
pub fn first_balanced_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut search_from = 0;

    while let Some(offset) = text[search_from..].find('{') {
        let start = search_from + offset;
        if let Some(end) = balanced_end(bytes, start) {
            return Some(&text[start..=end]);
        }
        search_from = start + 1;
    }

    None
}

/// Index of the `}` closing the `{` at `start`, if it exists.
fn balanced_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}

/// Closes a JSON document that was cut off mid-stream.
///
/// Scans from the first `[` or `{`, remembering the last point where every
/// element so far was complete (after a closing bracket, before a comma, or
/// after a string inside an array). The text is cut there and the still-open
/// brackets are closed in reverse order. A dangling key, half-written value
/// or trailing comma is dropped with the cut. Returns `None` when no such
/// point exists or the brackets are mismatched.
pub fn close_truncated_json(text: &str) -> Option<String> {
    let start = text.find(['[', '{'])?;
    let body = &text[start..];

    let mut closers: Vec<char> = Vec::new();
    let mut checkpoint: Option<(usize, Vec<char>)> = None;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in body.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => {
                    in_string = false;
                    if closers.last() == Some(&']') {
                        checkpoint = Some((i + 1, closers.clone()));
                    }
                }
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => closers.push('}'),
            '[' => closers.push(']'),
            '}' | ']' => {
                if closers.pop() != Some(c) {
                    return None;
                }
                if closers.is_empty() {
                    return Some(body[..=i].to_string());
                }
                checkpoint = Some((i + 1, closers.clone()));
            }
            ',' => checkpoint = Some((i, closers.clone())),
            _ => {}
        }
    }

    let (cut, open) = checkpoint?;
    let mut closed = body[..cut].trim_end().to_string();
    closed.extend(open.iter().rev());
    Some(closed)
}
