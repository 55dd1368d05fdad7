// Shared prompt fragments.
// Each stage that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting instructions reused by those templates.

/// Trailing instruction for extraction prompts.
pub const JSON_ONLY_INSTRUCTION: &str = "Return ONLY valid JSON. No preambles, no markdown.";

/// Trailing instruction for drafting prompts.
pub const NO_PREAMBLE_INSTRUCTION: &str = "Only output the email, no explanations, no markdown formatting.\n\
    Do not provide a preamble.";

/// Fills `{key}` placeholders in a template in a single pass.
///
/// Substituted values are never rescanned, so a value that itself contains
/// `{key}` text is inserted verbatim. Unknown placeholders and literal braces
/// are left untouched.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substitution = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (close, *value))
        });
        match substitution {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_every_occurrence() {
        let out = fill("{a} and {a} then {b}", &[("a", "x"), ("b", "y")]);
        assert_eq!(out, "x and x then y");
    }

    #[test]
    fn test_fill_leaves_unknown_placeholders() {
        assert_eq!(fill("{missing}", &[("a", "x")]), "{missing}");
    }

    #[test]
    fn test_fill_does_not_expand_placeholders_inside_values() {
        let out = fill(
            "Job: {description}\nResume: {resume_text}",
            &[("description", "see {resume_text}"), ("resume_text", "R")],
        );
        assert_eq!(out, "Job: see {resume_text}\nResume: R");
    }

    #[test]
    fn test_fill_keeps_literal_json_braces() {
        let out = fill(r#"Example: {"role": "x"} for {name}"#, &[("name", "Acme")]);
        assert_eq!(out, r#"Example: {"role": "x"} for Acme"#);
    }
}
