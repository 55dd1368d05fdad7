//! JobPosting: the structured record extracted from a scraped job page.
//!
//! Model output is loosely typed: fields go missing, come back `null`, or
//! arrive as the wrong JSON type. Every field is defaulted and coerced here,
//! at the extraction boundary, so downstream stages only see plain strings.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawJobPosting")]
pub struct JobPosting {
    pub role: String,
    pub experience: String,
    pub skills: Vec<String>,
    pub description: String,
    pub company_name: String,
    pub recruiter_name: String,
    /// Only requested on the individual path; empty when absent.
    pub recruiter_email: String,
}

/// Wire shape of a model-produced posting.
///
/// The organization prompt asks for "company name", the individual one for
/// `company_name`; completions sometimes carry both. Each key lands in its
/// own slot and the two are merged, snake_case first.
#[derive(Deserialize)]
struct RawJobPosting {
    #[serde(default, deserialize_with = "lenient_string")]
    role: String,
    #[serde(default, deserialize_with = "lenient_string")]
    experience: String,
    #[serde(default, deserialize_with = "lenient_list")]
    skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    company_name: String,
    #[serde(default, rename = "company name", deserialize_with = "lenient_string")]
    spaced_company_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    recruiter_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    recruiter_email: String,
}

impl From<RawJobPosting> for JobPosting {
    fn from(raw: RawJobPosting) -> Self {
        let company_name = if raw.company_name.is_empty() {
            raw.spaced_company_name
        } else {
            raw.company_name
        };
        Self {
            role: raw.role,
            experience: raw.experience,
            skills: raw.skills,
            description: raw.description,
            company_name,
            recruiter_name: raw.recruiter_name,
            recruiter_email: raw.recruiter_email,
        }
    }
}

impl JobPosting {
    /// First whitespace-separated token of the recruiter name, if any.
    pub fn recruiter_first_name(&self) -> Option<&str> {
        self.recruiter_name.split_whitespace().next()
    }
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .into_iter()
            .map(value_to_string)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_string(Value::deserialize(deserializer)?))
}

/// Accepts an array of tags or a single comma-separated string.
fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags = match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(items) => items.into_iter().map(value_to_string).collect(),
        Value::String(s) => s.split(',').map(|t| t.trim().to_string()).collect(),
        other => vec![value_to_string(other)],
    };
    Ok(tags.into_iter().filter(|t| !t.is_empty()).collect())
}
