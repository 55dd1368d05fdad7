// Prompt templates for structured job extraction.

/// Careers-page extraction. May yield several postings. Replace `{page_data}`.
pub const ORGANIZATION_EXTRACT_TEMPLATE: &str = r#"### SCRAPED TEXT FROM WEBSITE:
{page_data}
### INSTRUCTION:
The scraped text is from the career's page of a website.
Your job is to extract the job postings and return them in JSON format containing the
following keys: role, experience, skills, description, company name, recruiter_name.
Only return the valid JSON.
### VALID JSON (NO PREAMBLE):"#;

/// Single-posting extraction for job seekers. Replace `{page_data}` and `{json_only}`.
pub const INDIVIDUAL_EXTRACT_TEMPLATE: &str = r#"### SCRAPED TEXT FROM WEBSITE:
{page_data}
### INSTRUCTION:
Extract job details in valid JSON with the following snake_case keys:
- role
- experience
- skills
- description
- company_name
- recruiter_name
- recruiter_email

{json_only}"#;
