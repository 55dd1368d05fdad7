// Prompt templates for outreach drafting.

/// Cover letter. Replace: {role}, {company}, {description}, {resume_text}
pub const COVER_LETTER_TEMPLATE: &str = r#"You are helping write a professional cover letter.

Write a confident cover letter for:
- Role: {role}
- Company: {company}
- Description: {description}

Resume:
-------------------------------
{resume_text}
-------------------------------

### INSTRUCTIONS (STRICT):
- Start the cover letter with the applicant's full name
- Do **not** include any heading like "Generated Cover Letter" or "Cover Letter:"
- Do **not** include preambles, explanations, or markdown
- The letter must be formal, focused, and personalized
- Do **NOT** use placeholder text like "[Your Name]" or "[Current Date]"
- Only output the final formatted cover letter body starting with the applicant's name

Output ONLY the cover letter body. No text heading, No Preambles.
### COVER LETTER BODY (NO PREAMBLE, NO HEADING):"#;

/// Individual cold email. Replace: {job_json}, {role}, {company}, {greeting}, {no_preamble}
pub const COLD_EMAIL_TEMPLATE: &str = r#"### JOB DESCRIPTION:
{job_json}

### INSTRUCTION:
You are writing a cold outreach email for the {role} role at {company}.

- Start with "{greeting}"
- Maintain a professional and warm tone
- End with:

Best Regards,
[Your Name]
[Phone] | [Email]

{no_preamble}
### EMAIL (NO PREAMBLE):"#;

/// Organization outreach email.
/// Replace: {job_json}, {sender_name}, {sender_title}, {sender_company}, {sender_phone}, {link_list}
pub const ORGANIZATION_EMAIL_TEMPLATE: &str = r#"### JOB DESCRIPTION:
{job_json}

### INSTRUCTION:
You are {sender_name}, a {sender_title} at {sender_company}.
Craft a cold outreach email highlighting how {sender_company}'s experience and portfolio can help the client.
Include the following portfolio links:
{link_list}

Tone: Professional, confident, outcome-driven.

End the email with:
Warm Regards,
{sender_name}
{sender_title}, {sender_company}
Phone: {sender_phone}

Output ONLY the email body (no explanations)."#;
