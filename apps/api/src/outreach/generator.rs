//! Content Generator: drafts the cover letter and cold emails.
//!
//! Cover letter: raw trimmed completion, no shape validation.
//! Individual cold email: name inference → greeting → completion →
//! `finalize_cold_email`, so the signature is never model-written.
//! Organization email: persona-signed pitch listing matched portfolio links.

use tracing::info;

use crate::config::SenderProfile;
use crate::errors::AppError;
use crate::llm_client::prompts::{fill, NO_PREAMBLE_INSTRUCTION};
use crate::llm_client::{CompletionService, ModelTier};
use crate::models::applicant::ApplicantInfo;
use crate::models::job::JobPosting;
use crate::outreach::postprocess::{finalize_cold_email, infer_applicant_name, select_greeting};
use crate::outreach::prompts::{
    COLD_EMAIL_TEMPLATE, COVER_LETTER_TEMPLATE, ORGANIZATION_EMAIL_TEMPLATE,
};

pub async fn generate_cover_letter(
    job: &JobPosting,
    resume_text: &str,
    llm: &dyn CompletionService,
) -> Result<String, AppError> {
    let prompt = fill(
        COVER_LETTER_TEMPLATE,
        &[
            ("role", job.role.as_str()),
            ("company", job.company_name.as_str()),
            ("description", job.description.as_str()),
            ("resume_text", resume_text),
        ],
    );

    let letter = llm
        .complete(&prompt, ModelTier::Drafting)
        .await
        .map_err(|e| AppError::Llm(format!("Cover letter generation failed: {e}")))?;

    Ok(letter.trim().to_string())
}

/// Drafts the individual cold email.
///
/// Mutates `applicant.name` when the cover letter's first line looks like a
/// name (see `infer_applicant_name` for its false-positive risk).
pub async fn generate_cold_email(
    job: &JobPosting,
    applicant: &mut ApplicantInfo,
    cover_letter: &str,
    llm: &dyn CompletionService,
) -> Result<String, AppError> {
    if let Some(name) = infer_applicant_name(cover_letter) {
        info!("Inferred applicant name from cover letter: {name:?}");
        applicant.name = name.to_string();
    }

    let greeting = select_greeting(job);
    let job_json = job_json(job)?;
    let prompt = fill(
        COLD_EMAIL_TEMPLATE,
        &[
            ("role", job.role.as_str()),
            ("company", job.company_name.as_str()),
            ("greeting", greeting.as_str()),
            ("no_preamble", NO_PREAMBLE_INSTRUCTION),
            ("job_json", job_json.as_str()),
        ],
    );

    let raw = llm
        .complete(&prompt, ModelTier::Drafting)
        .await
        .map_err(|e| AppError::Llm(format!("Cold email generation failed: {e}")))?;

    Ok(finalize_cold_email(&raw, applicant))
}

/// Drafts the organization-path outreach email from the sender persona.
pub async fn write_org_email(
    job: &JobPosting,
    links: &[String],
    sender: &SenderProfile,
    llm: &dyn CompletionService,
) -> Result<String, AppError> {
    let link_list = if links.is_empty() {
        "(no matching portfolio links)".to_string()
    } else {
        links
            .iter()
            .map(|l| format!("- {l}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let job_json = job_json(job)?;

    let prompt = fill(
        ORGANIZATION_EMAIL_TEMPLATE,
        &[
            ("sender_name", sender.name.as_str()),
            ("sender_title", sender.title.as_str()),
            ("sender_company", sender.company.as_str()),
            ("sender_phone", sender.phone.as_str()),
            ("link_list", link_list.as_str()),
            ("job_json", job_json.as_str()),
        ],
    );

    let email = llm
        .complete(&prompt, ModelTier::Drafting)
        .await
        .map_err(|e| AppError::Llm(format!("Organization email generation failed: {e}")))?;

    Ok(email.trim().to_string())
}

fn job_json(job: &JobPosting) -> Result<String, AppError> {
    serde_json::to_string_pretty(job)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize JobPosting: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::outreach::postprocess::SIGNATURE_MARKER;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubLlm {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl StubLlm {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl CompletionService for StubLlm {
        async fn complete(&self, prompt: &str, tier: ModelTier) -> Result<String, LlmError> {
            assert_eq!(tier, ModelTier::Drafting);
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    struct FailingLlm;

    #[async_trait]
    impl CompletionService for FailingLlm {
        async fn complete(&self, _prompt: &str, _tier: ModelTier) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    fn job() -> JobPosting {
        JobPosting {
            role: "Software Engineer".into(),
            company_name: "Acme".into(),
            description: "Build {internal} tools".into(),
            skills: vec!["Python".into(), "SQL".into()],
            recruiter_name: "Dana Smith".into(),
            ..Default::default()
        }
    }

    fn sender() -> SenderProfile {
        SenderProfile {
            name: "Avery Quinn".into(),
            title: "Business Development Executive".into(),
            company: "InnovaEdge Technologies".into(),
            phone: "777-444-0000".into(),
        }
    }

    #[tokio::test]
    async fn test_cover_letter_is_trimmed_completion() {
        let llm = StubLlm::new("\n  Jordan Lee\n\nI am applying.  \n");
        let letter = generate_cover_letter(&job(), "resume body", &llm)
            .await
            .unwrap();
        assert_eq!(letter, "Jordan Lee\n\nI am applying.");

        let prompt = llm.last_prompt();
        assert!(prompt.contains("- Role: Software Engineer"));
        assert!(prompt.contains("- Company: Acme"));
        assert!(prompt.contains("Build {internal} tools"));
        assert!(prompt.contains("resume body"));
    }

    #[tokio::test]
    async fn test_placeholder_text_in_posting_is_not_expanded() {
        let llm = StubLlm::new("Letter");
        let posting = JobPosting {
            description: "Paste {resume_text} here".into(),
            ..job()
        };
        generate_cover_letter(&posting, "UNIQUE-RESUME-BODY", &llm)
            .await
            .unwrap();

        let prompt = llm.last_prompt();
        assert_eq!(prompt.matches("UNIQUE-RESUME-BODY").count(), 1);
        assert!(prompt.contains("Paste {resume_text} here"));
    }

    #[tokio::test]
    async fn test_cover_letter_is_deterministic_for_identical_input() {
        let llm = StubLlm::new("Jordan Lee\nLetter body");
        let first = generate_cover_letter(&job(), "resume", &llm).await.unwrap();
        let second = generate_cover_letter(&job(), "resume", &llm).await.unwrap();
        assert_eq!(first, second);
        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts[0], prompts[1]);
    }

    #[tokio::test]
    async fn test_cold_email_overwrites_name_and_signature() {
        let llm = StubLlm::new(
            "Hello Dana,\n\nI'd love to discuss the role.\n\nBest Regards,\n[Your Name]\n[Phone] | [Email]",
        );
        let mut applicant = ApplicantInfo {
            email: "jordan@example.com".into(),
            phone: "(206) 555-0147".into(),
            ..Default::default()
        };

        let email = generate_cold_email(&job(), &mut applicant, "Jordan Lee\nBody text", &llm)
            .await
            .unwrap();

        assert_eq!(applicant.name, "Jordan Lee");
        assert!(email.ends_with("Best Regards,\nJordan Lee\n(206) 555-0147 | jordan@example.com"));
        assert_eq!(email.matches(SIGNATURE_MARKER).count(), 1);
        assert!(!email.contains("[Your Name]"));

        let prompt = llm.last_prompt();
        assert!(prompt.contains("Start with \"Hello Dana,\""));
        assert!(prompt.contains("\"company_name\": \"Acme\""));
    }

    #[tokio::test]
    async fn test_cold_email_dear_hiring_manager_misfire() {
        let llm = StubLlm::new("To Whom It May Concern,\nHi.");
        let mut applicant = ApplicantInfo::default();
        let email = generate_cold_email(
            &JobPosting::default(),
            &mut applicant,
            "Dear Hiring Manager\nI am writing to apply.",
            &llm,
        )
        .await
        .unwrap();

        assert_eq!(applicant.name, "Dear Hiring Manager");
        assert!(email.contains("\nDear Hiring Manager\n"));
        assert!(llm.last_prompt().contains("Start with \"To Whom It May Concern,\""));
    }

    #[tokio::test]
    async fn test_cold_email_keeps_placeholder_name_when_not_inferred() {
        let llm = StubLlm::new("Hi");
        let mut applicant = ApplicantInfo::default();
        generate_cold_email(&job(), &mut applicant, "Dear Team,\nBody", &llm)
            .await
            .unwrap();
        assert_eq!(applicant.name, "Your Name");
    }

    #[tokio::test]
    async fn test_org_email_lists_links_and_persona() {
        let llm = StubLlm::new("  Dear Acme team,\n...\nWarm Regards,\nAvery Quinn  ");
        let links = vec![
            "https://example.com/python-portfolio".to_string(),
            "https://example.com/ml".to_string(),
        ];
        let email = write_org_email(&job(), &links, &sender(), &llm).await.unwrap();
        assert!(email.starts_with("Dear Acme team,"));

        let prompt = llm.last_prompt();
        assert!(prompt.contains("You are Avery Quinn, a Business Development Executive at InnovaEdge Technologies."));
        assert!(prompt.contains("- https://example.com/python-portfolio\n- https://example.com/ml"));
        assert!(prompt.contains("Phone: 777-444-0000"));
    }

    #[tokio::test]
    async fn test_completion_failure_is_llm_error() {
        let mut applicant = ApplicantInfo::default();
        let err = generate_cold_email(&job(), &mut applicant, "", &FailingLlm)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }
}
