//! Individual path: one job posting URL plus the applicant's resume.

use crate::errors::{AppError, RunFailure};
use crate::extraction::contact::extract_contact;
use crate::extraction::job_extractor::extract_job_info;
use crate::ingest::normalizer::clean_text;
use crate::ingest::resume_reader::{read_resume, ResumeFormat};
use crate::outreach::generator::{generate_cold_email, generate_cover_letter};
use crate::pipeline::{PipelinePath, PipelineRun};
use crate::recruiter::resolver::resolve_recruiter_email;
use crate::state::AppState;

/// An uploaded resume file as received from the client.
#[derive(Debug, Clone, Default)]
pub struct ResumeUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

pub async fn run_individual(
    state: &AppState,
    job_url: &str,
    resume: &ResumeUpload,
) -> Result<PipelineRun, RunFailure> {
    let mut run = PipelineRun::new(PipelinePath::Individual, job_url);
    let result = individual_stages(state, &mut run, resume).await;
    run.finish(result)
}

async fn individual_stages(
    state: &AppState,
    run: &mut PipelineRun,
    resume: &ResumeUpload,
) -> Result<(), AppError> {
    if run.source_url.is_empty() {
        return Err(AppError::Validation("Please enter a job URL.".to_string()));
    }
    if resume.bytes.is_empty() {
        return Err(AppError::Validation("Please upload your resume.".to_string()));
    }
    let format = ResumeFormat::detect(resume.content_type.as_deref(), resume.file_name.as_deref())
        .ok_or_else(|| {
            AppError::Validation(
                "Unsupported resume format; upload a .pdf, .docx or .txt file.".to_string(),
            )
        })?;

    run.log("Loading and cleaning job page.");
    let page = state.pages.load(&run.source_url).await?;
    let cleaned = clean_text(&page);

    run.log("Extracting job information using LLM.");
    let job = extract_job_info(&cleaned, state.llm.as_ref()).await?;
    run.job = Some(job.clone());
    run.jobs = vec![job.clone()];

    run.log("Extracting applicant information from resume.");
    let resume_text = read_resume(&resume.bytes, format)?;
    let mut applicant = extract_contact(&resume_text);
    run.applicant = Some(applicant.clone());

    let recruiter_email = if job.recruiter_email.trim().is_empty() {
        run.log("Primary recruiter email not found, attempting fallback lookup.");
        resolve_recruiter_email(
            state.contacts.as_ref(),
            &job.recruiter_name,
            &job.company_name,
        )
        .await
    } else {
        job.recruiter_email.trim().to_string()
    };
    run.set_recruiter_email(recruiter_email);

    run.log("Generating cover letter.");
    let cover_letter = generate_cover_letter(&job, &resume_text, state.llm.as_ref()).await?;
    run.artifacts.cover_letter_text = cover_letter.clone();

    run.log("Generating cold email.");
    let cold_email =
        generate_cold_email(&job, &mut applicant, &cover_letter, state.llm.as_ref()).await?;
    run.applicant = Some(applicant);
    run.artifacts.cold_email_text = cold_email;

    run.log("Cover letter and cold email generated.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outreach::portfolio::Portfolio;
    use crate::pipeline::testing::{test_state, StubLookup};
    use crate::pipeline::FALLBACK_RECIPIENT;

    const POSTING_HTML: &str = "<html><body><h1>Software Engineer</h1>\
        <p>Acme is hiring. Contact Dana Smith.</p></body></html>";

    const RESUME: &str = "Jordan Lee\njordan.lee@example.com\n(206) 555-0147\n\
        https://www.linkedin.com/in/jordanlee\nPython, SQL";

    const JOB_WITH_EMAIL: &str = r#"Here you go: {"role": "Software Engineer", "experience": "3+ years",
        "skills": ["Python", "SQL"], "description": "Build internal tools",
        "company_name": "Acme", "recruiter_name": "Dana Smith", "recruiter_email": "dana@acme.com"}"#;

    const JOB_WITHOUT_EMAIL: &str = r#"{"role": "Software Engineer", "skills": "Python, SQL",
        "description": "Build internal tools", "company_name": "Acme",
        "recruiter_name": "Dana Smith", "recruiter_email": ""}"#;

    const COVER_LETTER: &str = "Jordan Lee\n\nDear Dana,\nI am excited to apply.";
    const COLD_EMAIL: &str = "Hello Dana,\n\nHere is the cover letter you requested.\n\
        I'd welcome a chat.\n\nBest Regards,\n[Your Name]";

    fn resume_upload() -> ResumeUpload {
        ResumeUpload {
            file_name: Some("resume.txt".into()),
            content_type: Some("text/plain".into()),
            bytes: RESUME.as_bytes().to_vec(),
        }
    }

    #[tokio::test]
    async fn test_full_run_uses_posting_recruiter_email() {
        let (state, deps) = test_state(
            Ok(POSTING_HTML),
            &[JOB_WITH_EMAIL, COVER_LETTER, COLD_EMAIL],
            StubLookup::default(),
            Portfolio::default(),
        );

        let run = run_individual(&state, "https://jobs.acme.example/123", &resume_upload())
            .await
            .unwrap();

        assert_eq!(run.recruiter_email, "dana@acme.com");
        assert_eq!(run.suggested_recipient, "dana@acme.com");
        assert!(deps.lookup.calls.lock().unwrap().is_empty());

        let applicant = run.applicant.as_ref().unwrap();
        assert_eq!(applicant.name, "Jordan Lee");
        assert_eq!(applicant.email, "jordan.lee@example.com");

        assert_eq!(run.artifacts.cover_letter_text, COVER_LETTER);
        let email = &run.artifacts.cold_email_text;
        assert!(email.starts_with("Hello Dana,"));
        assert!(!email.contains("Here is the cover letter"));
        assert!(email.ends_with("Best Regards,\nJordan Lee\n(206) 555-0147 | jordan.lee@example.com"));

        assert_eq!(run.action_log[0], "Loading and cleaning job page.");
        assert_eq!(deps.llm.prompts.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_missing_posting_email_falls_back_to_lookup() {
        let lookup = StubLookup {
            domain: Some("acme.com".into()),
            email: Some("dana.smith@acme.com".into()),
            ..Default::default()
        };
        let (state, deps) = test_state(
            Ok(POSTING_HTML),
            &[JOB_WITHOUT_EMAIL, COVER_LETTER, COLD_EMAIL],
            lookup,
            Portfolio::default(),
        );

        let run = run_individual(&state, "https://jobs.acme.example/123", &resume_upload())
            .await
            .unwrap();

        assert_eq!(run.recruiter_email, "dana.smith@acme.com");
        assert_eq!(deps.lookup.calls.lock().unwrap().len(), 2);
        assert!(run
            .action_log
            .iter()
            .any(|e| e.starts_with("Primary recruiter email not found")));
        assert_eq!(run.job.as_ref().unwrap().skills, vec!["Python", "SQL"]);
    }

    #[tokio::test]
    async fn test_unresolved_recruiter_suggests_placeholder() {
        let (state, _deps) = test_state(
            Ok(POSTING_HTML),
            &[JOB_WITHOUT_EMAIL, COVER_LETTER, COLD_EMAIL],
            StubLookup::default(),
            Portfolio::default(),
        );

        let run = run_individual(&state, "https://jobs.acme.example/123", &resume_upload())
            .await
            .unwrap();

        assert_eq!(run.recruiter_email, "");
        assert_eq!(run.suggested_recipient, FALLBACK_RECIPIENT);
        assert!(!run.artifacts.cold_email_text.is_empty());
    }

    #[tokio::test]
    async fn test_extraction_failure_returns_partial_run() {
        let (state, deps) = test_state(
            Ok(POSTING_HTML),
            &["I could not find a job on that page."],
            StubLookup::default(),
            Portfolio::default(),
        );

        let failure = run_individual(&state, "https://jobs.acme.example/123", &resume_upload())
            .await
            .unwrap_err();

        assert!(matches!(failure.error, AppError::ExtractionFailed { .. }));
        assert!(failure.run.job.is_none());
        assert!(failure.run.artifacts.cover_letter_text.is_empty());
        assert_eq!(failure.run.action_log.len(), 3);
        assert_eq!(deps.llm.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_page_load_failure_stops_before_llm() {
        let (state, deps) = test_state(
            Err("HTTP 404 from https://jobs.acme.example/gone"),
            &[],
            StubLookup::default(),
            Portfolio::default(),
        );

        let failure = run_individual(&state, "https://jobs.acme.example/gone", &resume_upload())
            .await
            .unwrap_err();

        assert!(matches!(failure.error, AppError::PageLoad(_)));
        assert!(deps.llm.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_resume_is_rejected_up_front() {
        let (state, deps) = test_state(Ok(POSTING_HTML), &[], StubLookup::default(), Portfolio::default());
        let resume = ResumeUpload {
            file_name: Some("resume.odt".into()),
            content_type: Some("application/vnd.oasis.opendocument.text".into()),
            bytes: b"binary".to_vec(),
        };

        let failure = run_individual(&state, "https://jobs.acme.example/123", &resume)
            .await
            .unwrap_err();

        assert!(matches!(failure.error, AppError::Validation(_)));
        assert!(failure.run.action_log.iter().all(|e| e.starts_with("Error: ")));
        assert!(deps.llm.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_url_is_validation_error() {
        let (state, _deps) = test_state(Ok(POSTING_HTML), &[], StubLookup::default(), Portfolio::default());
        let failure = run_individual(&state, "   ", &resume_upload()).await.unwrap_err();
        assert!(matches!(failure.error, AppError::Validation(_)));
    }
}
