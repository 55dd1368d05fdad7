//! Pipeline runs: the explicit context threaded through every stage.
//!
//! Flow (individual):   load page → clean → extract → read resume →
//!                      contact info → recruiter email → cover letter → cold email
//! Flow (organization): load page → clean → extract jobs → portfolio links →
//!                      outreach email → recruiter email
//!
//! Stages run strictly in sequence. The first failing stage stops the run and
//! the context built so far is handed back with the error.

pub mod handlers;
pub mod individual;
pub mod organization;
pub mod send;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, RunFailure};
use crate::models::applicant::ApplicantInfo;
use crate::models::artifacts::GeneratedArtifacts;
use crate::models::job::JobPosting;

/// Offered as the recipient when no recruiter address was found.
pub const FALLBACK_RECIPIENT: &str = "hr@company.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelinePath {
    Individual,
    Organization,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineRun {
    pub run_id: Uuid,
    pub path: PipelinePath,
    pub started_at: DateTime<Utc>,
    pub source_url: String,
    /// The posting the drafts were written for.
    pub job: Option<JobPosting>,
    /// Every posting extracted (organization path may yield several).
    pub jobs: Vec<JobPosting>,
    pub applicant: Option<ApplicantInfo>,
    /// Empty when unresolved.
    pub recruiter_email: String,
    pub suggested_recipient: String,
    pub portfolio_links: Vec<String>,
    pub artifacts: GeneratedArtifacts,
    pub action_log: Vec<String>,
}

impl PipelineRun {
    pub fn new(path: PipelinePath, source_url: &str) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            path,
            started_at: Utc::now(),
            source_url: source_url.trim().to_string(),
            job: None,
            jobs: Vec::new(),
            applicant: None,
            recruiter_email: String::new(),
            suggested_recipient: String::new(),
            portfolio_links: Vec::new(),
            artifacts: GeneratedArtifacts::default(),
            action_log: Vec::new(),
        }
    }

    /// Appends to the operator-facing trail and the service log.
    pub fn log(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        info!(run_id = %self.run_id, "{entry}");
        self.action_log.push(entry);
    }

    pub fn set_recruiter_email(&mut self, email: String) {
        self.suggested_recipient = if email.is_empty() {
            FALLBACK_RECIPIENT.to_string()
        } else {
            email.clone()
        };
        self.recruiter_email = email;
    }

    /// Closes the run on `result`, attaching the partial context to any error.
    fn finish(self, result: Result<(), AppError>) -> Result<PipelineRun, RunFailure> {
        match result {
            Ok(()) => Ok(self),
            Err(error) => Err(self.fail(error)),
        }
    }

    fn fail(mut self, error: AppError) -> RunFailure {
        self.log(format!("Error: {error}"));
        RunFailure {
            run: Box::new(self),
            error,
        }
    }
}

#[cfg(test)]
pub mod testing {
    //! Stub collaborators shared by pipeline and route tests.

    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use lettre::Message;

    use crate::config::{Config, SenderProfile};
    use crate::dispatch::{DeliveryReceipt, DispatchError, MailTransport};
    use crate::errors::AppError;
    use crate::ingest::page_loader::PageLoader;
    use crate::llm_client::{CompletionService, LlmError, ModelTier};
    use crate::outreach::portfolio::Portfolio;
    use crate::recruiter::{ContactLookup, LookupError};
    use crate::state::AppState;

    /// Replies in order; errors once the script runs out.
    #[derive(Default)]
    pub struct ScriptedLlm {
        replies: Mutex<VecDeque<String>>,
        pub prompts: Mutex<Vec<(String, ModelTier)>>,
    }

    impl ScriptedLlm {
        pub fn new(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionService for ScriptedLlm {
        async fn complete(&self, prompt: &str, tier: ModelTier) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push((prompt.to_string(), tier));
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or(LlmError::EmptyContent)
        }
    }

    pub struct StaticPage(pub Result<String, String>);

    #[async_trait]
    impl PageLoader for StaticPage {
        async fn load(&self, _url: &str) -> Result<String, AppError> {
            self.0.clone().map_err(AppError::PageLoad)
        }
    }

    #[derive(Default)]
    pub struct StubLookup {
        pub domain: Option<String>,
        pub email: Option<String>,
        pub calls: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl ContactLookup for StubLookup {
        async fn domain_search(&self, company: &str) -> Result<Option<String>, LookupError> {
            self.calls
                .lock()
                .unwrap()
                .push(("domain-search".into(), company.into()));
            Ok(self.domain.clone())
        }

        async fn email_finder(
            &self,
            full_name: &str,
            _domain: &str,
        ) -> Result<Option<String>, LookupError> {
            self.calls
                .lock()
                .unwrap()
                .push(("email-finder".into(), full_name.into()));
            Ok(self.email.clone())
        }
    }

    /// Captures messages instead of sending them.
    #[derive(Default)]
    pub struct RecordingMailer {
        pub sent: Mutex<Vec<String>>,
        pub fail_with: Option<String>,
    }

    #[async_trait]
    impl MailTransport for RecordingMailer {
        async fn send(&self, message: Message) -> Result<DeliveryReceipt, DispatchError> {
            if let Some(reason) = &self.fail_with {
                return Err(DispatchError::Transport(reason.clone()));
            }
            self.sent
                .lock()
                .unwrap()
                .push(String::from_utf8_lossy(&message.formatted()).into_owned());
            Ok(DeliveryReceipt {
                code: "250".into(),
                message: "2.0.0 OK".into(),
            })
        }
    }

    pub fn test_config() -> Config {
        Config {
            groq_api_key: "test-key".into(),
            llm_api_url: "http://localhost/unused".into(),
            hunter_api_key: None,
            portfolio_csv: "unused.csv".into(),
            smtp_host: "localhost".into(),
            smtp_port: 2525,
            mailbox_user: None,
            mailbox_oauth_token: None,
            sender: SenderProfile {
                name: "Avery Quinn".into(),
                title: "Business Development Executive".into(),
                company: "InnovaEdge Technologies".into(),
                phone: "777-444-0000".into(),
            },
            port: 0,
            rust_log: "debug".into(),
        }
    }

    pub struct TestDeps {
        pub llm: Arc<ScriptedLlm>,
        pub lookup: Arc<StubLookup>,
        pub mailer: Arc<RecordingMailer>,
    }

    pub fn test_state(
        page: Result<&str, &str>,
        replies: &[&str],
        lookup: StubLookup,
        portfolio: Portfolio,
    ) -> (AppState, TestDeps) {
        let deps = TestDeps {
            llm: Arc::new(ScriptedLlm::new(replies)),
            lookup: Arc::new(lookup),
            mailer: Arc::new(RecordingMailer::default()),
        };
        let state = AppState {
            llm: deps.llm.clone(),
            pages: Arc::new(StaticPage(
                page.map(str::to_string).map_err(str::to_string),
            )),
            contacts: deps.lookup.clone(),
            mailer: deps.mailer.clone(),
            portfolio: Arc::new(portfolio),
            config: test_config(),
        };
        (state, deps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_recruiter_suggests_fallback() {
        let mut run = PipelineRun::new(PipelinePath::Individual, " https://jobs.example/1 ");
        run.set_recruiter_email(String::new());
        assert_eq!(run.recruiter_email, "");
        assert_eq!(run.suggested_recipient, FALLBACK_RECIPIENT);
        assert_eq!(run.source_url, "https://jobs.example/1");
    }

    #[test]
    fn test_resolved_recruiter_is_suggested() {
        let mut run = PipelineRun::new(PipelinePath::Organization, "u");
        run.set_recruiter_email("dana@acme.com".into());
        assert_eq!(run.suggested_recipient, "dana@acme.com");
    }

    #[test]
    fn test_finish_with_error_keeps_partial_run() {
        let mut run = PipelineRun::new(PipelinePath::Individual, "u");
        run.log("Loading and cleaning job page.");
        let failure = run
            .finish(Err(AppError::PageLoad("timeout".into())))
            .unwrap_err();
        assert_eq!(failure.run.action_log.len(), 2);
        assert!(failure.run.action_log[1].starts_with("Error: "));
        assert!(matches!(failure.error, AppError::PageLoad(_)));
    }
}
