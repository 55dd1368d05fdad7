use std::sync::Arc;

use crate::config::Config;
use crate::dispatch::MailTransport;
use crate::ingest::page_loader::PageLoader;
use crate::llm_client::CompletionService;
use crate::outreach::portfolio::Portfolio;
use crate::recruiter::ContactLookup;

/// Shared application state injected into all route handlers via Axum extractors.
/// External services sit behind traits so tests can swap in stubs.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn CompletionService>,
    pub pages: Arc<dyn PageLoader>,
    /// Recruiter email lookup. Without an API key every lookup resolves to "".
    pub contacts: Arc<dyn ContactLookup>,
    pub mailer: Arc<dyn MailTransport>,
    /// Loaded once at startup, read-only afterwards.
    pub portfolio: Arc<Portfolio>,
    pub config: Config,
}
