use tracing::{info, warn};

use crate::recruiter::{ContactLookup, LookupError};

/// Resolves a recruiter's email, or returns an empty string.
///
/// Never fails: lookup errors are logged and reported as "not found".
/// No caching and no retries; every call hits the service afresh.
pub async fn resolve_recruiter_email(
    lookup: &dyn ContactLookup,
    recruiter_name: &str,
    company_name: &str,
) -> String {
    match lookup_two_step(lookup, recruiter_name, company_name).await {
        Ok(Some(email)) => {
            info!("Resolved recruiter email for {company_name}");
            email
        }
        Ok(None) => {
            info!("No recruiter email found for {recruiter_name:?} at {company_name:?}");
            String::new()
        }
        Err(e) => {
            warn!("Error in recruiter email lookup: {e}");
            String::new()
        }
    }
}

async fn lookup_two_step(
    lookup: &dyn ContactLookup,
    recruiter_name: &str,
    company_name: &str,
) -> Result<Option<String>, LookupError> {
    let Some(domain) = lookup.domain_search(company_name).await? else {
        return Ok(None);
    };
    lookup.email_finder(recruiter_name, &domain).await
}
