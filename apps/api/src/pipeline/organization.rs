//! Organization path: a careers page, pitched to from the sender persona.

use tracing::warn;

use crate::errors::{AppError, RunFailure};
use crate::extraction::job_extractor::extract_jobs;
use crate::ingest::normalizer::clean_text;
use crate::outreach::generator::write_org_email;
use crate::pipeline::{PipelinePath, PipelineRun};
use crate::recruiter::resolver::resolve_recruiter_email;
use crate::state::AppState;

pub async fn run_organization(state: &AppState, url: &str) -> Result<PipelineRun, RunFailure> {
    let mut run = PipelineRun::new(PipelinePath::Organization, url);
    let result = organization_stages(state, &mut run).await;
    run.finish(result)
}

async fn organization_stages(state: &AppState, run: &mut PipelineRun) -> Result<(), AppError> {
    if run.source_url.is_empty() {
        return Err(AppError::Validation(
            "Please enter the careers page URL.".to_string(),
        ));
    }

    run.log("Loading and cleaning organization's careers page.");
    let page = state.pages.load(&run.source_url).await?;
    let cleaned = clean_text(&page);

    run.log("Extracting job descriptions using LLM.");
    let jobs = extract_jobs(&cleaned, state.llm.as_ref()).await?;
    run.jobs = jobs.clone();

    // An empty careers page is a valid outcome, not a failure.
    let Some(job) = jobs.into_iter().next() else {
        warn!(run_id = %run.run_id, "No jobs extracted from {}", run.source_url);
        run.log("No jobs extracted.");
        return Ok(());
    };
    run.job = Some(job.clone());

    run.log("Querying portfolio for relevant links.");
    run.portfolio_links = state.portfolio.query_links(&job.skills);

    run.log("Generating cold email for organization.");
    run.artifacts.cold_email_text = write_org_email(
        &job,
        &run.portfolio_links,
        &state.config.sender,
        state.llm.as_ref(),
    )
    .await?;

    let recruiter_email =
        if job.recruiter_name.trim().is_empty() || job.company_name.trim().is_empty() {
            String::new()
        } else {
            run.log("Attempting to find recruiter email.");
            resolve_recruiter_email(
                state.contacts.as_ref(),
                &job.recruiter_name,
                &job.company_name,
            )
            .await
        };
    run.set_recruiter_email(recruiter_email);

    run.log("Organization email generated.");
    Ok(())
}
