//! Posting summary card used by the job list, home page and recommendations.

use crate::app::routes::Route;
use crate::core::logic::{
    application_count_label, format_salary, is_new_posting, plain_text_preview,
};
use chrono::Utc;
use jobboard_api_models::JobPosting;
use yew::prelude::*;
use yew_router::prelude::Link;

/// Characters of description shown on a card.
const PREVIEW_CHARS: usize = 120;

#[derive(Properties, PartialEq)]
pub(crate) struct JobCardProps {
    pub job: JobPosting,
    #[prop_or_default]
    pub show_applications: bool,
}

#[function_component(JobCard)]
pub(crate) fn job_card(props: &JobCardProps) -> Html {
    let job = &props.job;
    let fresh = is_new_posting(job.created_at, Utc::now());
    html! {
        <article class="job-card">
            <header>
                <h3>
                    <Link<Route> to={Route::JobDetail { id: job.id }}>{job.title.clone()}</Link<Route>>
                </h3>
                if fresh {
                    <span class="badge new">{"New"}</span>
                }
                if job.is_recommended {
                    <span class="badge recommended">{"Recommended"}</span>
                }
            </header>
            {job.company().map(|company| html! { <p class="company">{company.to_string()}</p> }).unwrap_or_default()}
            <p class="meta">
                <span class="location">{job.location.clone()}</span>
                {job.salary.map(|salary| html! { <span class="salary">{format_salary(salary)}</span> }).unwrap_or_default()}
            </p>
            <p class="preview">{plain_text_preview(&job.description, PREVIEW_CHARS)}</p>
            <footer>
                <span class="muted">{job.created_at.format("%b %-d, %Y").to_string()}</span>
                if props.show_applications {
                    <span class="muted">{application_count_label(job.application_count)}</span>
                }
            </footer>
        </article>
    }
}
