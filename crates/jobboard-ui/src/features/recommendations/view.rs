//! Recommended postings for the signed-in developer.

use crate::app::api::ApiCtx;
use crate::components::empty_state::EmptyState;
use crate::components::job_card::JobCard;
use crate::features::recommendations::state::RecommendationsState;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(RecommendationsPanel)]
pub(crate) fn recommendations_panel() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let state = use_state(RecommendationsState::default);
    let attempt = use_state(|| 0_u32);

    {
        let state = state.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(api_ctx) = api_ctx {
                    let mut next = (*state).clone();
                    next.start();
                    state.set(next.clone());
                    yew::platform::spawn_local(async move {
                        let result = api_ctx.client.fetch_recommendations().await;
                        let expired = next.finish(result);
                        state.set(next);
                        if let Some(err) = expired {
                            api_ctx.intercept(&err, navigator.as_ref());
                        }
                    });
                }
                || ()
            },
            *attempt,
        );
    }

    let on_retry = {
        let attempt = attempt.clone();
        Callback::from(move |_: MouseEvent| attempt.set(*attempt + 1))
    };

    let body = if state.loading {
        html! { <div class="loading">{"Loading recommendations..."}</div> }
    } else if let Some(message) = state.error.clone() {
        html! {
            <EmptyState title={AttrValue::from(message)}>
                <button class="ghost" onclick={on_retry}>{"Try again"}</button>
            </EmptyState>
        }
    } else if state.is_empty() {
        html! {
            <EmptyState
                title="No recommendations yet"
                description={AttrValue::from("Upload a resume and apply to jobs to get personalized matches.")}
            />
        }
    } else {
        html! {
            <div class="job-grid">
                {for state.jobs.iter().map(|job| html! { <JobCard job={job.clone()} /> })}
            </div>
        }
    };

    html! {
        <section class="recommendations">
            <h2>{"Recommended for you"}</h2>
            {body}
        </section>
    }
}
