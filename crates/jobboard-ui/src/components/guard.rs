//! Route guard wrapping pages that need a session.
//!
//! # Design
//! - Decisions come from `features::auth::logic`; this only notifies and redirects.
//! - Nothing renders until boot-time restoration has finished.

use crate::app::api::ApiCtx;
use crate::app::routes::Route;
use crate::core::store::AppStore;
use crate::features::auth::logic::{GuardOutcome, guard, guard_any};
use crate::models::Notice;
use jobboard_api_models::Role;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub(crate) struct RequireSessionProps {
    /// Single role the page needs.
    #[prop_or_default]
    pub role: Option<Role>,
    /// Any of these roles is accepted; overrides `role` when non-empty.
    #[prop_or_default]
    pub any_of: Vec<Role>,
    /// Replaces the wrong-role message.
    #[prop_or_default]
    pub denied: Option<AttrValue>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(RequireSession)]
pub(crate) fn require_session(props: &RequireSessionProps) -> Html {
    let session = use_selector(|store: &AppStore| store.session.clone());
    let outcome = if props.any_of.is_empty() {
        guard(&session, props.role)
    } else {
        guard_any(&session, &props.any_of)
    };
    let outcome = match (outcome, props.denied.as_ref()) {
        (GuardOutcome::ToDashboard(_), Some(denied)) => GuardOutcome::ToDashboard(denied.to_string()),
        (outcome, _) => outcome,
    };
    let api = use_context::<ApiCtx>();
    let navigator = use_navigator();
    {
        let outcome = outcome.clone();
        use_effect_with_deps(
            move |outcome: &GuardOutcome| {
                let target = match outcome {
                    GuardOutcome::ToLogin(message) => Some((message.clone(), Route::Login)),
                    GuardOutcome::ToDashboard(message) => {
                        Some((message.clone(), Route::Dashboard))
                    }
                    GuardOutcome::Pending | GuardOutcome::Allow => None,
                };
                if let Some((message, route)) = target {
                    if let Some(api) = api {
                        api.notify(Notice::error(message));
                    }
                    if let Some(navigator) = navigator {
                        navigator.replace(&route);
                    }
                }
                || ()
            },
            outcome,
        );
    }

    match outcome {
        GuardOutcome::Allow => html! { <>{ for props.children.iter() }</> },
        _ => html! { <div class="loading">{"Loading..."}</div> },
    }
}
