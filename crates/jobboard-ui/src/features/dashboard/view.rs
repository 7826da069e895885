//! Dashboard page: stats, role tabs and the panels behind them.
//!
//! # Design
//! - The dashboard owns the fetched applications and postings; panels derive from them.
//! - Stats are recomputed from the same data the panels show.

use crate::app::api::ApiCtx;
use crate::core::store::AppStore;
use crate::features::applications::view::ApplicationsPanel;
use crate::features::dashboard::logic::{DashboardTab, dashboard_stats, tabs_for};
use crate::features::postings::logic::owned_active_jobs;
use crate::features::postings::view::MyJobsPanel;
use crate::features::resume::view::{ResumeBuilderPanel, ResumePanel};
use gloo::console;
use jobboard_api_models::{Application, JobPosting, Role};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

#[function_component(DashboardPage)]
pub(crate) fn dashboard_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let viewer = use_selector(|store: &AppStore| store.session.identity().cloned());
    let applications = use_state(Vec::<Application>::new);
    let jobs = use_state(Vec::<JobPosting>::new);
    let loading = use_state(|| true);
    let tab = use_state(DashboardTab::default);
    let reload = use_state(|| 0_u32);
    let role = (*viewer).as_ref().map(|identity| identity.role);

    {
        let applications = applications.clone();
        let jobs = jobs.clone();
        let loading = loading.clone();
        use_effect_with_deps(
            move |(role, _): &(Option<Role>, u32)| {
                if let (Some(api_ctx), Some(role)) = (api_ctx, *role) {
                    yew::platform::spawn_local(async move {
                        match api_ctx.client.fetch_applications().await {
                            Ok(items) => applications.set(items),
                            Err(err) => {
                                console::error!(format!("applications failed to load: {err}"));
                                api_ctx.intercept(&err, navigator.as_ref());
                            }
                        }
                        if role != Role::Developer {
                            match api_ctx.client.fetch_all_jobs().await {
                                Ok(items) => jobs.set(items),
                                Err(err) => {
                                    console::error!(format!("postings failed to load: {err}"));
                                    api_ctx.intercept(&err, navigator.as_ref());
                                }
                            }
                        }
                        loading.set(false);
                    });
                }
                || ()
            },
            (role, *reload),
        );
    }

    let Some(identity) = (*viewer).clone() else {
        return html! { <div class="loading">{"Loading..."}</div> };
    };
    let role = identity.role;
    let active_jobs = owned_active_jobs(&jobs, &identity).len();
    let stats = dashboard_stats(role, &applications, active_jobs);
    let tabs = tabs_for(role);
    let current_tab = if tabs.contains(&*tab) { *tab } else { DashboardTab::Applications };

    let on_updated = {
        let applications = applications.clone();
        Callback::from(move |updated: Application| {
            let mut next = (*applications).clone();
            if let Some(slot) = next.iter_mut().find(|item| item.id == updated.id) {
                *slot = updated;
                applications.set(next);
            }
        })
    };
    let on_changed = {
        let reload = reload.clone();
        Callback::from(move |()| reload.set(*reload + 1))
    };

    let tab_buttons = tabs.iter().map(|candidate| {
        let candidate = *candidate;
        let tab = tab.clone();
        html! {
            <button
                class={classes!("tab", (candidate == current_tab).then_some("active"))}
                onclick={Callback::from(move |_: MouseEvent| tab.set(candidate))}
            >{candidate.label(role)}</button>
        }
    });
    let panel = if *loading {
        html! { <div class="loading">{"Loading dashboard..."}</div> }
    } else {
        match current_tab {
            DashboardTab::Applications => html! {
                <ApplicationsPanel role={role} applications={(*applications).clone()} on_updated={on_updated} />
            },
            DashboardTab::MyJobs => html! {
                <MyJobsPanel viewer={identity.clone()} jobs={(*jobs).clone()} on_changed={on_changed} />
            },
            DashboardTab::ResumeBuilder => html! {
                <ResumeBuilderPanel identity={identity.clone()} />
            },
        }
    };

    html! {
        <section class="dashboard">
            <header>
                <h1>{format!("Welcome back, {}", identity.display_name())}</h1>
            </header>
            <div class="stats">
                {for stats.iter().map(|card| html! {
                    <div class="stat-card">
                        <strong>{card.value}</strong>
                        <span>{card.label}</span>
                    </div>
                })}
            </div>
            if role == Role::Developer {
                <ResumePanel identity={identity.clone()} />
            }
            <nav class="tabs">{for tab_buttons}</nav>
            {panel}
        </section>
    }
}
