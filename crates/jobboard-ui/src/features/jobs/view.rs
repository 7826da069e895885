//! Job list and job detail pages.
//!
//! # Design
//! - List state sits in a `RefCell` so async completions see the latest sequence number.
//! - The debounce timer only wakes the state; the state decides whether to fetch.

use crate::app::api::ApiCtx;
use crate::app::now_ms;
use crate::app::routes::Route;
use crate::config::UiConfig;
use crate::components::empty_state::EmptyState;
use crate::components::job_card::JobCard;
use crate::components::pagination::Pagination;
use crate::components::search_input::SearchInput;
use crate::core::logic::{application_count_label, format_salary, strip_html};
use crate::core::store::AppStore;
use crate::features::applications::logic::has_applied;
use crate::features::applications::view::ApplicationModal;
use crate::features::jobs::logic::{ExperienceLevel, FilterKey, JobType, SortKey};
use crate::features::jobs::state::{FetchOutcome, FetchTicket, JobListState};
use crate::features::postings::logic::{JOB_DETAILS_FAILED_MESSAGE, can_edit};
use gloo::console;
use gloo::timers::callback::Timeout;
use jobboard_api_models::{JobPosting, Role};
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

/// Everything a list callback needs to issue a fetch.
#[derive(Clone)]
struct ListDriver {
    api: ApiCtx,
    state: Rc<RefCell<JobListState>>,
    timer: Rc<RefCell<Option<Timeout>>>,
    redraw: UseForceUpdateHandle,
    navigator: Option<Navigator>,
}

impl ListDriver {
    fn fetch(&self, ticket: FetchTicket) {
        self.redraw.force_update();
        let driver = self.clone();
        yew::platform::spawn_local(async move {
            let result = driver.api.client.fetch_jobs(&ticket.query).await;
            let outcome = driver.state.borrow_mut().apply_response(ticket.seq, result);
            if let FetchOutcome::Failed(err) = outcome {
                console::error!(format!("job search failed: {err}"));
                driver.api.intercept(&err, driver.navigator.as_ref());
            }
            driver.redraw.force_update();
        });
    }

    /// Re-arm the debounce timer for the pending edit.
    fn schedule(&self) {
        let remaining = self.state.borrow().debounce_remaining_ms(now_ms());
        let Some(remaining) = remaining else {
            self.timer.borrow_mut().take();
            return;
        };
        let driver = self.clone();
        let delay = u32::try_from(remaining).unwrap_or(u32::MAX);
        *self.timer.borrow_mut() = Some(Timeout::new(delay, move || {
            let ticket = driver.state.borrow_mut().poll(now_ms());
            match ticket {
                Some(ticket) => driver.fetch(ticket),
                // Fired early; re-arm once this callback has returned.
                None => yew::platform::spawn_local(async move { driver.schedule() }),
            }
        }));
    }

    fn edit(&self, apply: impl FnOnce(&mut JobListState, u64)) {
        apply(&mut self.state.borrow_mut(), now_ms());
        self.redraw.force_update();
        self.schedule();
    }
}

fn select_value(event: &Event) -> Option<String> {
    event
        .target_dyn_into::<web_sys::HtmlSelectElement>()
        .map(|select| select.value())
}

fn input_value(event: &InputEvent) -> Option<String> {
    event
        .target_dyn_into::<web_sys::HtmlInputElement>()
        .map(|input| input.value())
}

#[function_component(JobsPage)]
pub(crate) fn jobs_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let redraw = use_force_update();
    let config = api_ctx.as_ref().map(|ctx| ctx.config.clone());
    let state = use_mut_ref(move || {
        JobListState::new(config.as_deref().unwrap_or(&UiConfig::default()))
    });
    let timer = use_mut_ref(|| None as Option<Timeout>);

    let driver = api_ctx.map(|api| ListDriver {
        api,
        state: state.clone(),
        timer,
        redraw,
        navigator,
    });

    {
        let driver = driver.clone();
        use_effect_with_deps(
            move |_| {
                let timer = driver.as_ref().map(|driver| {
                    let ticket = driver.state.borrow_mut().start();
                    driver.fetch(ticket);
                    driver.timer.clone()
                });
                move || {
                    if let Some(timer) = timer {
                        timer.borrow_mut().take();
                    }
                }
            },
            (),
        );
    }

    let Some(driver) = driver else {
        return html! { <p class="error">{"Missing API context."}</p> };
    };

    let on_search = {
        let driver = driver.clone();
        Callback::from(move |term: String| driver.edit(|state, now| state.set_search(&term, now)))
    };
    let on_filter = |key: FilterKey| {
        let driver = driver.clone();
        move |value: String| driver.edit(|state, now| state.set_filter(key, &value, now))
    };
    let on_filter_input = |key: FilterKey| {
        let apply = on_filter(key);
        Callback::from(move |event: InputEvent| {
            if let Some(value) = input_value(&event) {
                apply(value);
            }
        })
    };
    let on_filter_select = |key: FilterKey| {
        let apply = on_filter(key);
        Callback::from(move |event: Event| {
            if let Some(value) = select_value(&event) {
                apply(value);
            }
        })
    };
    let on_sort = {
        let driver = driver.clone();
        Callback::from(move |event: Event| {
            let Some(sort) = select_value(&event).and_then(|value| SortKey::parse(&value)) else {
                return;
            };
            let ticket = driver.state.borrow_mut().set_sort(sort);
            if let Some(ticket) = ticket {
                driver.fetch(ticket);
            }
        })
    };
    let on_clear = {
        let driver = driver.clone();
        Callback::from(move |_: MouseEvent| {
            driver.timer.borrow_mut().take();
            let ticket = driver.state.borrow_mut().clear_all();
            driver.fetch(ticket);
        })
    };
    let on_page = {
        let driver = driver.clone();
        Callback::from(move |page: u32| {
            let ticket = driver.state.borrow_mut().go_to_page(page);
            if let Some(ticket) = ticket {
                gloo::utils::window().scroll_to_with_x_and_y(0.0, 0.0);
                driver.fetch(ticket);
            }
        })
    };

    let view = state.borrow();
    let filters = &view.draft.filters;
    let active = view.active_filter_count();
    let results = if view.loading {
        html! { <div class="loading">{"Loading jobs..."}</div> }
    } else if view.jobs.is_empty() {
        html! {
            <EmptyState
                title="No jobs found"
                description={AttrValue::from("Try adjusting your search or filters.")}
            />
        }
    } else {
        html! {
            <div class="job-grid">
                {for view.jobs.iter().map(|job| html! { <JobCard job={job.clone()} /> })}
            </div>
        }
    };

    html! {
        <section class="jobs-page">
            <header class="toolbar">
                <SearchInput
                    value={AttrValue::from(view.draft.term.clone())}
                    placeholder={AttrValue::from("Search by title, company or keyword")}
                    on_input={on_search}
                />
                <select aria-label="Sort" onchange={on_sort}>
                    {for SortKey::ALL.iter().map(|sort| html! {
                        <option value={sort.as_str()} selected={*sort == view.sort}>{sort.label()}</option>
                    })}
                </select>
            </header>
            <div class="filters">
                <input
                    placeholder="Location"
                    value={filters.location.clone()}
                    oninput={on_filter_input(FilterKey::Location)}
                />
                <input
                    type="number"
                    placeholder="Min salary"
                    value={filters.min_salary.clone()}
                    oninput={on_filter_input(FilterKey::MinSalary)}
                />
                <input
                    type="number"
                    placeholder="Max salary"
                    value={filters.max_salary.clone()}
                    oninput={on_filter_input(FilterKey::MaxSalary)}
                />
                <select aria-label="Job type" onchange={on_filter_select(FilterKey::JobType)}>
                    <option value="" selected={filters.job_type.is_none()}>{"All job types"}</option>
                    {for JobType::ALL.iter().map(|kind| html! {
                        <option value={kind.as_str()} selected={filters.job_type == Some(*kind)}>{kind.as_str()}</option>
                    })}
                </select>
                <select aria-label="Experience" onchange={on_filter_select(FilterKey::Experience)}>
                    <option value="" selected={filters.experience.is_none()}>{"All levels"}</option>
                    {for ExperienceLevel::ALL.iter().map(|level| html! {
                        <option value={level.as_str()} selected={filters.experience == Some(*level)}>{level.as_str()}</option>
                    })}
                </select>
                if active > 0 {
                    <button class="ghost" onclick={on_clear}>{format!("Clear all ({active})")}</button>
                }
            </div>
            <p class="muted">{format!("{} jobs found", view.meta.total_items)}</p>
            {results}
            <Pagination
                tokens={view.page_tokens()}
                current={view.meta.current_page}
                total={view.meta.total_pages}
                on_select={on_page}
            />
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct JobDetailProps {
    pub id: i64,
}

#[function_component(JobDetailPage)]
pub(crate) fn job_detail_page(props: &JobDetailProps) -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let session = use_selector(|store: &AppStore| store.session.clone());
    let job = use_state(|| None as Option<JobPosting>);
    let error = use_state(|| None as Option<String>);
    let applied = use_state(|| false);
    let modal_open = use_state(|| false);
    let role = session.role();

    {
        let api_ctx = api_ctx.clone();
        let job = job.clone();
        let error = error.clone();
        let applied = applied.clone();
        let navigator = navigator.clone();
        use_effect_with_deps(
            move |(id, role): &(i64, Option<Role>)| {
                if let Some(api_ctx) = api_ctx {
                    let id = *id;
                    let is_developer = *role == Some(Role::Developer);
                    yew::platform::spawn_local(async move {
                        match api_ctx.client.fetch_job(id).await {
                            Ok(posting) => {
                                job.set(Some(posting));
                                error.set(None);
                            }
                            Err(err) => {
                                console::error!(format!("job {id} failed to load: {err}"));
                                if !api_ctx.intercept(&err, navigator.as_ref()) {
                                    api_ctx.notify_error(JOB_DETAILS_FAILED_MESSAGE);
                                    error.set(Some(JOB_DETAILS_FAILED_MESSAGE.to_string()));
                                }
                                return;
                            }
                        }
                        if is_developer {
                            match api_ctx.client.fetch_applications().await {
                                Ok(mine) => applied.set(has_applied(&mine, id)),
                                Err(err) => console::error!(format!("applications failed to load: {err}")),
                            }
                        }
                    });
                }
                || ()
            },
            (props.id, role),
        );
    }

    if let Some(message) = (*error).clone() {
        return html! {
            <EmptyState title={AttrValue::from(message)}>
                <Link<Route> to={Route::Jobs}>{"Back to jobs"}</Link<Route>>
            </EmptyState>
        };
    }
    let Some(posting) = (*job).clone() else {
        return html! { <div class="loading">{"Loading job..."}</div> };
    };

    let open_modal = {
        let modal_open = modal_open.clone();
        Callback::from(move |_: MouseEvent| modal_open.set(true))
    };
    let close_modal = {
        let modal_open = modal_open.clone();
        Callback::from(move |()| modal_open.set(false))
    };
    let on_submitted = {
        let modal_open = modal_open.clone();
        let applied = applied.clone();
        Callback::from(move |()| {
            modal_open.set(false);
            applied.set(true);
        })
    };

    let action = match (session.identity(), role) {
        (None, _) => html! {
            <Link<Route> to={Route::Login} classes={classes!("button")}>{"Log in to apply"}</Link<Route>>
        },
        (Some(_), Some(Role::Developer)) if *applied => html! {
            <span class="badge success">{"Applied"}</span>
        },
        (Some(_), Some(Role::Developer)) => html! {
            <button onclick={open_modal}>{"Apply Now"}</button>
        },
        (Some(identity), _) if can_edit(&posting, identity) => html! {
            <Link<Route> to={Route::EditJob { id: posting.id }} classes={classes!("button")}>{"Edit Job"}</Link<Route>>
        },
        (Some(_), _) => html! {},
    };

    html! {
        <article class="job-detail">
            <header>
                <h1>{posting.title.clone()}</h1>
                {posting.company().map(|company| html! { <p class="company">{company.to_string()}</p> }).unwrap_or_default()}
                <p class="meta">
                    <span>{posting.location.clone()}</span>
                    {posting.salary.map(|salary| html! { <span>{format_salary(salary)}</span> }).unwrap_or_default()}
                    <span>{application_count_label(posting.application_count)}</span>
                </p>
                {action}
            </header>
            <section>
                <h2>{"Description"}</h2>
                <p class="rich-text">{strip_html(&posting.description)}</p>
            </section>
            <section>
                <h2>{"Requirements"}</h2>
                <p class="rich-text">{strip_html(&posting.requirements)}</p>
            </section>
            if *modal_open {
                <ApplicationModal
                    job_id={posting.id}
                    job_title={AttrValue::from(posting.title.clone())}
                    on_close={close_modal}
                    on_submitted={on_submitted}
                />
            }
        </article>
    }
}
