//! Post, edit and owner-list views for job postings.
//!
//! # Design
//! - Create and edit share one form component driven by `JobFormState`.
//! - Failures are routed through `posting_feedback`; views only act on the verdict.

use crate::app::api::ApiCtx;
use crate::app::routes::Route;
use crate::components::confirm_modal::ConfirmModal;
use crate::components::empty_state::EmptyState;
use crate::components::pagination::Pagination;
use crate::config::UiConfig;
use crate::core::confirm::ConfirmFlow;
use crate::core::logic::{application_count_label, page_window};
use crate::core::store::AppStore;
use crate::features::postings::logic::{
    JOB_DELETED_MESSAGE, JOB_EDIT_FORBIDDEN_MESSAGE, JOB_POSTED_MESSAGE, JOB_UPDATED_MESSAGE,
    JobField, PostingCall, PostingFeedback, can_edit, posting_feedback,
};
use crate::features::postings::state::{JobFormState, MyJobsState};
use crate::models::Notice;
use gloo::console;
use jobboard_api_models::{Identity, JobPosting};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

/// Act on a posting failure verdict.
fn report(api_ctx: &ApiCtx, navigator: Option<&Navigator>, feedback: PostingFeedback) {
    match feedback {
        PostingFeedback::Fields(_) => {}
        PostingFeedback::Notice(notice) => api_ctx.notify(notice),
        PostingFeedback::NoticeAndLeave(notice) => {
            api_ctx.notify(notice);
            if let Some(navigator) = navigator {
                navigator.push(&Route::Dashboard);
            }
        }
        PostingFeedback::SessionExpired => api_ctx.expire_session(navigator),
    }
}

#[derive(Properties, PartialEq)]
struct JobFormViewProps {
    state: JobFormState,
    heading: AttrValue,
    submit_label: AttrValue,
    on_change: Callback<(JobField, String)>,
    on_submit: Callback<()>,
    #[prop_or_default]
    children: Children,
}

#[function_component(JobFormView)]
fn job_form_view(props: &JobFormViewProps) -> Html {
    let form = &props.state.form;
    let field = |field: JobField, label: &'static str, value: &str, multiline: bool| {
        let on_change = props.on_change.clone();
        let error = props.state.error(field).map(str::to_string);
        let control = if multiline {
            let oninput = Callback::from(move |event: InputEvent| {
                if let Some(area) = event.target_dyn_into::<web_sys::HtmlTextAreaElement>() {
                    on_change.emit((field, area.value()));
                }
            });
            html! { <textarea rows="8" name={field.key()} value={value.to_string()} oninput={oninput} /> }
        } else {
            let oninput = Callback::from(move |event: InputEvent| {
                if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                    on_change.emit((field, input.value()));
                }
            });
            let kind = if field == JobField::Salary { "number" } else { "text" };
            html! { <input type={kind} name={field.key()} value={value.to_string()} oninput={oninput} /> }
        };
        html! {
            <label class={classes!("field", error.is_some().then_some("invalid"))}>
                <span>{label}</span>
                {control}
                {error.map(|message| html! { <p class="field-error">{message}</p> }).unwrap_or_default()}
            </label>
        }
    };
    let onsubmit = props.on_submit.reform(|event: SubmitEvent| event.prevent_default());
    let saving = props.state.saving;

    html! {
        <form class="job-form" onsubmit={onsubmit}>
            <h1>{props.heading.clone()}</h1>
            {field(JobField::Title, "Job Title", &form.title, false)}
            {field(JobField::Location, "Location", &form.location, false)}
            {field(JobField::Salary, "Salary (optional)", &form.salary, false)}
            {field(JobField::Description, "Description", &form.description, true)}
            {field(JobField::Requirements, "Requirements", &form.requirements, true)}
            <div class="form-actions">
                { for props.children.iter() }
                <button type="submit" disabled={saving}>
                    {if saving { AttrValue::Static("Saving...") } else { props.submit_label.clone() }}
                </button>
            </div>
        </form>
    }
}

fn on_field(form: &UseStateHandle<JobFormState>) -> Callback<(JobField, String)> {
    let form = form.clone();
    Callback::from(move |(field, value): (JobField, String)| {
        let mut next = (*form).clone();
        next.set(field, &value);
        form.set(next);
    })
}

#[function_component(PostJobPage)]
pub(crate) fn post_job_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let form = use_state(JobFormState::default);
    let Some(api_ctx) = api_ctx else {
        return html! { <p class="error">{"Missing API context."}</p> };
    };

    let on_submit = {
        let form = form.clone();
        Callback::from(move |()| {
            let mut next = (*form).clone();
            let payload = next.submit();
            form.set(next.clone());
            let Some(payload) = payload else {
                return;
            };
            let api_ctx = api_ctx.clone();
            let navigator = navigator.clone();
            let form = form.clone();
            yew::platform::spawn_local(async move {
                match api_ctx.client.create_job(&payload).await {
                    Ok(_) => {
                        next.succeed();
                        form.set(next);
                        api_ctx.notify(Notice::success(JOB_POSTED_MESSAGE));
                        if let Some(navigator) = navigator.as_ref() {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    Err(err) => {
                        let feedback = next.fail(PostingCall::Create, &err);
                        form.set(next);
                        report(&api_ctx, navigator.as_ref(), feedback);
                    }
                }
            });
        })
    };

    html! {
        <JobFormView
            state={(*form).clone()}
            heading="Post a New Job"
            submit_label="Post Job"
            on_change={on_field(&form)}
            on_submit={on_submit}
        />
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct EditJobProps {
    pub id: i64,
}

#[function_component(EditJobPage)]
pub(crate) fn edit_job_page(props: &EditJobProps) -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let viewer = use_selector(|store: &AppStore| store.session.identity().cloned());
    let form = use_state(|| None as Option<JobFormState>);
    let delete = use_state(ConfirmFlow::<i64>::default);

    {
        let api_ctx = api_ctx.clone();
        let navigator = navigator.clone();
        let form = form.clone();
        let viewer = (*viewer).clone();
        use_effect_with_deps(
            move |id: &i64| {
                let id = *id;
                if let Some(api_ctx) = api_ctx {
                    yew::platform::spawn_local(async move {
                        match api_ctx.client.fetch_job(id).await {
                            Ok(job) => {
                                let allowed = viewer.as_ref().is_some_and(|viewer| can_edit(&job, viewer));
                                if allowed {
                                    form.set(Some(JobFormState::editing(&job)));
                                } else {
                                    report(
                                        &api_ctx,
                                        navigator.as_ref(),
                                        PostingFeedback::NoticeAndLeave(Notice::error(JOB_EDIT_FORBIDDEN_MESSAGE)),
                                    );
                                }
                            }
                            Err(err) => {
                                console::error!(format!("job {id} failed to load: {err}"));
                                report(&api_ctx, navigator.as_ref(), posting_feedback(PostingCall::Load, &err));
                            }
                        }
                    });
                }
                || ()
            },
            props.id,
        );
    }

    let (Some(api_ctx), Some(current)) = (api_ctx, (*form).clone()) else {
        return html! { <div class="loading">{"Loading job..."}</div> };
    };
    let id = props.id;

    let on_change = {
        let form = form.clone();
        Callback::from(move |(field, value): (JobField, String)| {
            if let Some(mut next) = (*form).clone() {
                next.set(field, &value);
                form.set(Some(next));
            }
        })
    };
    let on_submit = {
        let api_ctx = api_ctx.clone();
        let navigator = navigator.clone();
        let form = form.clone();
        Callback::from(move |()| {
            let Some(mut next) = (*form).clone() else {
                return;
            };
            let payload = next.submit();
            form.set(Some(next.clone()));
            let Some(payload) = payload else {
                return;
            };
            let api_ctx = api_ctx.clone();
            let navigator = navigator.clone();
            let form = form.clone();
            yew::platform::spawn_local(async move {
                match api_ctx.client.update_job(id, &payload).await {
                    Ok(_) => {
                        next.succeed();
                        form.set(Some(next));
                        api_ctx.notify(Notice::success(JOB_UPDATED_MESSAGE));
                        if let Some(navigator) = navigator.as_ref() {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    Err(err) => {
                        let feedback = next.fail(PostingCall::Update, &err);
                        form.set(Some(next));
                        report(&api_ctx, navigator.as_ref(), feedback);
                    }
                }
            });
        })
    };
    let on_request_delete = {
        let delete = delete.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*delete).clone();
            if next.request(id) {
                delete.set(next);
            }
        })
    };
    let on_cancel_delete = {
        let delete = delete.clone();
        Callback::from(move |()| {
            let mut next = (*delete).clone();
            next.cancel();
            delete.set(next);
        })
    };
    let on_confirm_delete = {
        let delete = delete.clone();
        Callback::from(move |()| {
            let mut next = (*delete).clone();
            let Some(target) = next.confirm() else {
                return;
            };
            delete.set(next.clone());
            let api_ctx = api_ctx.clone();
            let navigator = navigator.clone();
            let delete = delete.clone();
            yew::platform::spawn_local(async move {
                let result = api_ctx.client.delete_job(target).await;
                next.finish();
                delete.set(next);
                match result {
                    Ok(()) => {
                        api_ctx.notify(Notice::success(JOB_DELETED_MESSAGE));
                        if let Some(navigator) = navigator.as_ref() {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    Err(err) => report(&api_ctx, navigator.as_ref(), posting_feedback(PostingCall::Delete, &err)),
                }
            });
        })
    };

    html! {
        <>
            <JobFormView
                state={current}
                heading="Edit Job"
                submit_label="Update Job"
                on_change={on_change}
                on_submit={on_submit}
            >
                <button type="button" class="danger" onclick={on_request_delete}>{"Delete Job"}</button>
            </JobFormView>
            <ConfirmModal
                open={delete.target().is_some()}
                title="Delete job"
                message="Are you sure you want to delete this job? This cannot be undone."
                busy={delete.is_in_flight()}
                on_confirm={on_confirm_delete}
                on_cancel={on_cancel_delete}
            />
        </>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct MyJobsPanelProps {
    pub viewer: Identity,
    /// Every posting from `?all=true`; ownership is filtered here.
    pub jobs: Vec<JobPosting>,
    /// Ask the dashboard to refetch after a delete.
    pub on_changed: Callback<()>,
}

#[function_component(MyJobsPanel)]
pub(crate) fn my_jobs_panel(props: &MyJobsPanelProps) -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let redraw = use_force_update();
    let config = api_ctx.as_ref().map(|ctx| ctx.config.clone());
    let state = use_mut_ref(move || MyJobsState::new(config.as_deref().unwrap_or(&UiConfig::default())));
    {
        let state = state.clone();
        let redraw = redraw.clone();
        use_effect_with_deps(
            move |(jobs, viewer): &(Vec<JobPosting>, Identity)| {
                state.borrow_mut().set_jobs(jobs.clone(), viewer);
                redraw.force_update();
                || ()
            },
            (props.jobs.clone(), props.viewer.clone()),
        );
    }
    let Some(api_ctx) = api_ctx else {
        return html! {};
    };

    let on_page = {
        let state = state.clone();
        let redraw = redraw.clone();
        Callback::from(move |page: u32| {
            if state.borrow_mut().go_to_page(usize::try_from(page).unwrap_or(0)) {
                redraw.force_update();
            }
        })
    };
    let on_request_delete = {
        let state = state.clone();
        let redraw = redraw.clone();
        Callback::from(move |id: i64| {
            if state.borrow_mut().delete.request(id) {
                redraw.force_update();
            }
        })
    };
    let on_cancel_delete = {
        let state = state.clone();
        let redraw = redraw.clone();
        Callback::from(move |()| {
            state.borrow_mut().delete.cancel();
            redraw.force_update();
        })
    };
    let on_confirm_delete = {
        let state = state.clone();
        let redraw = redraw.clone();
        let on_changed = props.on_changed.clone();
        Callback::from(move |()| {
            let Some(target) = state.borrow_mut().delete.confirm() else {
                return;
            };
            redraw.force_update();
            let api_ctx = api_ctx.clone();
            let navigator = navigator.clone();
            let state = state.clone();
            let redraw = redraw.clone();
            let on_changed = on_changed.clone();
            yew::platform::spawn_local(async move {
                let result = api_ctx.client.delete_job(target).await;
                let succeeded = result.is_ok();
                let feedback = state.borrow_mut().finish_delete(result);
                redraw.force_update();
                report(&api_ctx, navigator.as_ref(), feedback);
                if succeeded {
                    on_changed.emit(());
                }
            });
        })
    };

    let view = state.borrow();
    let page_count = u32::try_from(view.page_count()).unwrap_or(u32::MAX);
    let current = u32::try_from(view.page).unwrap_or(1);
    let rows = view.visible().iter().map(|job| {
        let id = job.id;
        let request = on_request_delete.reform(move |_: MouseEvent| id);
        html! {
            <li class="job-row">
                <div>
                    <Link<Route> to={Route::JobDetail { id }}>{job.title.clone()}</Link<Route>>
                    <p class="muted">{format!("{} \u{00b7} {}", job.location, application_count_label(job.application_count))}</p>
                </div>
                <div class="row-actions">
                    <Link<Route> to={Route::EditJob { id }} classes={classes!("button", "ghost")}>{"Edit"}</Link<Route>>
                    <button class="danger" onclick={request}>{"Delete"}</button>
                </div>
            </li>
        }
    });

    html! {
        <section class="my-jobs-panel">
            if view.mine.is_empty() {
                <EmptyState title="You haven't posted any jobs yet">
                    <Link<Route> to={Route::PostJob} classes={classes!("button")}>{"Post a Job"}</Link<Route>>
                </EmptyState>
            } else {
                <ul class="job-list">{for rows}</ul>
            }
            <Pagination
                tokens={page_window(current, page_count)}
                current={current}
                total={page_count}
                on_select={on_page}
            />
            <ConfirmModal
                open={view.delete.target().is_some()}
                title="Delete job"
                message="Are you sure you want to delete this job? This cannot be undone."
                busy={view.delete.is_in_flight()}
                on_confirm={on_confirm_delete}
                on_cancel={on_cancel_delete}
            />
        </section>
    }
}
