//! Application submission modal and the applications dashboard panel.

use crate::app::api::ApiCtx;
use crate::components::empty_state::EmptyState;
use crate::components::pagination::Pagination;
use crate::components::resume_picker::{ResumePicker, file_size};
use crate::config::UiConfig;
use crate::core::logic::{page_window, plain_text_preview};
use crate::features::applications::logic::{
    APPLICATION_SUBMITTED_MESSAGE, StatusFilter, SubmissionFeedback, status_label,
    status_targets, submission_feedback,
};
use crate::features::applications::state::ApplicationsState;
use crate::features::resume::logic::{
    RESUME_DOWNLOAD_FAILED_MESSAGE, download_failure_message, download_filename,
};
use crate::features::resume::state::ResumeSelection;
use crate::models::Notice;
use crate::services::download::{PDF_MIME, save_bytes};
use gloo::console;
use jobboard_api_models::{Application, ApplicationStatus, Role};
use web_sys::File;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ApplicationModalProps {
    pub job_id: i64,
    pub job_title: AttrValue,
    pub on_close: Callback<()>,
    pub on_submitted: Callback<()>,
}

#[function_component(ApplicationModal)]
pub(crate) fn application_modal(props: &ApplicationModalProps) -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let cover_letter = use_state(String::new);
    let selection = use_state(ResumeSelection::<File>::default);
    let resume_error = use_state(|| None as Option<String>);
    let submitting = use_state(|| false);

    let Some(api_ctx) = api_ctx else {
        return html! {};
    };
    let max_bytes = api_ctx.config.max_resume_bytes;

    let on_pick = {
        let selection = selection.clone();
        let resume_error = resume_error.clone();
        Callback::from(move |file: File| {
            let mut next = (*selection).clone();
            let name = file.name();
            let size = file_size(&file);
            next.pick(file, &name, size, max_bytes);
            resume_error.set(next.error.clone());
            selection.set(next);
        })
    };
    let on_cover = {
        let cover_letter = cover_letter.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(area) = event.target_dyn_into::<web_sys::HtmlTextAreaElement>() {
                cover_letter.set(area.value());
            }
        })
    };
    let on_submit = {
        let api_ctx = api_ctx.clone();
        let cover_letter = cover_letter.clone();
        let selection = selection.clone();
        let resume_error = resume_error.clone();
        let submitting = submitting.clone();
        let on_submitted = props.on_submitted.clone();
        let job_id = props.job_id;
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *submitting || selection.error.is_some() {
                return;
            }
            submitting.set(true);
            resume_error.set(None);
            let api_ctx = api_ctx.clone();
            let letter = (*cover_letter).clone();
            let file = selection.file.clone();
            let resume_error = resume_error.clone();
            let submitting = submitting.clone();
            let on_submitted = on_submitted.clone();
            let navigator = navigator.clone();
            yew::platform::spawn_local(async move {
                let result = api_ctx.client.submit_application(job_id, &letter, file).await;
                submitting.set(false);
                match result {
                    Ok(()) => {
                        api_ctx.notify(Notice::success(APPLICATION_SUBMITTED_MESSAGE));
                        on_submitted.emit(());
                    }
                    Err(err) => match submission_feedback(&err) {
                        SubmissionFeedback::InlineResume(message) => resume_error.set(Some(message)),
                        SubmissionFeedback::Toast(message) => api_ctx.notify_error(message),
                        SubmissionFeedback::SessionExpired => {
                            api_ctx.expire_session(navigator.as_ref());
                        }
                    },
                }
            });
        })
    };
    let on_cancel = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <div class="modal-backdrop">
            <form class="modal" role="dialog" aria-modal="true" onsubmit={on_submit}>
                <h3>{format!("Apply for {}", props.job_title)}</h3>
                <label>
                    <span>{"Cover letter (optional)"}</span>
                    <textarea rows="6" value={(*cover_letter).clone()} oninput={on_cover} />
                </label>
                <ResumePicker
                    label="Resume (optional, uses your profile resume otherwise)"
                    on_pick={on_pick}
                    error={(*resume_error).clone().map(AttrValue::from)}
                    disabled={*submitting}
                />
                <div class="modal-actions">
                    <button type="button" class="ghost" disabled={*submitting} onclick={on_cancel}>{"Cancel"}</button>
                    <button type="submit" disabled={*submitting}>
                        {if *submitting { "Submitting..." } else { "Submit Application" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ApplicationsPanelProps {
    pub role: Role,
    /// Fetched set, owned by the dashboard so the stats stay in sync.
    pub applications: Vec<Application>,
    /// Server copy of an updated application.
    pub on_updated: Callback<Application>,
}

fn applicant_resume_base(application: &Application) -> String {
    format!(
        "{}_{}_resume",
        application.applicant.first_name, application.applicant.last_name
    )
}

#[function_component(ApplicationsPanel)]
pub(crate) fn applications_panel(props: &ApplicationsPanelProps) -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let redraw = use_force_update();
    let config = api_ctx.as_ref().map(|ctx| ctx.config.clone());
    let state = use_mut_ref(move || {
        ApplicationsState::new(config.as_deref().unwrap_or(&UiConfig::default()))
    });
    {
        let state = state.clone();
        let redraw = redraw.clone();
        use_effect_with_deps(
            move |applications: &Vec<Application>| {
                state.borrow_mut().set_all(applications.clone());
                redraw.force_update();
                || ()
            },
            props.applications.clone(),
        );
    }
    let Some(api_ctx) = api_ctx else {
        return html! {};
    };
    let reviewer = props.role != Role::Developer;

    let on_search = {
        let state = state.clone();
        let redraw = redraw.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                state.borrow_mut().set_search(&input.value());
                redraw.force_update();
            }
        })
    };
    let on_filter = {
        let state = state.clone();
        let redraw = redraw.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<web_sys::HtmlSelectElement>() {
                state
                    .borrow_mut()
                    .set_status_filter(StatusFilter::parse(&select.value()));
                redraw.force_update();
            }
        })
    };
    let on_page = {
        let state = state.clone();
        let redraw = redraw.clone();
        Callback::from(move |page: u32| {
            let moved = state.borrow_mut().go_to_page(usize::try_from(page).unwrap_or(0));
            if moved {
                redraw.force_update();
            }
        })
    };
    let on_status = {
        let api_ctx = api_ctx.clone();
        let state = state.clone();
        let redraw = redraw.clone();
        let on_updated = props.on_updated.clone();
        let navigator = navigator.clone();
        Callback::from(move |(id, status): (i64, ApplicationStatus)| {
            if !state.borrow_mut().begin_status_update(id) {
                return;
            }
            redraw.force_update();
            let api_ctx = api_ctx.clone();
            let state = state.clone();
            let redraw = redraw.clone();
            let on_updated = on_updated.clone();
            let navigator = navigator.clone();
            yew::platform::spawn_local(async move {
                let result = api_ctx.client.update_application_status(id, status).await;
                let updated = result.as_ref().ok().cloned();
                let outcome = state.borrow_mut().finish_status_update(id, result);
                redraw.force_update();
                match outcome.notice() {
                    Some(notice) => api_ctx.notify(notice),
                    None => api_ctx.expire_session(navigator.as_ref()),
                }
                if let Some(updated) = updated {
                    on_updated.emit(updated);
                }
            });
        })
    };
    let on_download = {
        let api_ctx = api_ctx.clone();
        let navigator = navigator.clone();
        Callback::from(move |(id, base): (i64, String)| {
            let api_ctx = api_ctx.clone();
            let navigator = navigator.clone();
            yew::platform::spawn_local(async move {
                match api_ctx.client.download_application_resume(id).await {
                    Ok(bytes) => {
                        if let Err(err) = save_bytes(&bytes, &download_filename(&base), PDF_MIME) {
                            console::error!(format!("resume download failed: {err:?}"));
                            api_ctx.notify_error(RESUME_DOWNLOAD_FAILED_MESSAGE);
                        }
                    }
                    Err(err) => {
                        console::error!(format!("resume download failed: {err}"));
                        match download_failure_message(&err) {
                            Some(message) => api_ctx.notify_error(message),
                            None => api_ctx.expire_session(navigator.as_ref()),
                        }
                    }
                }
            });
        })
    };
    let on_toggle = {
        let state = state.clone();
        let redraw = redraw.clone();
        Callback::from(move |id: i64| {
            state.borrow_mut().toggle_expanded(id);
            redraw.force_update();
        })
    };

    let view = state.borrow();
    let rows = view.visible().iter().map(|application| {
        render_row(
            application,
            reviewer,
            view.is_updating(application.id),
            view.expanded == Some(application.id),
            &on_status,
            &on_download,
            &on_toggle,
        )
    });
    let page_count = u32::try_from(view.page_count()).unwrap_or(u32::MAX);
    let current = u32::try_from(view.page).unwrap_or(1);

    html! {
        <section class="applications-panel">
            <div class="toolbar">
                <input
                    type="search"
                    placeholder={if reviewer { "Search by job or applicant" } else { "Search by job title" }}
                    value={view.search.clone()}
                    oninput={on_search}
                />
                <select aria-label="Status" onchange={on_filter}>
                    <option value="all" selected={view.status_filter == StatusFilter::All}>{"All statuses"}</option>
                    {for ApplicationStatus::ALL.iter().map(|status| html! {
                        <option
                            value={status.as_str()}
                            selected={view.status_filter == StatusFilter::Only(*status)}
                        >{status_label(*status)}</option>
                    })}
                </select>
            </div>
            if view.filtered.is_empty() {
                <EmptyState title="No applications found" />
            } else {
                <ul class="application-list">{for rows}</ul>
            }
            <Pagination
                tokens={page_window(current, page_count)}
                current={current}
                total={page_count}
                on_select={on_page}
            />
        </section>
    }
}

fn render_row(
    application: &Application,
    reviewer: bool,
    updating: bool,
    expanded: bool,
    on_status: &Callback<(i64, ApplicationStatus)>,
    on_download: &Callback<(i64, String)>,
    on_toggle: &Callback<i64>,
) -> Html {
    let id = application.id;
    let status = application.status;
    let on_change = {
        let on_status = on_status.clone();
        Callback::from(move |event: Event| {
            let next = event
                .target_dyn_into::<web_sys::HtmlSelectElement>()
                .and_then(|select| ApplicationStatus::parse(&select.value()));
            if let Some(next) = next.filter(|next| *next != status) {
                on_status.emit((id, next));
            }
        })
    };
    let download = {
        let on_download = on_download.clone();
        let base = applicant_resume_base(application);
        Callback::from(move |_: MouseEvent| on_download.emit((id, base.clone())))
    };
    let toggle = {
        let on_toggle = on_toggle.clone();
        Callback::from(move |_: MouseEvent| on_toggle.emit(id))
    };

    let status_control = if reviewer {
        html! {
            <select aria-label="Update status" disabled={updating} onchange={on_change}>
                <option value={status.as_str()} selected=true>{status_label(status)}</option>
                {for status_targets(status).into_iter().map(|target| html! {
                    <option value={target.as_str()}>{status_label(target)}</option>
                })}
            </select>
        }
    } else {
        html! { <span class={classes!("status", status.as_str())}>{status_label(status)}</span> }
    };

    html! {
        <li class="application-row">
            <div class="summary">
                <div>
                    <h4>{application.job.title.clone()}</h4>
                    if reviewer {
                        <p class="muted">{application.applicant.full_name()}</p>
                    } else {
                        {application.job.company().map(|company| html! {
                            <p class="muted">{company.to_string()}</p>
                        }).unwrap_or_default()}
                    }
                    <p class="muted">{format!("Applied {}", application.applied_at.format("%b %-d, %Y"))}</p>
                </div>
                {status_control}
                if updating {
                    <span class="spinner" aria-label="Updating"></span>
                }
            </div>
            <div class="row-actions">
                if reviewer && application.resume.is_some() {
                    <button class="ghost" onclick={download}>{"Download Resume"}</button>
                }
                if application.cover_letter.is_some() {
                    <button class="ghost" onclick={toggle}>
                        {if expanded { "Hide cover letter" } else { "Show cover letter" }}
                    </button>
                }
            </div>
            if expanded {
                <p class="cover-letter">{application.cover_letter.clone().unwrap_or_default()}</p>
            } else {
                <p class="preview">{plain_text_preview(&application.job.description, 120)}</p>
            }
        </li>
    }
}
