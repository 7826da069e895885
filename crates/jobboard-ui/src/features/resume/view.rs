//! Profile resume panel and resume builder.
//!
//! # Design
//! - Upload, delete and download each settle their own busy state.
//! - A successful upload or delete refreshes the session identity.

use crate::app::api::ApiCtx;
use crate::components::confirm_modal::ConfirmModal;
use crate::components::resume_picker::{ResumePicker, file_size};
use crate::core::confirm::ConfirmFlow;
use crate::features::resume::logic::{
    RESUME_DELETE_FAILED_MESSAGE, RESUME_DELETED_MESSAGE, RESUME_DOWNLOAD_FAILED_MESSAGE,
    RESUME_GENERATE_FAILED_MESSAGE, RESUME_GENERATED_MESSAGE, download_failure_message,
    download_filename, generated_filename,
};
use crate::features::resume::state::{ResumeDraft, ResumeSection, UploadOutcome, UploadState};
use crate::models::Notice;
use crate::services::download::{PDF_MIME, save_bytes};
use chrono::Local;
use gloo::console;
use jobboard_api_models::{Identity, ResumeTemplate};
use web_sys::File;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ResumePanelProps {
    pub identity: Identity,
}

#[function_component(ResumePanel)]
pub(crate) fn resume_panel(props: &ResumePanelProps) -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let upload = use_mut_ref(UploadState::default);
    let redraw = use_force_update();
    let delete = use_state(ConfirmFlow::<()>::default);
    let Some(api_ctx) = api_ctx else {
        return html! {};
    };

    let on_pick = {
        let api_ctx = api_ctx.clone();
        let navigator = navigator.clone();
        let upload = upload.clone();
        let redraw = redraw.clone();
        Callback::from(move |file: File| {
            let started = upload.borrow_mut().begin(
                &file.name(),
                file_size(&file),
                api_ctx.config.max_resume_bytes,
            );
            redraw.force_update();
            if started != Ok(true) {
                return;
            }
            let api_ctx = api_ctx.clone();
            let navigator = navigator.clone();
            let upload = upload.clone();
            let redraw = redraw.clone();
            yew::platform::spawn_local(async move {
                let result = api_ctx.client.upload_resume(file).await;
                let outcome = upload.borrow_mut().finish(result);
                redraw.force_update();
                match outcome.notice() {
                    Some(notice) => api_ctx.notify(notice),
                    None => api_ctx.expire_session(navigator.as_ref()),
                }
                if outcome == UploadOutcome::Uploaded {
                    api_ctx.refresh_identity().await;
                }
            });
        })
    };
    let on_download = {
        let api_ctx = api_ctx.clone();
        let navigator = navigator.clone();
        let base = props
            .identity
            .resume_original_name
            .clone()
            .unwrap_or_else(|| "resume".to_string());
        Callback::from(move |_: MouseEvent| {
            let api_ctx = api_ctx.clone();
            let navigator = navigator.clone();
            let base = base.clone();
            yew::platform::spawn_local(async move {
                match api_ctx.client.download_own_resume().await {
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
    let on_request_delete = {
        let delete = delete.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*delete).clone();
            if next.request(()) {
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
            if next.confirm().is_none() {
                return;
            }
            delete.set(next.clone());
            let api_ctx = api_ctx.clone();
            let navigator = navigator.clone();
            let delete = delete.clone();
            yew::platform::spawn_local(async move {
                let result = api_ctx.client.delete_resume().await;
                next.finish();
                delete.set(next);
                match result {
                    Ok(()) => {
                        api_ctx.notify(Notice::success(RESUME_DELETED_MESSAGE));
                        api_ctx.refresh_identity().await;
                    }
                    Err(err) => {
                        if !api_ctx.intercept(&err, navigator.as_ref()) {
                            api_ctx.notify_error(RESUME_DELETE_FAILED_MESSAGE);
                        }
                    }
                }
            });
        })
    };

    let identity = &props.identity;
    let upload_view = upload.borrow();
    html! {
        <section class="resume-panel">
            <h3>{"Your Resume"}</h3>
            if identity.has_resume() {
                <div class="resume-current">
                    <span>{identity.resume_original_name.clone().unwrap_or_else(|| "Resume on file".to_string())}</span>
                    <button class="ghost" onclick={on_download}>{"Download"}</button>
                    <button class="danger" disabled={delete.is_in_flight()} onclick={on_request_delete}>{"Delete"}</button>
                </div>
            } else {
                <p class="muted">{"No resume uploaded yet."}</p>
            }
            <ResumePicker
                label={if identity.has_resume() { "Replace resume" } else { "Upload resume" }}
                on_pick={on_pick}
                error={upload_view.error.clone().map(AttrValue::from)}
                disabled={upload_view.busy}
            />
            if upload_view.busy {
                <p class="muted">{"Uploading..."}</p>
            }
            <ConfirmModal
                open={delete.target().is_some()}
                title="Delete resume"
                message="Are you sure you want to delete your resume?"
                busy={delete.is_in_flight()}
                on_confirm={on_confirm_delete}
                on_cancel={on_cancel_delete}
            />
        </section>
    }
}

/// Inputs for one section entry: (key, label, multiline).
const fn entry_fields(section: ResumeSection) -> &'static [(&'static str, &'static str, bool)] {
    match section {
        ResumeSection::Education => &[
            ("institution", "Institution", false),
            ("degree", "Degree", false),
            ("field", "Field of study", false),
            ("graduation_year", "Graduation year", false),
            ("gpa", "GPA", false),
            ("location", "Location", false),
            ("description", "Description", true),
        ],
        ResumeSection::Experience => &[
            ("company", "Company", false),
            ("position", "Position", false),
            ("start_date", "Start date", false),
            ("end_date", "End date", false),
            ("location", "Location", false),
            ("description", "Description", true),
        ],
        ResumeSection::Skills => &[("name", "Skill", false), ("level", "Level", false)],
        ResumeSection::Projects => &[
            ("name", "Project name", false),
            ("technologies", "Technologies (comma separated)", false),
            ("github_url", "GitHub URL", false),
            ("live_url", "Live URL", false),
            ("description", "Description", true),
        ],
    }
}

const PERSONAL_FIELDS: [(&str, &str); 9] = [
    ("name", "Full name"),
    ("title", "Professional title"),
    ("email", "Email"),
    ("phone", "Phone"),
    ("location", "Location"),
    ("linkedin", "LinkedIn"),
    ("github", "GitHub"),
    ("portfolio", "Portfolio"),
    ("summary", "Summary"),
];

fn personal_value(draft: &ResumeDraft, key: &str) -> String {
    let info = &draft.content.personal_info;
    match key {
        "name" => info.name.clone(),
        "title" => info.title.clone(),
        "email" => info.email.clone(),
        "phone" => info.phone.clone(),
        "location" => info.location.clone(),
        "linkedin" => info.linkedin.clone(),
        "github" => info.github.clone(),
        "portfolio" => info.portfolio.clone(),
        "summary" => info.summary.clone(),
        _ => String::new(),
    }
}

fn entry_value(draft: &ResumeDraft, section: ResumeSection, index: usize, key: &str) -> String {
    let content = &draft.content;
    let value = match section {
        ResumeSection::Education => content.education.get(index).map(|entry| match key {
            "institution" => entry.institution.clone(),
            "degree" => entry.degree.clone(),
            "field" => entry.field.clone(),
            "graduation_year" => entry.graduation_year.clone(),
            "gpa" => entry.gpa.clone(),
            "location" => entry.location.clone(),
            "description" => entry.description.clone(),
            _ => String::new(),
        }),
        ResumeSection::Experience => content.experience.get(index).map(|entry| match key {
            "company" => entry.company.clone(),
            "position" => entry.position.clone(),
            "start_date" => entry.start_date.clone(),
            "end_date" => entry.end_date.clone(),
            "location" => entry.location.clone(),
            "description" => entry.description.clone(),
            _ => String::new(),
        }),
        ResumeSection::Skills => content.skills.get(index).map(|entry| match key {
            "name" => entry.name.clone(),
            "level" => entry.level.clone(),
            _ => String::new(),
        }),
        ResumeSection::Projects => content.projects.get(index).map(|entry| match key {
            "name" => entry.name.clone(),
            "technologies" => entry.technologies.join(", "),
            "github_url" => entry.github_url.clone(),
            "live_url" => entry.live_url.clone(),
            "description" => entry.description.clone(),
            _ => String::new(),
        }),
    };
    value.unwrap_or_default()
}

fn text_input(value: String, multiline: bool, on_value: Callback<String>) -> Html {
    if multiline {
        let oninput = Callback::from(move |event: InputEvent| {
            if let Some(area) = event.target_dyn_into::<web_sys::HtmlTextAreaElement>() {
                on_value.emit(area.value());
            }
        });
        html! { <textarea rows="3" value={value} oninput={oninput} /> }
    } else {
        let oninput = Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                on_value.emit(input.value());
            }
        });
        html! { <input type="text" value={value} oninput={oninput} /> }
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ResumeBuilderProps {
    pub identity: Identity,
}

#[function_component(ResumeBuilderPanel)]
pub(crate) fn resume_builder_panel(props: &ResumeBuilderProps) -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let identity = props.identity.clone();
    let draft = use_state(move || ResumeDraft::for_identity(&identity));
    let Some(api_ctx) = api_ctx else {
        return html! {};
    };

    let update = {
        let draft = draft.clone();
        move |apply: Box<dyn FnOnce(&mut ResumeDraft)>| {
            let mut next = (*draft).clone();
            apply(&mut next);
            draft.set(next);
        }
    };
    let update = std::rc::Rc::new(update);

    let on_template = {
        let update = update.clone();
        Callback::from(move |template: ResumeTemplate| {
            update(Box::new(move |draft| draft.template = template));
        })
    };
    let on_generate = {
        let draft = draft.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*draft).clone();
            let Some(request) = next.start_generation() else {
                return;
            };
            draft.set(next.clone());
            let api_ctx = api_ctx.clone();
            let navigator = navigator.clone();
            let draft = draft.clone();
            yew::platform::spawn_local(async move {
                let result = api_ctx.client.generate_resume(&request).await;
                next.finish_generation();
                draft.set(next);
                let name = request.content.personal_info.name.clone();
                let filename = generated_filename(&name, Local::now().date_naive());
                match result {
                    Ok(bytes) => match save_bytes(&bytes, &filename, PDF_MIME) {
                        Ok(()) => api_ctx.notify(Notice::success(RESUME_GENERATED_MESSAGE)),
                        Err(err) => {
                            console::error!("generated resume could not be saved", err);
                            api_ctx.notify_error(RESUME_GENERATE_FAILED_MESSAGE);
                        }
                    },
                    Err(err) => {
                        console::error!(format!("resume generation failed: {err}"));
                        if !api_ctx.intercept(&err, navigator.as_ref()) {
                            api_ctx.notify_error(RESUME_GENERATE_FAILED_MESSAGE);
                        }
                    }
                }
            });
        })
    };

    let personal = PERSONAL_FIELDS.iter().map(|(key, label)| {
        let update = update.clone();
        let key = *key;
        let on_value = Callback::from(move |value: String| {
            update(Box::new(move |draft| draft.set_personal(key, &value)));
        });
        html! {
            <label class="field">
                <span>{*label}</span>
                {text_input(personal_value(&draft, key), key == "summary", on_value)}
            </label>
        }
    });

    let sections = ResumeSection::ALL.iter().map(|section| {
        let section = *section;
        let count = draft.len(section);
        let on_add = {
            let update = update.clone();
            Callback::from(move |_: MouseEvent| update(Box::new(move |draft| draft.add_item(section))))
        };
        let entries = (0..count).map(|index| {
            let on_remove = {
                let update = update.clone();
                Callback::from(move |_: MouseEvent| {
                    update(Box::new(move |draft| {
                        draft.remove_item(section, index);
                    }));
                })
            };
            let fields = entry_fields(section).iter().map(|(key, label, multiline)| {
                let update = update.clone();
                let key = *key;
                let on_value = Callback::from(move |value: String| {
                    update(Box::new(move |draft| {
                        draft.set_entry(section, index, key, &value);
                    }));
                });
                html! {
                    <label class="field">
                        <span>{*label}</span>
                        {text_input(entry_value(&draft, section, index, key), *multiline, on_value)}
                    </label>
                }
            });
            html! {
                <div class="resume-entry">
                    {for fields}
                    <button type="button" class="ghost" disabled={count <= 1} onclick={on_remove}>{"Remove"}</button>
                </div>
            }
        });
        html! {
            <fieldset class="resume-section">
                <legend>{section.label()}</legend>
                {for entries}
                <button type="button" class="ghost" onclick={on_add}>{format!("Add {}", section.label())}</button>
            </fieldset>
        }
    });

    let templates = ResumeTemplate::ALL.iter().map(|template| {
        let template = *template;
        let onclick = on_template.reform(move |_: MouseEvent| template);
        html! {
            <button
                type="button"
                class={classes!("template", (draft.template == template).then_some("active"))}
                onclick={onclick}
            >{template.title()}</button>
        }
    });

    html! {
        <section class="resume-builder">
            <fieldset class="resume-section">
                <legend>{"Personal Information"}</legend>
                {for personal}
            </fieldset>
            {for sections}
            <div class="templates">{for templates}</div>
            <button disabled={draft.generating} onclick={on_generate}>
                {if draft.generating { "Generating..." } else { "Generate PDF" }}
            </button>
        </section>
    }
}
