//! Login and registration pages.

use crate::app::api::ApiCtx;
use crate::app::routes::Route;
use crate::components::resume_picker::{ResumePicker, file_size};
use crate::features::auth::logic::{LOGIN_SUCCESS_MESSAGE, REGISTER_SUCCESS_MESSAGE};
use crate::features::auth::state::{GENERAL_ERROR_KEY, LoginState, RegisterState, RegisterStep};
use crate::features::resume::state::ResumeSelection;
use crate::models::Notice;
use jobboard_api_models::Role;
use serde::Deserialize;
use web_sys::{File, HtmlInputElement};
use yew::prelude::*;
use yew_router::prelude::*;

fn input_value(event: &InputEvent) -> Option<String> {
    event
        .target_dyn_into::<HtmlInputElement>()
        .map(|input| input.value())
}

#[function_component(LoginPage)]
pub(crate) fn login_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let state = use_state(LoginState::default);
    let Some(api_ctx) = api_ctx else {
        return html! { <p class="error">{"Missing API context."}</p> };
    };

    let on_username = {
        let state = state.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(value) = input_value(&event) {
                let mut next = (*state).clone();
                next.form.username = value;
                state.set(next);
            }
        })
    };
    let on_password = {
        let state = state.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(value) = input_value(&event) {
                let mut next = (*state).clone();
                next.form.password = value;
                state.set(next);
            }
        })
    };
    let onsubmit = {
        let state = state.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let mut next = (*state).clone();
            let Some(credentials) = next.submit() else {
                return;
            };
            state.set(next.clone());
            let api_ctx = api_ctx.clone();
            let navigator = navigator.clone();
            let state = state.clone();
            yew::platform::spawn_local(async move {
                match api_ctx.client.login(&credentials).await {
                    Ok(response) => {
                        next.succeed();
                        state.set(next);
                        api_ctx.establish(response);
                        api_ctx.notify(Notice::success(LOGIN_SUCCESS_MESSAGE));
                        if let Some(navigator) = navigator.as_ref() {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    Err(err) => {
                        let message = next.fail(&err);
                        state.set(next);
                        api_ctx.notify_error(message);
                    }
                }
            });
        })
    };

    html! {
        <form class="auth-form" onsubmit={onsubmit}>
            <h1>{"Sign in"}</h1>
            {state.error.clone().map(|message| html! { <p class="form-error">{message}</p> }).unwrap_or_default()}
            <label class="field">
                <span>{"Username"}</span>
                <input type="text" autocomplete="username" value={state.form.username.clone()} oninput={on_username} />
            </label>
            <label class="field">
                <span>{"Password"}</span>
                <input type="password" autocomplete="current-password" value={state.form.password.clone()} oninput={on_password} />
            </label>
            <button type="submit" disabled={state.busy}>
                {if state.busy { "Signing in..." } else { "Sign in" }}
            </button>
            <p class="muted">
                {"No account? "}
                <Link<Route> to={Route::Register}>{"Create one"}</Link<Route>>
            </p>
        </form>
    }
}

/// `?role=` on registration links.
#[derive(Debug, Default, Deserialize)]
struct RegisterQuery {
    role: Option<String>,
}

#[function_component(RegisterPage)]
pub(crate) fn register_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let location = use_location();
    let preselected = location
        .and_then(|location| location.query::<RegisterQuery>().ok())
        .and_then(|query| query.role)
        .and_then(|role| Role::parse(&role));
    let state = use_state(move || RegisterState::with_role(preselected));
    let resume = use_state(ResumeSelection::<File>::default);
    let Some(api_ctx) = api_ctx else {
        return html! { <p class="error">{"Missing API context."}</p> };
    };

    let field = |key: &'static str, label: &'static str, kind: &'static str| {
        let on_input = {
            let state = state.clone();
            Callback::from(move |event: InputEvent| {
                if let Some(value) = input_value(&event) {
                    let mut next = (*state).clone();
                    next.set(key, &value);
                    state.set(next);
                }
            })
        };
        let value = match key {
            "username" => state.form.username.clone(),
            "email" => state.form.email.clone(),
            "password" => state.form.password.clone(),
            "password_confirmation" => state.form.password_confirmation.clone(),
            "first_name" => state.form.first_name.clone(),
            "last_name" => state.form.last_name.clone(),
            "phone" => state.form.phone.clone(),
            "company" => state.form.company.clone(),
            _ => String::new(),
        };
        let error = state.error(key).map(str::to_string);
        html! {
            <label class={classes!("field", error.is_some().then_some("invalid"))}>
                <span>{label}</span>
                <input type={kind} name={key} value={value} oninput={on_input} />
                {error.map(|message| html! { <p class="field-error">{message}</p> }).unwrap_or_default()}
            </label>
        }
    };
    let on_role = {
        let state = state.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<web_sys::HtmlSelectElement>() {
                let mut next = (*state).clone();
                next.set("role", &select.value());
                state.set(next);
            }
        })
    };
    let on_next = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*state).clone();
            next.next();
            state.set(next);
        })
    };
    let on_back = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*state).clone();
            next.back();
            state.set(next);
        })
    };
    let on_pick = {
        let resume = resume.clone();
        let max_bytes = api_ctx.config.max_resume_bytes;
        Callback::from(move |file: File| {
            let mut next = (*resume).clone();
            let name = file.name();
            let size = file_size(&file);
            next.pick(file, &name, size, max_bytes);
            resume.set(next);
        })
    };
    let onsubmit = {
        let state = state.clone();
        let resume = resume.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if resume.error.is_some() {
                return;
            }
            let mut next = (*state).clone();
            let request = next.submit();
            state.set(next.clone());
            let Some(request) = request else {
                return;
            };
            let file = if request.role == Role::Developer {
                resume.file.clone()
            } else {
                None
            };
            let api_ctx = api_ctx.clone();
            let navigator = navigator.clone();
            let state = state.clone();
            yew::platform::spawn_local(async move {
                match api_ctx.client.register(&request, file).await {
                    Ok(response) => {
                        next.succeed();
                        state.set(next);
                        api_ctx.establish(response);
                        api_ctx.notify(Notice::success(REGISTER_SUCCESS_MESSAGE));
                        if let Some(navigator) = navigator.as_ref() {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    Err(err) => {
                        let toast = next.fail(&err);
                        state.set(next);
                        api_ctx.notify_error(toast);
                    }
                }
            });
        })
    };

    let role = state.form.role;
    let step = match state.step {
        RegisterStep::Account => html! {
            <>
                {field("username", "Username", "text")}
                {field("email", "Email", "email")}
                {field("password", "Password", "password")}
                {field("password_confirmation", "Confirm password", "password")}
                <label class="field">
                    <span>{"I am a"}</span>
                    <select onchange={on_role}>
                        <option value="developer" selected={role == Role::Developer}>{"Developer looking for work"}</option>
                        <option value="employer" selected={role == Role::Employer}>{"Employer hiring talent"}</option>
                    </select>
                </label>
                <button type="button" onclick={on_next}>{"Next"}</button>
            </>
        },
        RegisterStep::Profile => html! {
            <>
                {field("first_name", "First name", "text")}
                {field("last_name", "Last name", "text")}
                {field("phone", "Phone (optional)", "tel")}
                if role == Role::Employer {
                    {field("company", "Company name", "text")}
                } else {
                    <ResumePicker
                        label="Resume (optional)"
                        on_pick={on_pick}
                        error={resume.error.clone().map(AttrValue::from)}
                    />
                }
                <div class="form-actions">
                    <button type="button" class="ghost" onclick={on_back}>{"Back"}</button>
                    <button type="submit" disabled={state.busy}>
                        {if state.busy { "Creating account..." } else { "Create account" }}
                    </button>
                </div>
            </>
        },
    };

    html! {
        <form class="auth-form" onsubmit={onsubmit}>
            <h1>{"Create your account"}</h1>
            {state.error(GENERAL_ERROR_KEY).map(|message| html! { <p class="form-error">{message.to_string()}</p> }).unwrap_or_default()}
            {step}
            <p class="muted">
                {"Already registered? "}
                <Link<Route> to={Route::Login}>{"Sign in"}</Link<Route>>
            </p>
        </form>
    }
}
