//! Top navigation; links depend on the signed-in role.

use crate::app::api::ApiCtx;
use crate::app::routes::Route;
use crate::core::store::AppStore;
use jobboard_api_models::Role;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

#[function_component(Navbar)]
pub(crate) fn navbar() -> Html {
    let session = use_selector(|store: &AppStore| store.session.clone());
    let api = use_context::<ApiCtx>();
    let navigator = use_navigator();

    let on_logout = Callback::from(move |_: MouseEvent| {
        if let Some(api) = api.as_ref() {
            api.logout();
        }
        if let Some(navigator) = navigator.as_ref() {
            navigator.push(&Route::Home);
        }
    });

    let account = match session.identity() {
        Some(identity) => {
            let can_post = matches!(identity.role, Role::Employer | Role::Admin);
            html! {
                <>
                    <Link<Route> to={Route::Dashboard}>{"Dashboard"}</Link<Route>>
                    if can_post {
                        <Link<Route> to={Route::PostJob}>{"Post a Job"}</Link<Route>>
                    }
                    <span class="muted user">{identity.display_name().to_string()}</span>
                    <button class="ghost" onclick={on_logout}>{"Logout"}</button>
                </>
            }
        }
        None => html! {
            <>
                <Link<Route> to={Route::Login}>{"Login"}</Link<Route>>
                <Link<Route> to={Route::Register} classes={classes!("button")}>{"Sign Up"}</Link<Route>>
            </>
        },
    };

    html! {
        <nav class="navbar">
            <Link<Route> to={Route::Home} classes={classes!("brand")}>{"JobBoard"}</Link<Route>>
            <div class="nav-links">
                <Link<Route> to={Route::Jobs}>{"Browse Jobs"}</Link<Route>>
                {account}
            </div>
        </nav>
    }
}
