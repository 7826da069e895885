//! App shell: context wiring, routing and boot-time session restore.
//!
//! # Design
//! - One `ApiCtx` per boot, memoized and provided to the whole tree.
//! - Protected routes are wrapped in `RequireSession`; pages assume a session inside it.

pub(crate) mod api;
pub(crate) mod preferences;
pub(crate) mod routes;

use crate::app::api::ApiCtx;
use crate::app::routes::Route;
use crate::components::empty_state::EmptyState;
use crate::components::guard::RequireSession;
use crate::components::navbar::Navbar;
use crate::components::toast::ToastHost;
use crate::config::UiConfig;
use crate::core::store::AppStore;
use crate::features::auth::logic::EMPLOYERS_ONLY_MESSAGE;
use crate::features::auth::view::{LoginPage, RegisterPage};
use crate::features::dashboard::view::DashboardPage;
use crate::features::jobs::view::{JobDetailPage, JobsPage};
use crate::features::postings::view::{EditJobPage, PostJobPage};
use crate::features::recommendations::view::RecommendationsPanel;
use jobboard_api_models::Role;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

/// Wall-clock milliseconds for debounce bookkeeping.
pub(crate) fn now_ms() -> u64 {
    let now = js_sys::Date::now();
    if now.is_finite() && now > 0.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let millis = now as u64;
        millis
    } else {
        0
    }
}

#[function_component(JobBoardApp)]
pub(crate) fn jobboard_app() -> Html {
    let api_ctx = use_memo(|_| ApiCtx::new(UiConfig::from_build_env()), ());
    {
        let api_ctx = (*api_ctx).clone();
        use_effect_with_deps(
            move |_| {
                api_ctx.restore();
                || ()
            },
            (),
        );
    }

    html! {
        <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
            <BrowserRouter>
                <Navbar />
                <ToastHost />
                <main class="content">
                    <Switch<Route> render={switch} />
                </main>
            </BrowserRouter>
        </ContextProvider<ApiCtx>>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <HomePage /> },
        Route::Jobs => html! { <JobsPage /> },
        Route::JobDetail { id } => html! { <JobDetailPage id={id} /> },
        Route::Login => html! { <LoginPage /> },
        Route::Register => html! { <RegisterPage /> },
        Route::Dashboard => html! {
            <RequireSession><DashboardPage /></RequireSession>
        },
        Route::PostJob => html! {
            <RequireSession
                any_of={vec![Role::Employer, Role::Admin]}
                denied={AttrValue::Static(EMPLOYERS_ONLY_MESSAGE)}
            >
                <PostJobPage />
            </RequireSession>
        },
        Route::EditJob { id } => html! {
            <RequireSession any_of={vec![Role::Employer, Role::Admin]}>
                <EditJobPage id={id} />
            </RequireSession>
        },
        Route::NotFound => html! {
            <EmptyState
                title="Page not found"
                description={AttrValue::from("The page you are looking for does not exist.")}
            >
                <Link<Route> to={Route::Home} classes={classes!("button")}>{"Go home"}</Link<Route>>
            </EmptyState>
        },
    }
}

#[function_component(HomePage)]
fn home_page() -> Html {
    let role = use_selector(|store: &AppStore| store.session.role());
    html! {
        <section class="home">
            <div class="hero">
                <h1>{"Find your next role"}</h1>
                <p class="muted">{"Browse open positions from companies hiring right now."}</p>
                <div class="hero-actions">
                    <Link<Route> to={Route::Jobs} classes={classes!("button")}>{"Browse Jobs"}</Link<Route>>
                    if role.is_none() {
                        <Link<Route> to={Route::Register} classes={classes!("button", "ghost")}>{"Create an account"}</Link<Route>>
                    }
                </div>
            </div>
            if *role == Some(Role::Developer) {
                <RecommendationsPanel />
            }
        </section>
    }
}

/// Mount the app into `#root`, or the document body when absent.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<JobBoardApp>::with_root(root).render();
    } else {
        yew::Renderer::<JobBoardApp>::new().render();
    }
}
