//! API client and session context shared by every page.
//!
//! # Design
//! - Create exactly one API client and one session manager per app boot.
//! - Session writes (cookies, credential, store) happen only through this context.
//! - Any 401 funnels into [`ApiCtx::expire_session`].

use crate::app::preferences::DocumentCookies;
use crate::app::routes::Route;
use crate::config::UiConfig;
use crate::core::auth::{RestoreError, SessionManager, SharedCredential};
use crate::core::errors::ApiError;
use crate::core::store::{self, AppStore};
use crate::features::auth::logic::{LOGGED_OUT_MESSAGE, SESSION_EXPIRED_MESSAGE};
use crate::models::{Notice, ToastKind};
use crate::services::api::ApiClient;
use gloo::console;
use jobboard_api_models::AuthResponse;
use std::cell::RefCell;
use std::rc::Rc;
use yew_router::prelude::Navigator;
use yewdux::prelude::Dispatch;

/// Shared API client and session context for UI services.
#[derive(Clone)]
pub(crate) struct ApiCtx {
    /// Singleton API client instance.
    pub client: Rc<ApiClient>,
    /// Resolved build configuration.
    pub config: Rc<UiConfig>,
    session: Rc<RefCell<SessionManager<DocumentCookies>>>,
}

impl ApiCtx {
    /// Wire the client and session manager around one shared credential.
    pub(crate) fn new(config: UiConfig) -> Self {
        let credential = SharedCredential::default();
        let session = SessionManager::new(
            DocumentCookies,
            credential.clone(),
            config.session_lifetime_days,
        );
        Self {
            client: Rc::new(ApiClient::new(config.backend_url.clone(), credential)),
            config: Rc::new(config),
            session: Rc::new(RefCell::new(session)),
        }
    }

    /// Restore the persisted session into the store, then refresh the identity.
    pub(crate) fn restore(&self) {
        let restored = self.session.borrow_mut().restore();
        let dispatch = Dispatch::<AppStore>::new();
        match restored {
            Ok(session) => {
                dispatch.reduce_mut(|state| store::sign_in(state, session));
                let ctx = self.clone();
                yew::platform::spawn_local(async move { ctx.refresh_identity().await });
            }
            Err(RestoreError::Corrupt) => {
                console::error!("stored identity was unreadable; session cleared");
                dispatch.reduce_mut(store::mark_restored);
            }
            Err(RestoreError::Missing) => dispatch.reduce_mut(store::mark_restored),
        }
    }

    /// Persist a login or registration response and publish the session.
    pub(crate) fn establish(&self, response: AuthResponse) {
        let session = self.session.borrow_mut().establish(response);
        Dispatch::<AppStore>::new().reduce_mut(|state| store::sign_in(state, session));
    }

    /// Re-read the identity from the server; failures are only logged.
    pub(crate) async fn refresh_identity(&self) {
        if !self.session.borrow().has_stored_token() {
            return;
        }
        match self.client.current_user().await {
            Ok(identity) => {
                self.session.borrow_mut().replace_identity(&identity);
                Dispatch::<AppStore>::new()
                    .reduce_mut(|state| store::replace_identity(state, identity));
            }
            Err(err) => console::error!(format!("identity refresh failed: {err}")),
        }
    }

    /// User-initiated logout.
    pub(crate) fn logout(&self) {
        self.drop_session();
        self.notify(Notice::info(LOGGED_OUT_MESSAGE));
    }

    /// Forced logout after a 401: clear, notify, send to login.
    pub(crate) fn expire_session(&self, navigator: Option<&Navigator>) {
        self.drop_session();
        self.notify(Notice::error(SESSION_EXPIRED_MESSAGE));
        if let Some(navigator) = navigator {
            navigator.push(&Route::Login);
        }
    }

    /// Apply the session policy to `err`; `true` when it was a 401.
    pub(crate) fn intercept(&self, err: &ApiError, navigator: Option<&Navigator>) -> bool {
        if err.is_unauthorized() {
            self.expire_session(navigator);
            return true;
        }
        false
    }

    /// Queue a toast.
    pub(crate) fn notify(&self, notice: Notice) {
        Dispatch::<AppStore>::new().reduce_mut(|state| {
            store::push_notice(state, notice);
        });
    }

    /// Queue an error toast.
    pub(crate) fn notify_error(&self, message: impl Into<String>) {
        Dispatch::<AppStore>::new().reduce_mut(|state| {
            store::push_toast(state, ToastKind::Error, message);
        });
    }

    fn drop_session(&self) {
        self.session.borrow_mut().clear();
        Dispatch::<AppStore>::new().reduce_mut(store::sign_out);
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}
