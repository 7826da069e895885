//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep the session and the toast queue in one store instead of ad-hoc contexts.
//! - Session writes go through [`sign_in`], [`sign_out`] and [`replace_identity`] only.
//! - Feature pages keep their own list state; it is never shared.

use crate::core::auth::Session;
use crate::models::{Notice, Toast, ToastKind};
use jobboard_api_models::{Identity, Role};
use std::collections::BTreeSet;
use yewdux::store::Store;

/// Global application store for shared state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Store)]
pub struct AppStore {
    /// Authentication state.
    pub session: SessionSlice,
    /// Pending notifications.
    pub toasts: ToastSlice,
}

/// Session visible to the component tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionSlice {
    /// Active session, if signed in.
    pub current: Option<Session>,
    /// Whether boot-time restoration has run.
    pub restored: bool,
}

impl SessionSlice {
    /// Signed-in identity.
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.current.as_ref().map(|session| &session.identity)
    }

    /// Role of the signed-in identity.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.current.as_ref().map(Session::role)
    }

    /// Whether a session is active.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}

/// Toast queue with monotonic identifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastSlice {
    /// Visible toasts, oldest first.
    pub items: Vec<Toast>,
    /// Identifier assigned to the next toast.
    pub next_id: u64,
}

/// Record a restored or freshly established session.
pub fn sign_in(store: &mut AppStore, session: Session) {
    store.session.current = Some(session);
    store.session.restored = true;
}

/// Mark restoration finished without a session.
pub fn mark_restored(store: &mut AppStore) {
    store.session.restored = true;
}

/// Drop the in-memory session.
pub fn sign_out(store: &mut AppStore) {
    store.session.current = None;
}

/// Swap the cached identity after a refresh; ignored when signed out.
pub fn replace_identity(store: &mut AppStore, identity: Identity) {
    if let Some(session) = store.session.current.as_mut() {
        session.identity = identity;
    }
}

/// Queue a toast and return its identifier.
pub fn push_toast(store: &mut AppStore, kind: ToastKind, message: impl Into<String>) -> u64 {
    let id = store.toasts.next_id;
    store.toasts.next_id += 1;
    store.toasts.items.push(Toast {
        id,
        message: message.into(),
        kind,
    });
    id
}

/// Queue a controller notice.
pub fn push_notice(store: &mut AppStore, notice: Notice) -> u64 {
    push_toast(store, notice.kind, notice.message)
}

/// Remove a toast by identifier.
pub fn dismiss_toast(store: &mut AppStore, id: u64) {
    store.toasts.items.retain(|toast| toast.id != id);
}

/// Timer bookkeeping for the toast queue.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastTimers {
    /// Queued toasts that still need a dismiss timer.
    pub arm: Vec<u64>,
    /// Armed ids whose toast has left the queue.
    pub release: Vec<u64>,
}

/// Diff armed timer ids against the queue; existing timers keep running.
#[must_use]
pub fn toast_timer_changes(armed: &BTreeSet<u64>, toasts: &[Toast]) -> ToastTimers {
    let queued: BTreeSet<u64> = toasts.iter().map(|toast| toast.id).collect();
    ToastTimers {
        arm: queued.difference(armed).copied().collect(),
        release: armed.difference(&queued).copied().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobboard_api_models::AuthResponse;

    fn session(role: &str) -> Session {
        let user: Identity = serde_json::from_value(serde_json::json!({
            "id": 1,
            "username": "grace",
            "role": role
        }))
        .expect("identity");
        Session::from_auth(AuthResponse {
            access: "a".into(),
            refresh: "r".into(),
            user,
        })
    }

    #[test]
    fn sign_in_and_out_toggle_session() {
        let mut store = AppStore::default();
        assert!(!store.session.restored);
        sign_in(&mut store, session("employer"));
        assert_eq!(store.session.role(), Some(Role::Employer));
        sign_out(&mut store);
        assert!(!store.session.is_authenticated());
        assert!(store.session.restored);
    }

    #[test]
    fn identity_refresh_requires_session() {
        let mut store = AppStore::default();
        let mut identity = session("developer").identity;
        identity.first_name = "Grace".into();
        replace_identity(&mut store, identity.clone());
        assert!(store.session.identity().is_none());

        sign_in(&mut store, session("developer"));
        replace_identity(&mut store, identity);
        assert_eq!(
            store.session.identity().map(|who| who.first_name.as_str()),
            Some("Grace")
        );
    }

    #[test]
    fn toasts_get_unique_ids_and_dismiss() {
        let mut store = AppStore::default();
        let first = push_toast(&mut store, ToastKind::Info, "one");
        let second = push_notice(&mut store, Notice::error("two"));
        assert_ne!(first, second);
        dismiss_toast(&mut store, first);
        assert_eq!(store.toasts.items.len(), 1);
        assert_eq!(store.toasts.items[0].kind, ToastKind::Error);
    }

    #[test]
    fn new_toasts_leave_running_timers_alone() {
        let mut store = AppStore::default();
        let first = push_toast(&mut store, ToastKind::Info, "one");
        let armed = BTreeSet::from([first]);
        let second = push_toast(&mut store, ToastKind::Success, "two");
        let changes = toast_timer_changes(&armed, &store.toasts.items);
        assert_eq!(changes.arm, vec![second]);
        assert!(changes.release.is_empty());

        dismiss_toast(&mut store, first);
        let armed = BTreeSet::from([first, second]);
        let changes = toast_timer_changes(&armed, &store.toasts.items);
        assert!(changes.arm.is_empty());
        assert_eq!(changes.release, vec![first]);
    }
}
