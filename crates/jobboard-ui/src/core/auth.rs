//! Session primitives shared across the UI.
//!
//! # Design
//! - Keep session state as plain data; persistence goes through [`SessionStorage`].
//! - The bearer token is the only cross-cutting mutable value; it lives in a
//!   [`SharedCredential`] read by the API client on every request.
//! - Only [`SessionManager`] writes the credential and the session cookies.

use chrono::{DateTime, Duration, Utc};
use jobboard_api_models::{AuthResponse, Identity, Role};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Cookie holding the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
/// Cookie holding the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";
/// Cookie holding the serialized identity.
pub const IDENTITY_COOKIE: &str = "user";
/// Every cookie owned by the session, cleared together.
pub const SESSION_COOKIES: [&str; 3] = [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, IDENTITY_COOKIE];

/// Durable key/value storage with per-entry expiry (cookies in the browser).
pub trait SessionStorage {
    /// Read a stored value.
    fn read(&self, key: &str) -> Option<String>;
    /// Store a value that expires after `lifetime_days`.
    fn write(&mut self, key: &str, value: &str, lifetime_days: u32);
    /// Delete a value; missing keys are ignored.
    fn remove(&mut self, key: &str);
}

/// In-memory [`SessionStorage`] used off the browser.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    entries: BTreeMap<String, (String, u32)>,
}

impl MemoryStorage {
    /// Whether no entries are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lifetime recorded for `key`.
    #[must_use]
    pub fn lifetime_days(&self, key: &str) -> Option<u32> {
        self.entries.get(key).map(|(_, days)| *days)
    }
}

impl SessionStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|(value, _)| value.clone())
    }

    fn write(&mut self, key: &str, value: &str, lifetime_days: u32) {
        self.entries
            .insert(key.to_string(), (value.to_string(), lifetime_days));
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Value of `key` in a `document.cookie` string, percent-decoded.
#[must_use]
pub fn cookie_value(header: &str, key: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == key)
        .map(|(_, raw)| {
            urlencoding::decode(raw).map_or_else(|_| raw.to_string(), |value| value.into_owned())
        })
}

/// `document.cookie` assignment storing `value` under `key` until `expires`.
#[must_use]
pub fn cookie_assignment(key: &str, value: &str, expires: DateTime<Utc>) -> String {
    format!(
        "{key}={}; expires={}; path=/; SameSite=Lax",
        urlencoding::encode(value),
        expires.format("%a, %d %b %Y %H:%M:%S GMT")
    )
}

/// `document.cookie` assignment deleting `key`.
#[must_use]
pub fn cookie_removal(key: &str) -> String {
    format!("{key}=; expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/; SameSite=Lax")
}

/// Expiry of a cookie written at `now` that lives `lifetime_days`.
#[must_use]
pub fn cookie_expiry(now: DateTime<Utc>, lifetime_days: u32) -> DateTime<Utc> {
    now + Duration::days(i64::from(lifetime_days))
}

/// Authenticated session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// Cached identity.
    pub identity: Identity,
    /// Bearer token.
    pub access_token: String,
    /// Refresh token, when one was issued.
    pub refresh_token: Option<String>,
}

impl Session {
    /// Session created from a login or registration response.
    #[must_use]
    pub fn from_auth(response: AuthResponse) -> Self {
        Self {
            identity: response.user,
            access_token: response.access,
            refresh_token: Some(response.refresh).filter(|token| !token.is_empty()),
        }
    }

    /// Role of the signed-in identity.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.identity.role
    }
}

/// Bearer token shared between the session and the API client.
#[derive(Clone, Default)]
pub struct SharedCredential(Rc<RefCell<Option<String>>>);

impl SharedCredential {
    /// Replace the current token; blank tokens clear it.
    pub fn set(&self, token: Option<String>) {
        *self.0.borrow_mut() = token.filter(|value| !value.trim().is_empty());
    }

    /// Current token.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.0.borrow().clone()
    }

    /// `Authorization` header value for the current token.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.0.borrow().as_ref().map(|token| format!("Bearer {token}"))
    }
}

impl PartialEq for SharedCredential {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SharedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedCredential")
            .field("present", &self.0.borrow().is_some())
            .finish()
    }
}

/// Why a stored session could not be restored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestoreError {
    /// Token or identity cookie missing.
    Missing,
    /// Identity cookie was not valid JSON; all cookies were cleared.
    Corrupt,
}

/// Owns session persistence and the shared credential.
#[derive(Debug)]
pub struct SessionManager<S> {
    storage: S,
    credential: SharedCredential,
    lifetime_days: u32,
}

impl<S: SessionStorage> SessionManager<S> {
    /// Build a manager over `storage` writing cookies that live `lifetime_days`.
    pub const fn new(storage: S, credential: SharedCredential, lifetime_days: u32) -> Self {
        Self {
            storage,
            credential,
            lifetime_days,
        }
    }

    /// Credential handle the API client reads.
    #[must_use]
    pub const fn credential(&self) -> &SharedCredential {
        &self.credential
    }

    /// Backing storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Whether an access token is persisted.
    #[must_use]
    pub fn has_stored_token(&self) -> bool {
        self.storage
            .read(ACCESS_TOKEN_COOKIE)
            .is_some_and(|token| !token.is_empty())
    }

    /// Restore the persisted session.
    ///
    /// # Errors
    /// Returns [`RestoreError::Missing`] when token or identity is absent and
    /// [`RestoreError::Corrupt`] when the identity cookie fails to parse, in
    /// which case every session cookie is removed.
    pub fn restore(&mut self) -> Result<Session, RestoreError> {
        let token = self
            .storage
            .read(ACCESS_TOKEN_COOKIE)
            .filter(|token| !token.is_empty());
        let identity = self.storage.read(IDENTITY_COOKIE);
        let (Some(access_token), Some(raw_identity)) = (token, identity) else {
            return Err(RestoreError::Missing);
        };
        let Ok(identity) = serde_json::from_str::<Identity>(&raw_identity) else {
            self.clear();
            return Err(RestoreError::Corrupt);
        };
        self.credential.set(Some(access_token.clone()));
        Ok(Session {
            identity,
            access_token,
            refresh_token: self.storage.read(REFRESH_TOKEN_COOKIE),
        })
    }

    /// Persist a fresh login/registration and publish its credential.
    pub fn establish(&mut self, response: AuthResponse) -> Session {
        let session = Session::from_auth(response);
        self.storage
            .write(ACCESS_TOKEN_COOKIE, &session.access_token, self.lifetime_days);
        match &session.refresh_token {
            Some(refresh) => self
                .storage
                .write(REFRESH_TOKEN_COOKIE, refresh, self.lifetime_days),
            None => self.storage.remove(REFRESH_TOKEN_COOKIE),
        }
        self.write_identity(&session.identity);
        self.credential.set(Some(session.access_token.clone()));
        session
    }

    /// Re-persist a refreshed identity.
    pub fn replace_identity(&mut self, identity: &Identity) {
        self.write_identity(identity);
    }

    /// Drop the credential and every session cookie.
    pub fn clear(&mut self) {
        self.credential.set(None);
        for key in SESSION_COOKIES {
            self.storage.remove(key);
        }
    }

    fn write_identity(&mut self, identity: &Identity) {
        if let Ok(raw) = serde_json::to_string(identity) {
            self.storage
                .write(IDENTITY_COOKIE, &raw, self.lifetime_days);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        serde_json::from_value(serde_json::json!({
            "id": 3,
            "username": "ada",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "role": "developer"
        }))
        .expect("identity")
    }

    fn manager() -> SessionManager<MemoryStorage> {
        SessionManager::new(MemoryStorage::default(), SharedCredential::default(), 7)
    }

    fn auth() -> AuthResponse {
        AuthResponse {
            access: "access-1".into(),
            refresh: "refresh-1".into(),
            user: identity(),
        }
    }

    #[test]
    fn establish_persists_three_cookies_for_seven_days() {
        let mut manager = manager();
        let session = manager.establish(auth());
        assert_eq!(session.identity.username, "ada");
        for key in SESSION_COOKIES {
            assert_eq!(manager.storage().lifetime_days(key), Some(7), "{key}");
        }
        assert_eq!(
            manager.credential().authorization().as_deref(),
            Some("Bearer access-1")
        );
    }

    #[test]
    fn login_without_refresh_token_drops_the_old_one() {
        let mut manager = manager();
        manager.establish(auth());
        let session = manager.establish(AuthResponse {
            access: "access-2".into(),
            refresh: String::new(),
            user: identity(),
        });
        assert_eq!(session.refresh_token, None);
        assert_eq!(manager.storage().read(REFRESH_TOKEN_COOKIE), None);
        assert_eq!(manager.storage().read(ACCESS_TOKEN_COOKIE).as_deref(), Some("access-2"));
    }

    #[test]
    fn clear_removes_cookies_and_credential() {
        let mut manager = manager();
        let client_view = manager.credential().clone();
        manager.establish(auth());
        manager.clear();
        assert!(manager.storage().is_empty());
        assert!(client_view.authorization().is_none());
        assert!(!manager.has_stored_token());
    }

    #[test]
    fn restore_round_trips_persisted_session() {
        let mut manager = manager();
        let written = manager.establish(auth());
        manager.credential().set(None);
        let restored = manager.restore().expect("restored");
        assert_eq!(restored, written);
        assert_eq!(manager.credential().token().as_deref(), Some("access-1"));
    }

    #[test]
    fn restore_requires_token_and_identity() {
        let mut storage = MemoryStorage::default();
        storage.write(ACCESS_TOKEN_COOKIE, "t", 7);
        let mut manager = SessionManager::new(storage, SharedCredential::default(), 7);
        assert_eq!(manager.restore(), Err(RestoreError::Missing));
        assert!(manager.credential().token().is_none());
    }

    #[test]
    fn corrupt_identity_clears_everything() {
        let mut storage = MemoryStorage::default();
        storage.write(ACCESS_TOKEN_COOKIE, "t", 7);
        storage.write(REFRESH_TOKEN_COOKIE, "r", 7);
        storage.write(IDENTITY_COOKIE, "{not json", 7);
        let mut manager = SessionManager::new(storage, SharedCredential::default(), 7);
        assert_eq!(manager.restore(), Err(RestoreError::Corrupt));
        assert!(manager.storage().is_empty());
    }

    #[test]
    fn cookies_are_encoded_and_parsed() {
        let expires = DateTime::parse_from_rfc3339("2024-01-08T10:00:00Z")
            .expect("timestamp")
            .with_timezone(&Utc);
        let raw = r#"{"id":3,"username":"ada"}"#;
        let assignment = cookie_assignment(IDENTITY_COOKIE, raw, expires);
        assert!(assignment.starts_with("user=%7B%22id%22%3A3"));
        assert!(assignment.contains("expires=Mon, 08 Jan 2024 10:00:00 GMT; path=/"));

        let encoded = urlencoding::encode(raw);
        let header = format!("theme=dark; user={encoded}; accessToken=abc");
        assert_eq!(cookie_value(&header, IDENTITY_COOKIE).as_deref(), Some(raw));
        assert_eq!(cookie_value(&header, ACCESS_TOKEN_COOKIE).as_deref(), Some("abc"));
        assert_eq!(cookie_value(&header, REFRESH_TOKEN_COOKIE), None);
        assert!(cookie_removal(ACCESS_TOKEN_COOKIE).contains("1970"));
        assert_eq!(cookie_expiry(expires, 7).to_rfc3339(), "2024-01-15T10:00:00+00:00");
    }

    #[test]
    fn blank_tokens_do_not_produce_headers() {
        let credential = SharedCredential::default();
        credential.set(Some("   ".into()));
        assert!(credential.authorization().is_none());
    }
}
