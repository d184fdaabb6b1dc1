//! Bearer-token session kept in browser storage.
//!
//! The token is a JWT issued by `/api/auth/login`. The client never checks the
//! signature; it only reads the `exp` and `sub` claims to decide whether the
//! user is logged in and who they are.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use leptos::logging::{log, warn};
use serde::Deserialize;

use crate::config::TOKEN_STORAGE_KEY;
use crate::error::SessionError;

/// Claims the client cares about.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Claims {
    /// NumericDate; issuers may send fractional seconds.
    pub exp: f64,
    #[serde(default, alias = "username")]
    pub sub: Option<String>,
}

/// Decodes the payload segment of a JWT without verifying it.
pub fn decode_claims(token: &str) -> Result<Claims, SessionError> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(SessionError::Malformed);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_| SessionError::Encoding)?;

    serde_json::from_slice(&bytes).map_err(|e| SessionError::Claims(e.to_string()))
}

/// True iff a token is present, parses, and expires strictly after `now`
/// (seconds since the Unix epoch).
pub fn is_session_valid(token: Option<&str>, now: i64) -> bool {
    match token.map(decode_claims) {
        Some(Ok(claims)) => claims.exp > now as f64,
        _ => false,
    }
}

fn now_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Somewhere to keep the raw token between page loads.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

/// `window.localStorage` under [`TOKEN_STORAGE_KEY`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, SessionError> {
        let window = web_sys::window().ok_or_else(|| SessionError::Storage("no window".into()))?;
        window
            .local_storage()
            .map_err(|e| SessionError::Storage(format!("{e:?}")))?
            .ok_or_else(|| SessionError::Storage("localStorage disabled".into()))
    }
}

impl TokenStore for LocalStorage {
    fn load(&self) -> Option<String> {
        Self::storage()
            .ok()?
            .get_item(TOKEN_STORAGE_KEY)
            .ok()
            .flatten()
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        Self::storage()?
            .set_item(TOKEN_STORAGE_KEY, token)
            .map_err(|e| SessionError::Storage(format!("{e:?}")))
    }

    fn clear(&self) -> Result<(), SessionError> {
        Self::storage()?
            .remove_item(TOKEN_STORAGE_KEY)
            .map_err(|e| SessionError::Storage(format!("{e:?}")))
    }
}

/// In-process store, used off the browser and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<&'static str, String>>>,
}

impl TokenStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.entries.borrow().get(TOKEN_STORAGE_KEY).cloned()
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        self.entries
            .borrow_mut()
            .insert(TOKEN_STORAGE_KEY, token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.entries.borrow_mut().remove(TOKEN_STORAGE_KEY);
        Ok(())
    }
}

/// Handle to the current session. Cheap to clone; all clones share a store.
#[derive(Clone)]
pub struct Session {
    store: Rc<dyn TokenStore>,
    clock: fn() -> i64,
}

impl Session {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            store: Rc::new(store),
            clock: now_timestamp,
        }
    }

    /// Session backed by the browser's `localStorage`.
    pub fn browser() -> Self {
        Self::new(LocalStorage)
    }

    /// Replaces the wall clock; expiry is compared against `clock()`.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn token(&self) -> Option<String> {
        self.store.load()
    }

    pub fn store_token(&self, token: &str) -> Result<(), SessionError> {
        self.store.save(token)?;
        log!("[SESSION] Token stored");
        Ok(())
    }

    pub fn logout(&self) {
        match self.store.clear() {
            Ok(()) => log!("[SESSION] Logged out"),
            Err(e) => warn!("[SESSION] Failed to clear token: {}", e),
        }
    }

    /// Checks the stored token against the clock. A stale or unreadable
    /// token is dropped so later checks start clean.
    pub fn is_logged_in(&self) -> bool {
        let token = self.token();
        if is_session_valid(token.as_deref(), (self.clock)()) {
            return true;
        }
        if token.is_some() {
            log!("[SESSION] Discarding expired or malformed token");
            self.logout();
        }
        false
    }

    /// Username from the `sub` claim of a valid token.
    pub fn username(&self) -> Option<String> {
        if !self.is_logged_in() {
            return None;
        }
        self.token()
            .and_then(|token| decode_claims(&token).ok())
            .and_then(|claims| claims.sub)
    }

    /// Value for the `Authorization` header, only while the session is valid.
    pub fn bearer_header(&self) -> Option<String> {
        if !self.is_logged_in() {
            return None;
        }
        self.token().map(|token| format!("Bearer {token}"))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("has_token", &self.token().is_some())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const NOW: i64 = 1_700_000_000;

    pub(crate) fn fixed_clock() -> i64 {
        NOW
    }

    /// Builds an unsigned JWT-shaped token around `payload`.
    pub(crate) fn make_token(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload);
        format!("{header}.{body}.signature")
    }

    pub(crate) fn test_session() -> Session {
        Session::new(MemoryStore::default()).with_clock(fixed_clock)
    }

    #[test]
    fn missing_token_is_invalid() {
        assert!(!is_session_valid(None, NOW));
    }

    #[test]
    fn malformed_tokens_are_invalid() {
        assert!(!is_session_valid(Some(""), NOW));
        assert!(!is_session_valid(Some("not-a-token"), NOW));
        assert!(!is_session_valid(Some("a.%%%.c"), NOW));
        let not_json = format!("h.{}.s", URL_SAFE_NO_PAD.encode("plain text"));
        assert!(!is_session_valid(Some(&not_json), NOW));
        let no_exp = make_token(r#"{"sub":"ana"}"#);
        assert!(!is_session_valid(Some(&no_exp), NOW));
    }

    #[test]
    fn expiry_is_compared_strictly() {
        let expired = make_token(&format!(r#"{{"exp":{}}}"#, NOW - 1));
        let at_now = make_token(&format!(r#"{{"exp":{NOW}}}"#));
        let future = make_token(&format!(r#"{{"exp":{}}}"#, NOW + 60));
        assert!(!is_session_valid(Some(&expired), NOW));
        assert!(!is_session_valid(Some(&at_now), NOW));
        assert!(is_session_valid(Some(&future), NOW));
    }

    #[test]
    fn fractional_expiry_is_accepted() {
        let live = make_token(&format!(r#"{{"exp":{}.5,"sub":"ana"}}"#, NOW + 3600));
        let claims = decode_claims(&live).unwrap();
        assert_eq!(claims.exp, (NOW + 3600) as f64 + 0.5);
        assert!(is_session_valid(Some(&live), NOW));

        let just_past = make_token(&format!(r#"{{"exp":{}.5}}"#, NOW - 1));
        assert!(!is_session_valid(Some(&just_past), NOW));

        let session = test_session();
        session.store_token(&live).unwrap();
        assert!(session.is_logged_in());
        assert_eq!(session.token().as_deref(), Some(live.as_str()));
    }

    #[test]
    fn padded_payload_still_decodes() {
        let token = make_token(r#"{"exp":1,"sub":"x"}"#);
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        parts[1].push_str("==");
        let claims = decode_claims(&parts.join(".")).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("x"));
    }

    #[test]
    fn username_comes_from_sub_claim() {
        let session = test_session();
        let token = make_token(&format!(r#"{{"exp":{},"sub":"ana"}}"#, NOW + 3600));
        session.store_token(&token).unwrap();
        assert!(session.is_logged_in());
        assert_eq!(session.username().as_deref(), Some("ana"));
        assert_eq!(session.bearer_header(), Some(format!("Bearer {token}")));
    }

    #[test]
    fn expired_token_is_cleared_and_not_attached() {
        let session = test_session();
        let token = make_token(&format!(r#"{{"exp":{},"sub":"ana"}}"#, NOW - 10));
        session.store_token(&token).unwrap();
        assert_eq!(session.bearer_header(), None);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn logout_removes_token() {
        let session = test_session();
        session
            .store_token(&make_token(&format!(r#"{{"exp":{}}}"#, NOW + 1)))
            .unwrap();
        let clone = session.clone();
        clone.logout();
        assert!(!session.is_logged_in());
        assert_eq!(session.username(), None);
    }
}
