use chrono::{DateTime, Utc};
use contracts::system::auth::{AuthMeta, LoginResponse, SessionUser};

use crate::shared::data_table::prefs::{load_json, save_json, PrefStore};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const TOKEN_TYPE_KEY: &str = "token_type";
pub const USER_KEY: &str = "user";
pub const AUTH_KEY: &str = "auth";
pub const REMEMBER_ME_KEY: &str = "remember_me";

const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// Snapshot of the persisted session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub user: Option<SessionUser>,
    pub auth: Option<AuthMeta>,
}

impl Session {
    pub fn load(store: &dyn PrefStore) -> Self {
        Self {
            access_token: store.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty()),
            token_type: store.get(TOKEN_TYPE_KEY).filter(|t| !t.is_empty()),
            user: load_json(store, USER_KEY),
            auth: load_json(store, AUTH_KEY),
        }
    }

    /// `Authorization` header value, if a token is stored.
    pub fn authorization(&self) -> Option<String> {
        let token = self.access_token.as_ref()?;
        let kind = self.token_type.as_deref().unwrap_or(DEFAULT_TOKEN_TYPE);
        Some(format!("{} {}", kind, token))
    }

    /// Without metadata a session never expires locally; the backend decides.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.auth.as_ref().is_some_and(|meta| meta.is_expired(now))
    }
}

/// Persists a fresh login.
pub fn save_session(
    store: &dyn PrefStore,
    response: &LoginResponse,
    remember_me: bool,
    now: DateTime<Utc>,
) {
    store.set(ACCESS_TOKEN_KEY, &response.access_token);
    store.set(TOKEN_TYPE_KEY, &response.token_type);
    save_json(store, USER_KEY, &response.user);
    save_json(store, AUTH_KEY, &AuthMeta::new(now, response.expires_in));
    save_json(store, REMEMBER_ME_KEY, &remember_me);
}

/// Drops the session. `remember_me` survives so the login form keeps it.
pub fn clear_session(store: &dyn PrefStore) {
    for key in [ACCESS_TOKEN_KEY, TOKEN_TYPE_KEY, USER_KEY, AUTH_KEY] {
        store.remove(key);
    }
}

pub fn remember_me(store: &dyn PrefStore) -> bool {
    load_json(store, REMEMBER_ME_KEY).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data_table::prefs::MemoryPrefs;
    use chrono::{Duration, TimeZone};

    fn login() -> LoginResponse {
        LoginResponse {
            access_token: "tok".into(),
            token_type: "Bearer".into(),
            expires_in: 3600,
            user: SessionUser {
                id: 7,
                name: "Ann".into(),
                email: "ann@example.com".into(),
                role: Some("admin".into()),
            },
        }
    }

    #[test]
    fn test_save_load_clear() {
        let store = MemoryPrefs::default();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        save_session(&store, &login(), true, now);

        let session = Session::load(&store);
        assert_eq!(session.authorization().as_deref(), Some("Bearer tok"));
        assert_eq!(session.user.as_ref().map(|u| u.id), Some(7));
        assert!(!session.is_expired(now + Duration::minutes(59)));
        assert!(session.is_expired(now + Duration::hours(1)));

        clear_session(&store);
        assert_eq!(Session::load(&store), Session::default());
        assert!(remember_me(&store));
    }

    #[test]
    fn test_missing_metadata_never_expires() {
        let store = MemoryPrefs::default();
        store.set(ACCESS_TOKEN_KEY, "abc");
        let session = Session::load(&store);
        assert!(!session.is_expired(Utc::now()));
        assert_eq!(session.authorization().as_deref(), Some("Bearer abc"));
    }
}
