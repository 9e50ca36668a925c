use chrono::{DateTime, Utc};
use contracts::system::auth::SessionUser;
use leptos::prelude::*;

use super::storage::{clear_session, Session};
use crate::shared::data_table::prefs::PrefStore;

pub const ADMIN_ROLE: &str = "admin";

/// Who is signed in. Provided once by `App`.
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub user: RwSignal<Option<SessionUser>>,
}

/// The stored user, if the session still carries a token and has not run
/// past its TTL.
pub fn restored_user(session: &Session, now: DateTime<Utc>) -> Option<SessionUser> {
    if session.access_token.is_none() || session.is_expired(now) {
        return None;
    }
    session.user.clone()
}

impl AuthContext {
    pub fn restore(store: &dyn PrefStore, now: DateTime<Utc>) -> Self {
        let session = Session::load(store);
        let user = restored_user(&session, now);
        if user.is_none() && session.access_token.is_some() {
            log::info!("stored session expired, signing out");
            clear_session(store);
        }
        Self {
            user: RwSignal::new(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.with(Option::is_some)
    }

    pub fn is_admin(&self) -> bool {
        self.user
            .with(|u| u.as_ref().and_then(|u| u.role.as_deref()) == Some(ADMIN_ROLE))
    }

    pub fn sign_in(&self, user: SessionUser) {
        log::info!("signed in as {}", user.email);
        self.user.set(Some(user));
    }

    pub fn sign_out(&self, store: &dyn PrefStore) {
        clear_session(store);
        self.user.set(None);
    }
}

pub fn provide_auth(auth: AuthContext) {
    provide_context(auth);
}

pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data_table::prefs::MemoryPrefs;
    use crate::system::auth::storage::{save_session, ACCESS_TOKEN_KEY};
    use chrono::{Duration, TimeZone};
    use contracts::system::auth::LoginResponse;

    fn user() -> SessionUser {
        SessionUser {
            id: 3,
            name: "Bo".into(),
            email: "bo@example.com".into(),
            role: Some("manager".into()),
        }
    }

    #[test]
    fn test_restored_user_needs_live_token() {
        let store = MemoryPrefs::default();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let login = LoginResponse {
            access_token: "t".into(),
            token_type: "Bearer".into(),
            expires_in: 600,
            user: user(),
        };
        save_session(&store, &login, false, now);
        let session = Session::load(&store);

        assert_eq!(restored_user(&session, now + Duration::minutes(5)), Some(user()));
        assert_eq!(restored_user(&session, now + Duration::minutes(10)), None);

        store.remove(ACCESS_TOKEN_KEY);
        assert_eq!(restored_user(&Session::load(&store), now), None);
    }
}
