//! The one HTTP client every page goes through.
//!
//! Injects the bearer token and JSON headers, refuses locally when the stored
//! session is past its TTL and turns a 401 on a protected route into a session
//! wipe plus a redirect to the login page.

use chrono::{DateTime, Utc};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::storage::{clear_session, Session};
use crate::shared::api_utils::{api_base, build_url, current_path};
use crate::shared::config::AppConfig;
use crate::shared::data_table::prefs::{LocalStoragePrefs, PrefStore};
use crate::shared::data_table::TableError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// A downloaded file.
#[derive(Debug, Clone)]
pub struct BlobResponse {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiGateway {
    base: String,
    login_route: String,
    public_routes: Vec<String>,
}

impl ApiGateway {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_base(api_base(config.api.port), config)
    }

    pub fn with_base(base: String, config: &AppConfig) -> Self {
        Self {
            base,
            login_route: config.auth.login_route.clone(),
            public_routes: config.auth.public_routes.clone(),
        }
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    pub fn is_public(&self, path: &str) -> bool {
        let path = path.split('?').next().unwrap_or(path);
        self.public_routes.iter().any(|r| r == path)
    }

    /// Headers for a request, or [`TableError::SessionExpired`] when a
    /// protected route is called with a session past its TTL.
    pub fn request_headers(
        &self,
        method: HttpMethod,
        path: &str,
        session: &Session,
        now: DateTime<Utc>,
    ) -> Result<Vec<(&'static str, String)>, TableError> {
        let public = self.is_public(path);
        if !public && session.is_expired(now) {
            return Err(TableError::SessionExpired);
        }
        let mut headers = vec![("Accept", "application/json".to_string())];
        if method != HttpMethod::Get {
            headers.push(("Content-Type", "application/json".to_string()));
        }
        if let Some(auth) = session.authorization() {
            headers.push(("Authorization", auth));
        }
        if method == HttpMethod::Get {
            headers.push(("Cache-Control", "no-cache".to_string()));
            headers.push(("Pragma", "no-cache".to_string()));
            headers.push(("Expires", "0".to_string()));
        }
        Ok(headers)
    }

    /// Session wipe after a 401 or a local expiry. Returns where to go,
    /// `None` for public routes or when already on the login page.
    pub fn on_unauthorized(
        &self,
        path: &str,
        location: &str,
        store: &dyn PrefStore,
    ) -> Option<String> {
        if self.is_public(path) {
            return None;
        }
        clear_session(store);
        if location.starts_with(&self.login_route) {
            None
        } else {
            Some(self.login_route.clone())
        }
    }

    fn builder(
        &self,
        method: HttpMethod,
        path: &str,
        pairs: &[(String, String)],
    ) -> Result<RequestBuilder, TableError> {
        let url = build_url(&self.base, path, pairs);
        let mut builder = match method {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
            HttpMethod::Put => Request::put(&url),
            HttpMethod::Delete => Request::delete(&url),
        };
        let session = Session::load(&LocalStoragePrefs);
        match self.request_headers(method, path, &session, Utc::now()) {
            Ok(headers) => {
                for (name, value) in headers {
                    builder = builder.header(name, &value);
                }
                Ok(builder)
            }
            Err(e) => {
                log::warn!("session expired before {} {}", method_name(method), path);
                self.redirect_unauthorized(path);
                Err(e)
            }
        }
    }

    fn redirect_unauthorized(&self, path: &str) {
        if let Some(target) = self.on_unauthorized(path, &current_path(), &LocalStoragePrefs) {
            log::info!("redirecting to {}", target);
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(&target);
            }
        }
    }

    async fn check(&self, path: &str, response: Response) -> Result<Response, TableError> {
        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        if status == 401 && !self.is_public(path) {
            self.redirect_unauthorized(path);
            return Err(TableError::Unauthorized);
        }
        let body = response.text().await.unwrap_or_default();
        let status_text = response.status_text();
        Err(TableError::from_response(status, &body, Some(&status_text)))
    }

    /// `GET path?pairs` returning the raw JSON body.
    pub async fn get_json(
        &self,
        path: &str,
        pairs: &[(String, String)],
    ) -> Result<Value, TableError> {
        let response = self
            .builder(HttpMethod::Get, path, pairs)?
            .send()
            .await
            .map_err(map_net_error)?;
        let response = self.check(path, response).await?;
        response.json::<Value>().await.map_err(map_net_error)
    }

    /// Sends `body` as JSON and decodes the JSON answer.
    pub async fn send_json<B, T>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<T, TableError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let request = self
            .builder(method, path, &[])?
            .json(body)
            .map_err(map_net_error)?;
        let response = request.send().await.map_err(map_net_error)?;
        let response = self.check(path, response).await?;
        let text = response.text().await.map_err(map_net_error)?;
        if text.trim().is_empty() {
            return Ok(T::default());
        }
        serde_json::from_str(&text).map_err(|e| TableError::Decode(e.to_string()))
    }

    /// `GET path?pairs` as a file download. The signal aborts the request.
    pub async fn get_blob(
        &self,
        path: &str,
        pairs: &[(String, String)],
        signal: &web_sys::AbortSignal,
    ) -> Result<BlobResponse, TableError> {
        let response = self
            .builder(HttpMethod::Get, path, pairs)?
            .abort_signal(Some(signal))
            .send()
            .await
            .map_err(map_net_error)?;
        let response = self.check(path, response).await?;
        let headers = response.headers();
        let content_type = headers.get("content-type");
        let content_disposition = headers.get("content-disposition");
        let bytes = response.binary().await.map_err(map_net_error)?;
        Ok(BlobResponse {
            bytes,
            content_type,
            content_disposition,
        })
    }
}

fn method_name(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "GET",
        HttpMethod::Post => "POST",
        HttpMethod::Put => "PUT",
        HttpMethod::Delete => "DELETE",
    }
}

fn map_net_error(e: gloo_net::Error) -> TableError {
    match e {
        gloo_net::Error::JsError(js) if js.name == "AbortError" => TableError::Timeout,
        gloo_net::Error::JsError(js) => TableError::Transport(js.message),
        gloo_net::Error::SerdeError(e) => TableError::Decode(e.to_string()),
        gloo_net::Error::GlooError(msg) => TableError::Transport(msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::load_config;
    use crate::shared::data_table::prefs::MemoryPrefs;
    use crate::system::auth::storage::{
        save_session, ACCESS_TOKEN_KEY, AUTH_KEY, REMEMBER_ME_KEY, TOKEN_TYPE_KEY, USER_KEY,
    };
    use chrono::{Duration, TimeZone};
    use contracts::system::auth::{LoginResponse, SessionUser};

    fn gateway() -> ApiGateway {
        ApiGateway::with_base(String::new(), &load_config().unwrap())
    }

    fn logged_in(store: &MemoryPrefs, now: DateTime<Utc>) {
        let response = LoginResponse {
            access_token: "tok".into(),
            token_type: "Bearer".into(),
            expires_in: 60,
            user: SessionUser {
                id: 1,
                name: "Ann".into(),
                email: "ann@example.com".into(),
                role: None,
            },
        };
        save_session(store, &response, true, now);
    }

    fn names(headers: &[(&'static str, String)]) -> Vec<&'static str> {
        headers.iter().map(|(n, _)| *n).collect()
    }

    #[test]
    fn test_get_adds_bearer_and_cache_busting() {
        let store = MemoryPrefs::default();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        logged_in(&store, now);
        let session = Session::load(&store);

        let headers = gateway()
            .request_headers(HttpMethod::Get, "/api/leads", &session, now)
            .unwrap();
        assert!(headers.contains(&("Authorization", "Bearer tok".to_string())));
        assert!(headers.contains(&("Cache-Control", "no-cache".to_string())));
        assert!(headers.contains(&("Pragma", "no-cache".to_string())));
        assert!(headers.contains(&("Expires", "0".to_string())));
        assert!(!names(&headers).contains(&"Content-Type"));

        let headers = gateway()
            .request_headers(HttpMethod::Post, "/api/leads", &session, now)
            .unwrap();
        assert!(names(&headers).contains(&"Content-Type"));
        assert!(!names(&headers).contains(&"Pragma"));
    }

    #[test]
    fn test_expired_session_rejected_except_public() {
        let store = MemoryPrefs::default();
        let issued = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        logged_in(&store, issued);
        let session = Session::load(&store);
        let later = issued + Duration::seconds(61);

        assert_eq!(
            gateway().request_headers(HttpMethod::Get, "/api/leads", &session, later),
            Err(TableError::SessionExpired)
        );
        assert!(gateway()
            .request_headers(HttpMethod::Post, "/api/auth/login", &session, later)
            .is_ok());
    }

    #[test]
    fn test_unauthorized_clears_session_keeps_remember_me() {
        let store = MemoryPrefs::default();
        logged_in(&store, Utc::now());

        let target = gateway().on_unauthorized("/api/leads", "/leads", &store);
        assert_eq!(target.as_deref(), Some("/login"));
        for key in [ACCESS_TOKEN_KEY, TOKEN_TYPE_KEY, USER_KEY, AUTH_KEY] {
            assert_eq!(store.get(key), None, "{} should be cleared", key);
        }
        assert_eq!(store.get(REMEMBER_ME_KEY).as_deref(), Some("true"));
    }

    #[test]
    fn test_unauthorized_on_login_page_or_public_route() {
        let store = MemoryPrefs::default();
        logged_in(&store, Utc::now());
        assert_eq!(gateway().on_unauthorized("/api/auth/login", "/login", &store), None);
        assert!(store.get(ACCESS_TOKEN_KEY).is_some());

        assert_eq!(gateway().on_unauthorized("/api/users", "/login", &store), None);
        assert!(store.get(ACCESS_TOKEN_KEY).is_none());
    }
}
