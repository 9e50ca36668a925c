use chrono::Utc;
use contracts::system::auth::{LoginRequest, LoginResponse};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::shared::config::AppConfig;
use crate::shared::data_table::prefs::LocalStoragePrefs;
use crate::shared::data_table::error::FALLBACK_MESSAGE;
use crate::shared::data_table::TableError;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_CUSTOM;
use crate::system::auth::context::use_auth;
use crate::system::auth::gateway::{ApiGateway, HttpMethod};
use crate::system::auth::storage::{remember_me, save_session};

/// Where a fresh login lands.
pub const HOME_ROUTE: &str = "/leads";

async fn login(
    gateway: &ApiGateway,
    endpoint: &str,
    request: &LoginRequest,
) -> Result<LoginResponse, TableError> {
    TableError::require_fields(&[("email", &request.email), ("password", &request.password)])?;
    gateway
        .send_json::<_, Option<LoginResponse>>(HttpMethod::Post, endpoint, request)
        .await?
        .ok_or_else(|| TableError::Decode("empty login response".to_string()))
}

/// A bare 401 from the login endpoint means bad credentials; anything the
/// backend did explain is shown as is.
fn login_error_message(err: &TableError) -> String {
    match err {
        TableError::Server { status: 401, message } if message == FALLBACK_MESSAGE => {
            "Wrong email or password.".to_string()
        }
        other => other.to_string(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let gateway = expect_context::<ApiGateway>();
    let auth = use_auth();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let remember = RwSignal::new(remember_me(&LocalStoragePrefs));
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);

    let endpoint = config.auth.login_endpoint.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        let request = LoginRequest {
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            remember_me: remember.get_untracked(),
        };
        loading.set(true);
        error.set(None);
        let gateway = gateway.clone();
        let endpoint = endpoint.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match login(&gateway, &endpoint, &request).await {
                Ok(response) => {
                    save_session(&LocalStoragePrefs, &response, request.remember_me, Utc::now());
                    auth.sign_in(response.user);
                    navigate(HOME_ROUTE, NavigateOptions::default());
                }
                Err(e) => {
                    error.try_set(Some(login_error_message(&e)));
                }
            }
            loading.try_set(false);
        });
    };

    view! {
        <PageFrame page_id="login--custom" category=PAGE_CAT_CUSTOM>
            <div class="login">
                <form class="login__box" on:submit=on_submit>
                    <h1 class="login__title">"Sign in"</h1>

                    <Show when=move || error.get().is_some()>
                        <div class="alert alert--error">{move || error.get().unwrap_or_default()}</div>
                    </Show>

                    <div class="form__group">
                        <label class="form__label" for="login-email">"Email"</label>
                        <input
                            id="login-email"
                            type="email"
                            class="form__input"
                            autocomplete="username"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                            disabled=move || loading.get()
                        />
                    </div>
                    <div class="form__group">
                        <label class="form__label" for="login-password">"Password"</label>
                        <input
                            id="login-password"
                            type="password"
                            class="form__input"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            disabled=move || loading.get()
                        />
                    </div>
                    <label class="form__checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || remember.get()
                            on:change=move |ev| remember.set(event_target_checked(&ev))
                        />
                        " Remember me"
                    </label>

                    <button type="submit" class="button button--primary" disabled=move || loading.get()>
                        {move || if loading.get() { "Signing in…" } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_error_message() {
        let bare = TableError::from_response(401, "", None);
        assert_eq!(login_error_message(&bare), "Wrong email or password.");

        let explained = TableError::from_response(401, r#"{"message":"Account locked"}"#, None);
        assert_eq!(login_error_message(&explained), "Account locked");

        let missing = TableError::require_fields(&[("email", ""), ("password", "x")]).unwrap_err();
        assert_eq!(login_error_message(&missing), "Please fill in: email");
    }
}
