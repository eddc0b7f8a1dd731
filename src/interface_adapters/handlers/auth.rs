use axum::{
    Extension, Form, Json,
    extract::State,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::domain::{FlashKind, LoginRequest, ValidationErrors};
use crate::interface_adapters::auth_guard::AdminContext;
use crate::interface_adapters::handlers::{chrome, redirect_with};
use crate::interface_adapters::protocol::{AuthStatusResponse, RefreshResponse};
use crate::interface_adapters::session::SessionHandle;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::views::admin as view;

const DASHBOARD: &str = "/admin";

async fn render_login(
    session: &SessionHandle,
    username: &str,
    errors: &ValidationErrors,
    server_error: Option<&str>,
) -> Html<String> {
    view::login(&chrome(session, "Log in").await, username, errors, server_error)
}

pub async fn login_form(Extension(session): Extension<SessionHandle>) -> Response {
    if session.bearer_token().await.is_some() {
        return redirect_with(&session, FlashKind::Info, "You are already logged in.", DASHBOARD)
            .await;
    }
    render_login(&session, "", &ValidationErrors::new(), None)
        .await
        .into_response()
}

#[tracing::instrument(name = "auth_login_submit", skip_all, fields(username = %form.username))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Form(form): Form<LoginRequest>,
) -> Response {
    let username = form.username.clone();
    let request = match form.validate() {
        Ok(request) => request,
        Err(errors) => {
            return render_login(&session, &username, &errors, None)
                .await
                .into_response();
        }
    };

    let response = state.auth.login(&request).await;
    let message = response.message.clone();
    match response.into_data() {
        Some(tokens) => {
            let welcome = format!("Welcome back, {}!", tokens.administrator.name);
            session.sign_in(&tokens).await;
            tracing::info!(username = %request.username, "administrator logged in");
            redirect_with(&session, FlashKind::Success, welcome, DASHBOARD).await
        }
        None => render_login(&session, &request.username, &ValidationErrors::new(), Some(&message))
            .await
            .into_response(),
    }
}

// The local session is ended even when the API cannot be reached.
#[tracing::instrument(name = "auth_logout", skip_all)]
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
) -> Response {
    if let Some(token) = session.bearer_token().await {
        let response = state.auth.logout(&token).await;
        if !response.succeeded {
            tracing::warn!(message = %response.message, "remote logout failed");
        }
    }
    session.sign_out().await;
    redirect_with(
        &session,
        FlashKind::Success,
        "You have been logged out successfully.",
        "/",
    )
    .await
}

#[tracing::instrument(name = "auth_refresh", skip_all)]
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
) -> Json<RefreshResponse> {
    let refresh_token = session
        .read(|data| data.refresh_token.clone())
        .await
        .filter(|token| !token.trim().is_empty());
    let Some(refresh_token) = refresh_token else {
        return Json(RefreshResponse {
            success: false,
            message: "No refresh token available".to_string(),
        });
    };

    let response = state.auth.refresh(&refresh_token).await;
    let message = response.message.clone();
    match response.into_data() {
        Some(tokens) => {
            session.rotate_tokens(&tokens).await;
            Json(RefreshResponse {
                success: true,
                message,
            })
        }
        None => Json(RefreshResponse {
            success: false,
            message,
        }),
    }
}

pub async fn check(Extension(session): Extension<SessionHandle>) -> Json<AuthStatusResponse> {
    let data = session.snapshot().await;
    let is_authenticated = data.is_authenticated();
    Json(AuthStatusResponse {
        is_authenticated,
        admin_name: data.admin_name.filter(|_| is_authenticated),
        admin_username: data.admin_username.filter(|_| is_authenticated),
    })
}

#[tracing::instrument(name = "auth_profile", skip_all, fields(admin = %admin.username))]
pub async fn profile(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Extension(admin): Extension<AdminContext>,
) -> Html<String> {
    let validation = state.auth.validate(&admin.token).await;
    view::profile(
        &chrome(&session, "Profile").await,
        &admin.name,
        &admin.username,
        &validation,
    )
}
