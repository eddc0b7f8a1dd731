use axum::{
    Extension,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::domain::{BearerToken, FlashKind};
use crate::interface_adapters::session::SessionHandle;

pub const LOGIN_PATH: &str = "/auth/login";
pub const LOGIN_REQUIRED: &str = "You must log in as an administrator.";

// Resolved once per request by the guard and handed to admin handlers.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub token: BearerToken,
    pub name: String,
    pub username: String,
}

/// Guards every admin route: no token means a redirect to the login page.
pub async fn require_admin(
    Extension(session): Extension<SessionHandle>,
    mut request: Request,
    next: Next,
) -> Response {
    let context = session
        .read(|data| {
            data.bearer_token().map(|token| AdminContext {
                token,
                name: data.admin_name.clone().unwrap_or_default(),
                username: data.admin_username.clone().unwrap_or_default(),
            })
        })
        .await;

    match context {
        Some(context) => {
            request.extensions_mut().insert(context);
            next.run(request).await
        }
        None => {
            tracing::info!(path = %request.uri().path(), "admin route requested without a session token");
            session.flash(FlashKind::Warning, LOGIN_REQUIRED).await;
            Redirect::to(LOGIN_PATH).into_response()
        }
    }
}
