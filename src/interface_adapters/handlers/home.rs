use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use crate::interface_adapters::handlers::chrome;
use crate::interface_adapters::session::SessionHandle;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::views::pages;

#[tracing::instrument(name = "home_index", skip_all)]
pub async fn index(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
) -> Html<String> {
    let featured = state.catalog().featured().await;
    let chrome = chrome(&session, "Home").await;
    pages::home(&chrome, &featured)
}

pub async fn privacy(Extension(session): Extension<SessionHandle>) -> Html<String> {
    pages::privacy(&chrome(&session, "Privacy").await)
}

pub async fn about(Extension(session): Extension<SessionHandle>) -> Html<String> {
    pages::about(&chrome(&session, "About").await)
}

pub async fn contact(Extension(session): Extension<SessionHandle>) -> Html<String> {
    pages::contact(&chrome(&session, "Contact").await)
}

// Bookings are taken by a separate front-end when one is configured.
pub async fn booking_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
) -> Response {
    match &state.booking_app_url {
        Some(url) => Redirect::to(url).into_response(),
        None => pages::booking_info(&chrome(&session, "Book a table").await).into_response(),
    }
}

pub async fn not_found(Extension(session): Extension<SessionHandle>) -> Response {
    let page = pages::not_found(&chrome(&session, "Not found").await);
    (StatusCode::NOT_FOUND, page).into_response()
}
