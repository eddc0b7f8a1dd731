use crate::interface_adapters::auth_guard::require_admin;
use crate::interface_adapters::handlers::{admin, auth, bookings, home, menu, tables};
use crate::interface_adapters::session::session_middleware;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::views::{Chrome, pages};
use axum::{
    Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::any::Any;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub fn app(state: Arc<AppState>) -> Router {
    // Everything here sits behind the admin guard.
    let protected = Router::new()
        .route("/admin", get(admin::dashboard))
        .route("/admin/statistics", get(admin::statistics))
        .route("/auth/profile", get(auth::profile))
        .route("/menu/create", get(menu::create_form).post(menu::create))
        .route("/menu/{id}/edit", get(menu::edit_form).post(menu::update))
        .route("/menu/{id}/delete", post(menu::delete))
        .route("/menu/{id}/toggle-popular", post(menu::toggle_popular))
        .route("/tables", get(tables::index))
        .route("/tables/create", get(tables::create_form).post(tables::create))
        .route("/tables/{id}", get(tables::details))
        .route("/tables/{id}/edit", get(tables::edit_form).post(tables::update))
        .route("/tables/{id}/delete", post(tables::delete))
        .route("/tables/{id}/toggle-active", post(tables::toggle_active))
        .route("/bookings", get(bookings::index))
        .route("/bookings/{id}", get(bookings::details))
        .route("/bookings/{id}/edit", get(bookings::edit_form).post(bookings::update))
        .route("/bookings/{id}/delete", post(bookings::delete))
        .route_layer(middleware::from_fn(require_admin));

    let public = Router::new()
        .route("/", get(home::index))
        .route("/privacy", get(home::privacy))
        .route("/about", get(home::about))
        .route("/contact", get(home::contact))
        .route("/booking-page", get(home::booking_page))
        .route("/menu", get(menu::index))
        .route("/menu/{id}", get(menu::details))
        .route("/auth/login", get(auth::login_form).post(auth::login))
        .route("/auth/logout", get(auth::logout).post(auth::logout))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/check", get(auth::check));

    // Wire the HTTP routes to their handlers.
    Router::new()
        .merge(public)
        .merge(protected)
        .fallback(home::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .layer(CatchPanicLayer::custom(render_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn render_panic(_payload: Box<dyn Any + Send + 'static>) -> Response {
    let chrome = Chrome {
        title: "Error".to_string(),
        ..Default::default()
    };
    let page = pages::error_page(
        &chrome,
        "An unexpected error occurred. Please try again later.",
    );
    (StatusCode::INTERNAL_SERVER_ERROR, page).into_response()
}
