use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::domain::{BookingForm, FlashKind, ValidationErrors};
use crate::interface_adapters::auth_guard::AdminContext;
use crate::interface_adapters::handlers::{chrome, redirect_with, redirect_with_outcome};
use crate::interface_adapters::protocol::{BookingFilter, BookingsQuery};
use crate::interface_adapters::session::SessionHandle;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::views::bookings as view;

const LIST: &str = "/bookings";

#[tracing::instrument(name = "bookings_index", skip_all, fields(filter = tracing::field::Empty))]
pub async fn index(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Extension(admin): Extension<AdminContext>,
    Query(query): Query<BookingsQuery>,
) -> Html<String> {
    let filter = query.filter();
    tracing::Span::current().record("filter", tracing::field::debug(&filter));

    let bookings = match filter {
        BookingFilter::Range(from, to) => state.bookings.by_date_range(&admin.token, from, to).await,
        BookingFilter::Date(date) => state.bookings.by_date(&admin.token, date).await,
        BookingFilter::All => state.bookings.list_all(&admin.token).await,
    };
    view::index(&chrome(&session, "Bookings").await, &bookings, filter)
}

#[tracing::instrument(name = "bookings_details", skip_all, fields(id = id))]
pub async fn details(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Extension(admin): Extension<AdminContext>,
    Path(id): Path<i32>,
) -> Response {
    let response = state.bookings.get(&admin.token, id).await;
    match response.data() {
        Some(booking) if response.succeeded => {
            let title = format!("Booking #{}", booking.id);
            view::details(&chrome(&session, &title).await, booking).into_response()
        }
        _ => redirect_with(&session, FlashKind::Error, response.message.clone(), LIST).await,
    }
}

#[tracing::instrument(name = "bookings_edit_form", skip_all, fields(id = id))]
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Extension(admin): Extension<AdminContext>,
    Path(id): Path<i32>,
) -> Response {
    let response = state.bookings.get(&admin.token, id).await;
    match response.data() {
        Some(booking) if response.succeeded => {
            let values = BookingForm::from(booking);
            let chrome = chrome(&session, "Edit booking").await;
            view::form(&chrome, id, &values, &ValidationErrors::new()).into_response()
        }
        _ => redirect_with(&session, FlashKind::Error, response.message.clone(), LIST).await,
    }
}

// Validation problems redisplay the form; the API's verdict is flashed on the list.
#[tracing::instrument(name = "bookings_update", skip_all, fields(id = id, admin = %admin.username))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Extension(admin): Extension<AdminContext>,
    Path(id): Path<i32>,
    Form(form): Form<BookingForm>,
) -> Response {
    let changes = match form.validate() {
        Ok(changes) => changes,
        Err(errors) => {
            let chrome = chrome(&session, "Edit booking").await;
            return view::form(&chrome, id, &form, &errors).into_response();
        }
    };

    let response = state.bookings.update(&admin.token, id, &changes).await;
    redirect_with_outcome(&session, &response, LIST).await
}

#[tracing::instrument(name = "bookings_delete", skip_all, fields(id = id, admin = %admin.username))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Extension(admin): Extension<AdminContext>,
    Path(id): Path<i32>,
) -> Response {
    let response = state.bookings.delete(&admin.token, id).await;
    redirect_with_outcome(&session, &response, LIST).await
}
