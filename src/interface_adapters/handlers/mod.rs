pub mod admin;
pub mod auth;
pub mod bookings;
pub mod home;
pub mod menu;
pub mod tables;

use axum::response::{IntoResponse, Redirect, Response};

use crate::domain::{FlashKind, ServiceResponse};
use crate::interface_adapters::session::SessionHandle;
use crate::interface_adapters::views::Chrome;

// Builds the page chrome, consuming any pending flash notices.
pub(crate) async fn chrome(session: &SessionHandle, title: &str) -> Chrome {
    let admin_name = session
        .read(|data| {
            data.is_authenticated()
                .then(|| data.admin_name.clone().unwrap_or_default())
        })
        .await;
    Chrome {
        title: title.to_string(),
        admin_name,
        flashes: session.take_flashes().await,
    }
}

pub(crate) async fn redirect_with(
    session: &SessionHandle,
    kind: FlashKind,
    message: impl Into<String>,
    to: &str,
) -> Response {
    session.flash(kind, message).await;
    Redirect::to(to).into_response()
}

// Success or error notice from the envelope, then back to `to`.
pub(crate) async fn redirect_with_outcome<T>(
    session: &SessionHandle,
    response: &ServiceResponse<T>,
    to: &str,
) -> Response {
    let kind = if response.succeeded {
        FlashKind::Success
    } else {
        FlashKind::Error
    };
    redirect_with(session, kind, response.message.clone(), to).await
}
