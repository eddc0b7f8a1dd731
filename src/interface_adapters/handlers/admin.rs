use axum::{Extension, Json, extract::State, response::Html};
use std::sync::Arc;

use crate::domain::ServiceResponse;
use crate::interface_adapters::auth_guard::AdminContext;
use crate::interface_adapters::handlers::chrome;
use crate::interface_adapters::session::SessionHandle;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::views::admin as view;
use crate::use_cases::DashboardStatistics;

#[tracing::instrument(name = "admin_dashboard", skip_all, fields(admin = %admin.username))]
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Extension(admin): Extension<AdminContext>,
) -> Html<String> {
    let report = state.dashboard().execute(&admin.token).await;
    view::dashboard(&chrome(&session, "Dashboard").await, &report)
}

// Same figures as the dashboard, for client-side refreshes.
#[tracing::instrument(name = "admin_statistics", skip_all, fields(admin = %admin.username))]
pub async fn statistics(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AdminContext>,
) -> Json<ServiceResponse<DashboardStatistics>> {
    let report = state.dashboard().execute(&admin.token).await;
    Json(report.into_envelope())
}
