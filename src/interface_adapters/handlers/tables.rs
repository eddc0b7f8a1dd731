use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::domain::{FlashKind, TableForm, ValidationErrors};
use crate::interface_adapters::auth_guard::AdminContext;
use crate::interface_adapters::handlers::{chrome, redirect_with, redirect_with_outcome};
use crate::interface_adapters::protocol::TablesQuery;
use crate::interface_adapters::session::SessionHandle;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::views::tables::{self as view, FormMode};

const LIST: &str = "/tables";

#[tracing::instrument(name = "tables_index", skip_all, fields(active = ?query.active))]
pub async fn index(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Extension(admin): Extension<AdminContext>,
    Query(query): Query<TablesQuery>,
) -> Html<String> {
    let active_only = query.active_only();
    let tables = if active_only {
        state.tables.list_active(&admin.token).await
    } else {
        state.tables.list_all(&admin.token).await
    };
    view::index(&chrome(&session, "Tables").await, &tables, active_only)
}

#[tracing::instrument(name = "tables_details", skip_all, fields(id = id))]
pub async fn details(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Extension(admin): Extension<AdminContext>,
    Path(id): Path<i32>,
) -> Response {
    let response = state.tables.get(&admin.token, id).await;
    match response.data() {
        Some(table) if response.succeeded => {
            let title = format!("Table {}", table.table_number);
            view::details(&chrome(&session, &title).await, table).into_response()
        }
        _ => redirect_with(&session, FlashKind::Error, response.message.clone(), LIST).await,
    }
}

async fn render_form(
    session: &SessionHandle,
    mode: FormMode,
    values: &TableForm,
    errors: &ValidationErrors,
    server_error: Option<&str>,
) -> Response {
    let title = match mode {
        FormMode::Create => "Add table",
        FormMode::Edit(_) => "Edit table",
    };
    view::form(&chrome(session, title).await, mode, values, errors, server_error).into_response()
}

pub async fn create_form(Extension(session): Extension<SessionHandle>) -> Response {
    render_form(
        &session,
        FormMode::Create,
        &TableForm::default(),
        &ValidationErrors::new(),
        None,
    )
    .await
}

#[tracing::instrument(name = "tables_create", skip_all, fields(admin = %admin.username))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Extension(admin): Extension<AdminContext>,
    Form(form): Form<TableForm>,
) -> Response {
    let table = match form.validate_create() {
        Ok(table) => table,
        Err(errors) => return render_form(&session, FormMode::Create, &form, &errors, None).await,
    };

    let response = state.tables.create(&admin.token, &table).await;
    if response.succeeded {
        let message = format!("Table {} created successfully", table.table_number);
        redirect_with(&session, FlashKind::Success, message, LIST).await
    } else {
        let errors = ValidationErrors::new();
        render_form(
            &session,
            FormMode::Create,
            &form,
            &errors,
            Some(&response.message),
        )
        .await
    }
}

#[tracing::instrument(name = "tables_edit_form", skip_all, fields(id = id))]
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Extension(admin): Extension<AdminContext>,
    Path(id): Path<i32>,
) -> Response {
    let response = state.tables.get(&admin.token, id).await;
    match response.data() {
        Some(table) if response.succeeded => {
            let values = TableForm::from(table);
            render_form(&session, FormMode::Edit(id), &values, &ValidationErrors::new(), None)
                .await
        }
        _ => redirect_with(&session, FlashKind::Error, response.message.clone(), LIST).await,
    }
}

#[tracing::instrument(name = "tables_update", skip_all, fields(id = id, admin = %admin.username))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Extension(admin): Extension<AdminContext>,
    Path(id): Path<i32>,
    Form(form): Form<TableForm>,
) -> Response {
    let changes = match form.validate_update() {
        Ok(changes) => changes,
        Err(errors) => {
            return render_form(&session, FormMode::Edit(id), &form, &errors, None).await;
        }
    };

    let response = state.tables.update(&admin.token, id, &changes).await;
    if response.succeeded {
        redirect_with_outcome(&session, &response, LIST).await
    } else {
        let errors = ValidationErrors::new();
        render_form(
            &session,
            FormMode::Edit(id),
            &form,
            &errors,
            Some(&response.message),
        )
        .await
    }
}

#[tracing::instrument(name = "tables_delete", skip_all, fields(id = id, admin = %admin.username))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Extension(admin): Extension<AdminContext>,
    Path(id): Path<i32>,
) -> Response {
    let response = state.tables.delete(&admin.token, id).await;
    redirect_with_outcome(&session, &response, LIST).await
}

#[tracing::instrument(name = "tables_toggle_active", skip_all, fields(id = id, admin = %admin.username))]
pub async fn toggle_active(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Extension(admin): Extension<AdminContext>,
    Path(id): Path<i32>,
) -> Response {
    let response = state.tables.toggle_active(&admin.token, id).await;
    match response.data() {
        Some(table) if response.succeeded => {
            let state_label = if table.is_active {
                "activated"
            } else {
                "deactivated"
            };
            let message = format!("Table {} {state_label}", table.table_number);
            redirect_with(&session, FlashKind::Success, message, LIST).await
        }
        _ => redirect_with_outcome(&session, &response, LIST).await,
    }
}
