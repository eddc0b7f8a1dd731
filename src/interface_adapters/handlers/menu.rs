use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::domain::{FlashKind, MenuItemForm, ValidationErrors};
use crate::interface_adapters::auth_guard::AdminContext;
use crate::interface_adapters::handlers::{chrome, redirect_with, redirect_with_outcome};
use crate::interface_adapters::protocol::MenuQuery;
use crate::interface_adapters::session::SessionHandle;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::views::menu::{self as view, FormMode};
use crate::use_cases::MenuFilter;

const LIST: &str = "/menu";

#[tracing::instrument(
    name = "menu_index",
    skip_all,
    fields(search = ?query.search, category = ?query.category)
)]
pub async fn index(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Query(query): Query<MenuQuery>,
) -> Html<String> {
    let filter = MenuFilter::new(query.search.as_deref(), query.category.as_deref());
    let token = session.bearer_token().await;
    let page = state.catalog().browse(filter, token.as_ref()).await;
    view::index(&chrome(&session, "Menu").await, &page)
}

#[tracing::instrument(name = "menu_details", skip_all, fields(id = id))]
pub async fn details(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Path(id): Path<i32>,
) -> Response {
    let token = session.bearer_token().await;
    let response = state.menu.get(token.as_ref(), id).await;
    if !response.succeeded {
        return redirect_with(&session, FlashKind::Error, response.message, LIST).await;
    }
    match response.into_data() {
        Some(item) => view::details(&chrome(&session, &item.name).await, &item).into_response(),
        None => redirect_with(&session, FlashKind::Error, missing(id), LIST).await,
    }
}

fn missing(id: i32) -> String {
    format!("Menu item with ID {id} not found")
}

async fn render_form(
    session: &SessionHandle,
    mode: FormMode,
    values: &MenuItemForm,
    errors: &ValidationErrors,
    server_error: Option<&str>,
) -> Response {
    let title = match mode {
        FormMode::Create => "Add menu item",
        FormMode::Edit(_) => "Edit menu item",
    };
    view::form(&chrome(session, title).await, mode, values, errors, server_error).into_response()
}

pub async fn create_form(Extension(session): Extension<SessionHandle>) -> Response {
    let values = MenuItemForm {
        is_available: Some("on".to_string()),
        ..Default::default()
    };
    render_form(&session, FormMode::Create, &values, &ValidationErrors::new(), None).await
}

#[tracing::instrument(name = "menu_create", skip_all, fields(admin = %admin.username))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Extension(admin): Extension<AdminContext>,
    Form(form): Form<MenuItemForm>,
) -> Response {
    let item = match form.validate_create() {
        Ok(item) => item,
        Err(errors) => return render_form(&session, FormMode::Create, &form, &errors, None).await,
    };

    let response = state.menu.create(&admin.token, &item).await;
    if response.succeeded {
        let message = format!("Menu item '{}' created successfully", item.name);
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

#[tracing::instrument(name = "menu_edit_form", skip_all, fields(id = id))]
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Extension(admin): Extension<AdminContext>,
    Path(id): Path<i32>,
) -> Response {
    let response = state.menu.get(Some(&admin.token), id).await;
    if !response.succeeded {
        return redirect_with(&session, FlashKind::Error, response.message, LIST).await;
    }
    match response.into_data() {
        Some(item) => {
            let values = MenuItemForm::from(&item);
            render_form(&session, FormMode::Edit(id), &values, &ValidationErrors::new(), None)
                .await
        }
        None => redirect_with(&session, FlashKind::Error, missing(id), LIST).await,
    }
}

#[tracing::instrument(name = "menu_update", skip_all, fields(id = id, admin = %admin.username))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Extension(admin): Extension<AdminContext>,
    Path(id): Path<i32>,
    Form(form): Form<MenuItemForm>,
) -> Response {
    let changes = match form.validate_update() {
        Ok(changes) => changes,
        Err(errors) => {
            return render_form(&session, FormMode::Edit(id), &form, &errors, None).await;
        }
    };

    let response = state.menu.update(&admin.token, id, &changes).await;
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

#[tracing::instrument(name = "menu_delete", skip_all, fields(id = id, admin = %admin.username))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Extension(admin): Extension<AdminContext>,
    Path(id): Path<i32>,
) -> Response {
    let response = state.menu.delete(&admin.token, id).await;
    redirect_with_outcome(&session, &response, LIST).await
}

#[tracing::instrument(name = "menu_toggle_popular", skip_all, fields(id = id, admin = %admin.username))]
pub async fn toggle_popular(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Extension(admin): Extension<AdminContext>,
    Path(id): Path<i32>,
) -> Response {
    let response = state.menu.toggle_popular(&admin.token, id).await;
    match response.data() {
        Some(item) if response.succeeded => {
            let message = if item.is_popular {
                format!("'{}' is now marked as popular", item.name)
            } else {
                format!("'{}' is no longer marked as popular", item.name)
            };
            redirect_with(&session, FlashKind::Success, message, LIST).await
        }
        _ => redirect_with_outcome(&session, &response, LIST).await,
    }
}
