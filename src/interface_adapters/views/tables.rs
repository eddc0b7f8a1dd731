use axum::response::Html;

use crate::domain::{FlashKind, ServiceResponse, Table, TableForm, ValidationErrors};
use crate::interface_adapters::views::{
    Chrome, checkbox, input, layout, optional_banner, post_button,
};

fn status(table: &Table) -> &'static str {
    if table.is_active { "Active" } else { "Inactive" }
}

fn actions(table: &Table) -> String {
    let toggle = if table.is_active {
        "Deactivate"
    } else {
        "Activate"
    };
    format!(
        r#"<a href="/tables/{id}">Details</a> <a href="/tables/{id}/edit">Edit</a>{toggle}{delete}"#,
        id = table.id,
        toggle = post_button(&format!("/tables/{}/toggle-active", table.id), toggle),
        delete = post_button(&format!("/tables/{}/delete", table.id), "Delete"),
    )
}

pub fn index(
    chrome: &Chrome,
    tables: &ServiceResponse<Vec<Table>>,
    active_only: bool,
) -> Html<String> {
    let error = (!tables.succeeded).then_some(tables.message.as_str());
    let rows: String = tables
        .data()
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .map(|table| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                table.table_number,
                table.capacity,
                status(table),
                table.current_bookings_count,
                actions(table)
            )
        })
        .collect();
    let filter = if active_only {
        r#"<a href="/tables">Show all tables</a>"#
    } else {
        r#"<a href="/tables?active=true">Show active tables only</a>"#
    };
    let body = format!(
        r#"<h1>Tables</h1>
<a class="button" href="/tables/create">Add table</a> {filter}
{error}<table>
<thead><tr><th>Number</th><th>Capacity</th><th>Status</th><th>Bookings</th><th></th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#,
        error = optional_banner(FlashKind::Error, error),
    );
    layout(chrome, &body)
}

pub fn details(chrome: &Chrome, table: &Table) -> Html<String> {
    let body = format!(
        r#"<h1>Table {number}</h1>
<dl>
<dt>Capacity</dt><dd>{capacity} guests</dd>
<dt>Status</dt><dd>{status}</dd>
<dt>Current bookings</dt><dd>{bookings}</dd>
</dl>
{actions}
<a href="/tables">Back to tables</a>"#,
        number = table.table_number,
        capacity = table.capacity,
        status = status(table),
        bookings = table.current_bookings_count,
        actions = actions(table),
    );
    layout(chrome, &body)
}

pub enum FormMode {
    Create,
    Edit(i32),
}

pub fn form(
    chrome: &Chrome,
    mode: FormMode,
    values: &TableForm,
    errors: &ValidationErrors,
    server_error: Option<&str>,
) -> Html<String> {
    let (heading, action, active) = match mode {
        FormMode::Create => ("Add table", "/tables/create".to_string(), String::new()),
        FormMode::Edit(id) => (
            "Edit table",
            format!("/tables/{id}/edit"),
            checkbox("Active", "is_active", values.is_active()),
        ),
    };
    let body = format!(
        r#"<h1>{heading}</h1>
{server_error}<form method="post" action="{action}">
{number}{capacity}{active}<button type="submit">Save</button>
<a href="/tables">Cancel</a>
</form>"#,
        server_error = optional_banner(FlashKind::Error, server_error),
        number = input(
            "Table number",
            "table_number",
            "number",
            &values.table_number,
            "tableNumber",
            errors
        ),
        capacity = input(
            "Capacity",
            "capacity",
            "number",
            &values.capacity,
            "capacity",
            errors
        ),
    );
    layout(chrome, &body)
}
