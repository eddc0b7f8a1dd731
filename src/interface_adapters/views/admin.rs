use axum::response::Html;

use crate::domain::{FlashKind, ServiceResponse, ValidationErrors};
use crate::interface_adapters::views::{Chrome, escape, input, layout, optional_banner};
use crate::use_cases::DashboardReport;

fn tile(label: &str, value: impl std::fmt::Display) -> String {
    format!(
        r#"<div class="tile"><span class="label">{label}</span><span class="value">{value}</span></div>"#
    )
}

pub fn dashboard(chrome: &Chrome, report: &DashboardReport) -> Html<String> {
    let s = &report.statistics;
    let tables = [
        tile("Tables", s.total_tables),
        tile("Active", s.active_tables),
        tile("Inactive", s.inactive_tables),
        tile("Total seats", s.total_capacity),
        tile("Average seats", format!("{:.1}", s.average_capacity)),
        tile("With bookings", s.tables_with_bookings),
        tile("Free now", s.available_tables),
    ]
    .concat();
    let menu = [
        tile("Menu items", s.total_menu_items),
        tile("Available", s.available_menu_items),
        tile("Unavailable", s.unavailable_menu_items),
        tile("Popular", s.popular_menu_items),
        tile("Average price", format!("{:.2}", s.average_price)),
        tile(
            "Top category",
            escape(s.most_popular_category.as_deref().unwrap_or("-")),
        ),
    ]
    .concat();
    let bookings = [
        tile("Bookings", s.total_bookings),
        tile("Today", s.today_bookings),
        tile("Upcoming", s.upcoming_bookings),
        tile("Past", s.past_bookings),
        tile("Guests", s.total_guests),
    ]
    .concat();

    let body = format!(
        r#"<h1>Dashboard</h1>
{warning}<section><h2>Tables</h2><div class="tiles">{tables}</div><a href="/tables">Manage tables</a></section>
<section><h2>Menu</h2><div class="tiles">{menu}</div><a href="/menu">Manage menu</a></section>
<section><h2>Bookings</h2><div class="tiles">{bookings}</div><a href="/bookings">Manage bookings</a></section>"#,
        warning = optional_banner(FlashKind::Warning, report.warning.as_deref()),
    );
    layout(chrome, &body)
}

pub fn profile(
    chrome: &Chrome,
    name: &str,
    username: &str,
    validation: &ServiceResponse<()>,
) -> Html<String> {
    let status = if validation.succeeded {
        "Your session token is valid.".to_string()
    } else {
        format!("Token validation failed: {}", validation.message)
    };
    let body = format!(
        r#"<h1>Profile</h1>
<dl>
<dt>Name</dt><dd>{name}</dd>
<dt>Username</dt><dd>{username}</dd>
<dt>Session</dt><dd>{status}</dd>
</dl>
<form method="post" action="/auth/logout"><button type="submit">Log out</button></form>"#,
        name = escape(name),
        username = escape(username),
        status = escape(&status),
    );
    layout(chrome, &body)
}

pub fn login(
    chrome: &Chrome,
    username: &str,
    errors: &ValidationErrors,
    server_error: Option<&str>,
) -> Html<String> {
    let body = format!(
        r#"<h1>Administrator login</h1>
{server_error}<form method="post" action="/auth/login">
{username}{password}<button type="submit">Log in</button>
</form>"#,
        server_error = optional_banner(FlashKind::Error, server_error),
        username = input("Username", "username", "text", username, "username", errors),
        // Passwords are never echoed back.
        password = input("Password", "password", "password", "", "password", errors),
    );
    layout(chrome, &body)
}
