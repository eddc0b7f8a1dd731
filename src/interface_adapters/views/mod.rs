// Server-side HTML rendering. Every dynamic value goes through `escape`.

pub mod admin;
pub mod bookings;
pub mod menu;
pub mod pages;
pub mod tables;

use axum::response::Html;

use crate::domain::{Flash, FlashKind, ValidationErrors};

// Page chrome shared by every view: title, signed-in admin, pending notices.
#[derive(Debug, Clone, Default)]
pub struct Chrome {
    pub title: String,
    pub admin_name: Option<String>,
    pub flashes: Vec<Flash>,
}

impl Chrome {
    pub fn is_admin(&self) -> bool {
        self.admin_name.is_some()
    }
}

pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub fn layout(chrome: &Chrome, body: &str) -> Html<String> {
    let nav_admin = match &chrome.admin_name {
        Some(name) => format!(
            r#"<a href="/admin">Dashboard</a>
<a href="/tables">Tables</a>
<a href="/bookings">Bookings</a>
<a href="/auth/profile">{}</a>
<form method="post" action="/auth/logout" class="inline"><button type="submit">Log out</button></form>"#,
            escape(name)
        ),
        None => r#"<a href="/auth/login">Admin login</a>"#.to_string(),
    };
    let flashes: String = chrome
        .flashes
        .iter()
        .map(|flash| banner(flash.kind, &flash.message))
        .collect();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - Restaurant</title>
</head>
<body>
<header>
<nav>
<a href="/">Home</a>
<a href="/menu">Menu</a>
<a href="/booking-page">Book a table</a>
<a href="/about">About</a>
<a href="/contact">Contact</a>
{nav_admin}
</nav>
</header>
<main>
{flashes}{body}
</main>
<footer><a href="/privacy">Privacy</a></footer>
</body>
</html>"#,
        title = escape(&chrome.title),
    ))
}

pub fn banner(kind: FlashKind, message: &str) -> String {
    let class = match kind {
        FlashKind::Success => "success",
        FlashKind::Info => "info",
        FlashKind::Warning => "warning",
        FlashKind::Error => "error",
    };
    format!(
        r#"<div class="alert alert-{class}" role="alert">{}</div>
"#,
        escape(message)
    )
}

pub(crate) fn optional_banner(kind: FlashKind, message: Option<&str>) -> String {
    message.map(|m| banner(kind, m)).unwrap_or_default()
}

fn field_errors(errors: &ValidationErrors, key: &str) -> String {
    errors
        .for_field(key)
        .map(|message| format!(r#"<span class="field-error">{}</span>"#, escape(message)))
        .collect()
}

// `key` is the validation field name, `name` the form field name.
pub(crate) fn input(
    label: &str,
    name: &str,
    kind: &str,
    value: &str,
    key: &str,
    errors: &ValidationErrors,
) -> String {
    format!(
        r#"<label>{label}<input type="{kind}" name="{name}" value="{value}">{errors}</label>
"#,
        value = escape(value),
        errors = field_errors(errors, key),
    )
}

pub(crate) fn textarea(
    label: &str,
    name: &str,
    value: &str,
    key: &str,
    errors: &ValidationErrors,
) -> String {
    format!(
        r#"<label>{label}<textarea name="{name}">{value}</textarea>{errors}</label>
"#,
        value = escape(value),
        errors = field_errors(errors, key),
    )
}

pub(crate) fn checkbox(label: &str, name: &str, checked: bool) -> String {
    let checked = if checked { " checked" } else { "" };
    format!(
        r#"<label><input type="checkbox" name="{name}" value="on"{checked}> {label}</label>
"#
    )
}

pub(crate) fn post_button(action: &str, label: &str) -> String {
    format!(
        r#"<form method="post" action="{}" class="inline"><button type="submit">{}</button></form>"#,
        escape(action),
        escape(label)
    )
}
