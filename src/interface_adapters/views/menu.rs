use axum::response::Html;

use crate::domain::{FlashKind, MenuItem, MenuItemForm, ValidationErrors};
use crate::interface_adapters::views::{
    Chrome, checkbox, escape, input, layout, optional_banner, post_button, textarea,
};
use crate::use_cases::MenuPage;

pub fn dish_card(item: &MenuItem) -> String {
    let image = item
        .image_url
        .as_deref()
        .map(|url| format!(r#"<img src="{}" alt="{}">"#, escape(url), escape(&item.name)))
        .unwrap_or_default();
    let popular = if item.is_popular {
        r#"<span class="badge">Popular</span>"#
    } else {
        ""
    };
    format!(
        r#"<article class="card">{image}<h3><a href="/menu/{id}">{name}</a> {popular}</h3>
<p>{description}</p>
<p class="price">{price:.2}</p>
<p class="category">{category}</p>
</article>
"#,
        id = item.id,
        name = escape(&item.name),
        description = escape(&item.description),
        price = item.price,
        category = escape(&item.category),
    )
}

fn admin_row_actions(item: &MenuItem) -> String {
    let toggle_label = if item.is_popular {
        "Unmark popular"
    } else {
        "Mark popular"
    };
    format!(
        r#"<div class="actions"><a href="/menu/{id}/edit">Edit</a>{toggle}{delete}</div>"#,
        id = item.id,
        toggle = post_button(&format!("/menu/{}/toggle-popular", item.id), toggle_label),
        delete = post_button(&format!("/menu/{}/delete", item.id), "Delete"),
    )
}

pub fn index(chrome: &Chrome, page: &MenuPage) -> Html<String> {
    let search = page.filter.search.as_deref().unwrap_or_default();
    let selected = page.filter.category.as_deref().unwrap_or_default();
    let options: String = page
        .categories
        .iter()
        .map(|category| {
            let mark = if category == selected { " selected" } else { "" };
            format!(
                r#"<option value="{value}"{mark}>{value}</option>"#,
                value = escape(category)
            )
        })
        .collect();

    let error = (!page.items.succeeded).then_some(page.items.message.as_str());
    let items = page.items.data().map(Vec::as_slice).unwrap_or_default();
    let cards: String = items
        .iter()
        .map(|item| {
            let mut card = dish_card(item);
            if chrome.is_admin() {
                if !item.is_available {
                    card.push_str(r#"<p class="muted">Not available</p>"#);
                }
                card.push_str(&admin_row_actions(item));
            }
            card
        })
        .collect();
    let empty = if items.is_empty() && error.is_none() {
        "<p>No dishes match your search.</p>"
    } else {
        ""
    };
    let create = if chrome.is_admin() {
        r#"<a class="button" href="/menu/create">Add menu item</a>"#
    } else {
        ""
    };

    let body = format!(
        r#"<h1>Menu</h1>
{create}
<form method="get" action="/menu" class="filters">
<input type="search" name="search" placeholder="Search dishes" value="{search}">
<select name="category"><option value="">All categories</option>{options}</select>
<button type="submit">Filter</button>
</form>
{error}<div class="cards">{cards}</div>{empty}"#,
        search = escape(search),
        error = optional_banner(FlashKind::Error, error),
    );
    layout(chrome, &body)
}

pub fn details(chrome: &Chrome, item: &MenuItem) -> Html<String> {
    let admin = if chrome.is_admin() {
        admin_row_actions(item)
    } else {
        String::new()
    };
    let availability = if item.is_available {
        "Available today"
    } else {
        "Currently unavailable"
    };
    let body = format!(
        r#"{card}<p>{availability}</p>{admin}
<a href="/menu">Back to the menu</a>"#,
        card = dish_card(item),
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
    values: &MenuItemForm,
    errors: &ValidationErrors,
    server_error: Option<&str>,
) -> Html<String> {
    let (heading, action, availability) = match mode {
        FormMode::Create => ("Add menu item", "/menu/create".to_string(), String::new()),
        FormMode::Edit(id) => (
            "Edit menu item",
            format!("/menu/{id}/edit"),
            checkbox("Available", "is_available", values.is_available()),
        ),
    };
    let body = format!(
        r#"<h1>{heading}</h1>
{server_error}<form method="post" action="{action}">
{name}{description}{price}{category}{image}{popular}{availability}<button type="submit">Save</button>
<a href="/menu">Cancel</a>
</form>"#,
        server_error = optional_banner(FlashKind::Error, server_error),
        name = input("Name", "name", "text", &values.name, "name", errors),
        description = textarea(
            "Description",
            "description",
            &values.description,
            "description",
            errors
        ),
        price = input("Price", "price", "text", &values.price, "price", errors),
        category = input(
            "Category",
            "category",
            "text",
            &values.category,
            "category",
            errors
        ),
        image = input(
            "Image URL",
            "image_url",
            "url",
            &values.image_url,
            "imageUrl",
            errors
        ),
        popular = checkbox("Popular", "is_popular", values.is_popular()),
    );
    layout(chrome, &body)
}
