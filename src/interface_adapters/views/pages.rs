use axum::response::Html;

use crate::domain::FlashKind;
use crate::interface_adapters::views::{Chrome, escape, layout, menu::dish_card, optional_banner};
use crate::use_cases::FeaturedDishes;

pub fn home(chrome: &Chrome, featured: &FeaturedDishes) -> Html<String> {
    let dishes: String = featured.dishes.iter().map(dish_card).collect();
    let dishes = if dishes.is_empty() && featured.warning.is_none() {
        "<p>Our chefs are preparing new favourites. Check back soon.</p>".to_string()
    } else {
        dishes
    };
    let body = format!(
        r#"<section class="hero">
<h1>Welcome to our restaurant</h1>
<p>Seasonal cooking, warm service and a table waiting for you.</p>
<a class="button" href="/booking-page">Book a table</a>
<a class="button" href="/menu">See the menu</a>
</section>
<section>
<h2>Popular dishes</h2>
{warning}<div class="cards">{dishes}</div>
</section>"#,
        warning = optional_banner(FlashKind::Warning, featured.warning.as_deref()),
    );
    layout(chrome, &body)
}

pub fn privacy(chrome: &Chrome) -> Html<String> {
    layout(
        chrome,
        r#"<h1>Privacy policy</h1>
<p>We store your name and phone number only to manage your booking. Administrator
sessions keep a sign-in token on the server for as long as the session stays active.</p>"#,
    )
}

pub fn about(chrome: &Chrome) -> Html<String> {
    layout(
        chrome,
        r#"<h1>About us</h1>
<p>A neighbourhood restaurant cooking with local produce since the day we opened.</p>"#,
    )
}

pub fn contact(chrome: &Chrome) -> Html<String> {
    layout(
        chrome,
        r#"<h1>Contact</h1>
<p>Call us or drop by during opening hours. For table bookings please use the booking page.</p>
<a class="button" href="/booking-page">Book a table</a>"#,
    )
}

// Shown when no external booking front-end is configured.
pub fn booking_info(chrome: &Chrome) -> Html<String> {
    layout(
        chrome,
        r#"<h1>Book a table</h1>
<p>Online booking is not available right now. Please call the restaurant to reserve a table.</p>"#,
    )
}

pub fn error_page(chrome: &Chrome, message: &str) -> Html<String> {
    layout(
        chrome,
        &format!(
            r#"<h1>Something went wrong</h1>
<p>{}</p>
<a href="/">Back to the home page</a>"#,
            escape(message)
        ),
    )
}

pub fn not_found(chrome: &Chrome) -> Html<String> {
    layout(
        chrome,
        r#"<h1>Page not found</h1>
<p>The page you were looking for does not exist.</p>
<a href="/">Back to the home page</a>"#,
    )
}
