use axum::response::Html;

use crate::domain::{Booking, BookingForm, FlashKind, ServiceResponse, ValidationErrors};
use crate::interface_adapters::protocol::BookingFilter;
use crate::interface_adapters::views::{
    Chrome, escape, input, layout, optional_banner, post_button, textarea,
};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

fn customer(booking: &Booking) -> String {
    booking
        .customer
        .as_ref()
        .map(|c| format!("{} ({})", escape(&c.name), escape(&c.phone_number)))
        .unwrap_or_else(|| "-".to_string())
}

fn table_label(booking: &Booking) -> String {
    booking
        .table
        .as_ref()
        .map(|t| format!("Table {} (seats {})", t.table_number, t.capacity))
        .unwrap_or_else(|| "-".to_string())
}

fn filter_heading(filter: BookingFilter) -> String {
    match filter {
        BookingFilter::All => "All bookings".to_string(),
        BookingFilter::Date(date) => format!("Bookings on {date}"),
        BookingFilter::Range(from, to) => format!("Bookings from {from} to {to}"),
    }
}

pub fn index(
    chrome: &Chrome,
    bookings: &ServiceResponse<Vec<Booking>>,
    filter: BookingFilter,
) -> Html<String> {
    let error = (!bookings.succeeded).then_some(bookings.message.as_str());
    let rows: String = bookings
        .data()
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .map(|booking| {
            format!(
                "<tr><td>{start}</td><td>{end}</td><td>{guests}</td><td>{customer}</td><td>{table}</td><td>{view} {edit}{delete}</td></tr>\n",
                start = booking.booking_date_time.format(DISPLAY_FORMAT),
                end = booking.end_time().format("%H:%M"),
                guests = booking.number_of_guests,
                customer = customer(booking),
                table = table_label(booking),
                view = format!(r#"<a href="/bookings/{}">Details</a>"#, booking.id),
                edit = format!(r#"<a href="/bookings/{}/edit">Edit</a>"#, booking.id),
                delete = post_button(&format!("/bookings/{}/delete", booking.id), "Delete"),
            )
        })
        .collect();
    let body = format!(
        r#"<h1>{heading}</h1>
<form method="get" action="/bookings" class="filters">
<label>Date <input type="date" name="date"></label>
<label>From <input type="date" name="from"></label>
<label>To <input type="date" name="to"></label>
<button type="submit">Filter</button>
<a href="/bookings">Clear</a>
</form>
{error}<table>
<thead><tr><th>Starts</th><th>Ends</th><th>Guests</th><th>Customer</th><th>Table</th><th></th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#,
        heading = escape(&filter_heading(filter)),
        error = optional_banner(FlashKind::Error, error),
    );
    layout(chrome, &body)
}

pub fn details(chrome: &Chrome, booking: &Booking) -> Html<String> {
    let body = format!(
        r#"<h1>Booking #{id}</h1>
<dl>
<dt>Starts</dt><dd>{start}</dd>
<dt>Ends</dt><dd>{end}</dd>
<dt>Guests</dt><dd>{guests}</dd>
<dt>Customer</dt><dd>{customer}</dd>
<dt>Table</dt><dd>{table}</dd>
<dt>Special requests</dt><dd>{requests}</dd>
<dt>Booked at</dt><dd>{created}</dd>
</dl>
<a href="/bookings/{id}/edit">Edit</a>{delete}
<a href="/bookings">Back to bookings</a>"#,
        id = booking.id,
        start = booking.booking_date_time.format(DISPLAY_FORMAT),
        end = booking.end_time().format(DISPLAY_FORMAT),
        guests = booking.number_of_guests,
        customer = customer(booking),
        table = table_label(booking),
        requests = escape(booking.special_requests.as_deref().unwrap_or("-")),
        created = booking.created_at.format(DISPLAY_FORMAT),
        delete = post_button(&format!("/bookings/{}/delete", booking.id), "Delete"),
    );
    layout(chrome, &body)
}

pub fn form(
    chrome: &Chrome,
    id: i32,
    values: &BookingForm,
    errors: &ValidationErrors,
) -> Html<String> {
    let body = format!(
        r#"<h1>Edit booking #{id}</h1>
<form method="post" action="/bookings/{id}/edit">
{start}{guests}{requests}<button type="submit">Save</button>
<a href="/bookings/{id}">Cancel</a>
</form>"#,
        start = input(
            "Date and time",
            "booking_date_time",
            "datetime-local",
            &values.booking_date_time,
            "bookingDateTime",
            errors
        ),
        guests = input(
            "Guests",
            "number_of_guests",
            "number",
            &values.number_of_guests,
            "numberOfGuests",
            errors
        ),
        requests = textarea(
            "Special requests",
            "special_requests",
            &values.special_requests,
            "specialRequests",
            errors
        ),
    );
    layout(chrome, &body)
}
