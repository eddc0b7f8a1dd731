// reqwest wrappers for the restaurant REST API, one per resource.
pub mod auth;
pub mod bookings;
pub mod http;
pub mod menu;
pub mod tables;

pub use auth::AuthClient;
pub use bookings::BookingClient;
pub use http::{ApiCallError, ApiClientInitError, ApiHttp};
pub use menu::MenuClient;
pub use tables::TableClient;
