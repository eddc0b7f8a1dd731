pub mod auth_guard;
pub mod clients;
pub mod handlers;
pub mod protocol;
pub mod routes;
pub mod session;
pub mod state;
pub mod views;
