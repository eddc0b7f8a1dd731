use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::auth::{BearerToken, LoginRequest, TokenPair};
use crate::domain::booking::{Booking, UpdateBooking};
use crate::domain::envelope::ServiceResponse;
use crate::domain::menu::{CreateMenuItem, MenuItem, UpdateMenuItem};
use crate::domain::session::{SessionChange, SessionData};
use crate::domain::table::{CreateTable, Table, UpdateTable};

// Handlers depend on these ports, never on the reqwest clients directly.
// Every method resolves to an envelope; transport faults never escape as errors.

/// Administrator authentication against the restaurant API.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> ServiceResponse<TokenPair>;
    async fn refresh(&self, refresh_token: &str) -> ServiceResponse<TokenPair>;
    async fn logout(&self, token: &BearerToken) -> ServiceResponse<()>;
    async fn validate(&self, token: &BearerToken) -> ServiceResponse<()>;
}

/// Menu items and categories. Public reads need no token.
#[async_trait]
pub trait MenuApi: Send + Sync {
    async fn list_available(&self) -> ServiceResponse<Vec<MenuItem>>;
    async fn search(&self, term: &str) -> ServiceResponse<Vec<MenuItem>>;
    async fn by_category(&self, category: &str) -> ServiceResponse<Vec<MenuItem>>;
    async fn categories(&self) -> ServiceResponse<Vec<String>>;
    async fn popular(&self) -> ServiceResponse<Vec<MenuItem>>;
    // Includes unavailable items.
    async fn list_all(&self, token: &BearerToken) -> ServiceResponse<Vec<MenuItem>>;
    async fn get(&self, token: Option<&BearerToken>, id: i32) -> ServiceResponse<MenuItem>;
    async fn create(&self, token: &BearerToken, item: &CreateMenuItem)
    -> ServiceResponse<MenuItem>;
    async fn update(
        &self,
        token: &BearerToken,
        id: i32,
        changes: &UpdateMenuItem,
    ) -> ServiceResponse<MenuItem>;
    async fn delete(&self, token: &BearerToken, id: i32) -> ServiceResponse<()>;
    async fn toggle_popular(&self, token: &BearerToken, id: i32) -> ServiceResponse<MenuItem>;
}

/// Table management; administrator only.
#[async_trait]
pub trait TableApi: Send + Sync {
    async fn list_all(&self, token: &BearerToken) -> ServiceResponse<Vec<Table>>;
    async fn list_active(&self, token: &BearerToken) -> ServiceResponse<Vec<Table>>;
    async fn get(&self, token: &BearerToken, id: i32) -> ServiceResponse<Table>;
    async fn create(&self, token: &BearerToken, table: &CreateTable) -> ServiceResponse<Table>;
    async fn update(
        &self,
        token: &BearerToken,
        id: i32,
        changes: &UpdateTable,
    ) -> ServiceResponse<Table>;
    async fn delete(&self, token: &BearerToken, id: i32) -> ServiceResponse<()>;
    async fn toggle_active(&self, token: &BearerToken, id: i32) -> ServiceResponse<Table>;
}

/// Booking administration; administrator only.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn list_all(&self, token: &BearerToken) -> ServiceResponse<Vec<Booking>>;
    async fn get(&self, token: &BearerToken, id: i32) -> ServiceResponse<Booking>;
    async fn by_date(&self, token: &BearerToken, date: NaiveDate)
    -> ServiceResponse<Vec<Booking>>;
    async fn by_date_range(
        &self,
        token: &BearerToken,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResponse<Vec<Booking>>;
    async fn update(
        &self,
        token: &BearerToken,
        id: i32,
        changes: &UpdateBooking,
    ) -> ServiceResponse<Booking>;
    async fn delete(&self, token: &BearerToken, id: i32) -> ServiceResponse<()>;
}

/// Server-side session storage keyed by the cookie id.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the live session and restarts its idle window.
    async fn load(&self, session_id: &str) -> Result<Option<SessionData>, String>;
    /// Stores a new session under a freshly issued id.
    async fn create(&self, session_id: &str, data: SessionData) -> Result<(), String>;
    /// Replays one request's changes onto the stored session.
    ///
    /// Returns `false` when the session no longer exists; it is never recreated.
    async fn apply(&self, session_id: &str, change: &SessionChange) -> Result<bool, String>;
    /// Ends a session and hands back what it held.
    async fn remove(&self, session_id: &str) -> Result<Option<SessionData>, String>;
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}
