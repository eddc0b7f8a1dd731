use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::domain::{
    BearerToken, Booking, BookingApi, Clock, CreateMenuItem, CreateTable, MenuApi, MenuItem,
    ServiceResponse, Table, TableApi, TableSummary, UpdateBooking, UpdateMenuItem, UpdateTable,
};

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

pub(crate) fn at(date: (i32, u32, u32), time: (u32, u32)) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(date.0, date.1, date.2)
        .and_then(|d| d.and_hms_opt(time.0, time.1, 0))
        .expect("valid test date-time")
}

pub(crate) fn token() -> BearerToken {
    BearerToken::new("test-token").expect("non-empty token")
}

pub(crate) fn table(id: i32, capacity: i32, is_active: bool, bookings: i32) -> Table {
    Table {
        id,
        table_number: id,
        capacity,
        is_active,
        current_bookings_count: bookings,
    }
}

pub(crate) fn menu_item(id: i32, category: &str, price: Decimal, popular: bool, available: bool) -> MenuItem {
    MenuItem {
        id,
        name: format!("Dish {id}"),
        description: String::new(),
        price,
        category: category.to_string(),
        image_url: None,
        is_popular: popular,
        is_available: available,
        created_at: NaiveDateTime::default(),
    }
}

pub(crate) fn booking(id: i32, starts_at: NaiveDateTime, guests: i32) -> Booking {
    Booking {
        id,
        booking_date_time: starts_at,
        number_of_guests: guests,
        special_requests: None,
        created_at: NaiveDateTime::default(),
        customer: None,
        table: Some(TableSummary {
            id: 1,
            table_number: 1,
            capacity: 4,
        }),
    }
}

// Fake API answering list calls with scripted envelopes and recording every call.
#[derive(Clone, Default)]
pub(crate) struct ScriptedApi {
    tables: Option<ServiceResponse<Vec<Table>>>,
    menu: Option<ServiceResponse<Vec<MenuItem>>>,
    bookings: Option<ServiceResponse<Vec<Booking>>>,
    categories: Vec<String>,
    panic_on_tables: bool,
    tables_delay: Option<std::time::Duration>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_tables(mut self, response: ServiceResponse<Vec<Table>>) -> Self {
        self.tables = Some(response);
        self
    }

    pub(crate) fn with_menu(mut self, response: ServiceResponse<Vec<MenuItem>>) -> Self {
        self.menu = Some(response);
        self
    }

    pub(crate) fn with_bookings(mut self, response: ServiceResponse<Vec<Booking>>) -> Self {
        self.bookings = Some(response);
        self
    }

    pub(crate) fn with_categories(mut self, categories: &[&str]) -> Self {
        self.categories = categories.iter().map(|c| c.to_string()).collect();
        self
    }

    pub(crate) fn panicking_tables(mut self) -> Self {
        self.panic_on_tables = true;
        self
    }

    // Holds `tables.list_all` open so requests can overlap.
    pub(crate) fn slow_tables(mut self, delay: std::time::Duration) -> Self {
        self.tables_delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(call.into());
    }

    fn menu_list(&self) -> ServiceResponse<Vec<MenuItem>> {
        self.menu
            .clone()
            .unwrap_or_else(|| ServiceResponse::success(Vec::new(), "empty"))
    }
}

fn not_scripted<T>() -> ServiceResponse<T> {
    ServiceResponse::failure("not scripted")
}

#[async_trait]
impl TableApi for ScriptedApi {
    async fn list_all(&self, _token: &BearerToken) -> ServiceResponse<Vec<Table>> {
        self.record("tables.list_all");
        if self.panic_on_tables {
            panic!("tables fetch blew up");
        }
        if let Some(delay) = self.tables_delay {
            tokio::time::sleep(delay).await;
        }
        self.tables
            .clone()
            .unwrap_or_else(|| ServiceResponse::success(Vec::new(), "empty"))
    }

    async fn list_active(&self, _token: &BearerToken) -> ServiceResponse<Vec<Table>> {
        self.record("tables.list_active");
        not_scripted()
    }

    async fn get(&self, _token: &BearerToken, id: i32) -> ServiceResponse<Table> {
        self.record(format!("tables.get({id})"));
        not_scripted()
    }

    async fn create(&self, _token: &BearerToken, _table: &CreateTable) -> ServiceResponse<Table> {
        self.record("tables.create");
        not_scripted()
    }

    async fn update(
        &self,
        _token: &BearerToken,
        id: i32,
        _changes: &UpdateTable,
    ) -> ServiceResponse<Table> {
        self.record(format!("tables.update({id})"));
        not_scripted()
    }

    async fn delete(&self, _token: &BearerToken, id: i32) -> ServiceResponse<()> {
        self.record(format!("tables.delete({id})"));
        not_scripted()
    }

    async fn toggle_active(&self, _token: &BearerToken, id: i32) -> ServiceResponse<Table> {
        self.record(format!("tables.toggle_active({id})"));
        not_scripted()
    }
}

#[async_trait]
impl MenuApi for ScriptedApi {
    async fn list_available(&self) -> ServiceResponse<Vec<MenuItem>> {
        self.record("menu.list_available");
        self.menu_list()
    }

    async fn search(&self, term: &str) -> ServiceResponse<Vec<MenuItem>> {
        self.record(format!("menu.search({term})"));
        self.menu_list()
    }

    async fn by_category(&self, category: &str) -> ServiceResponse<Vec<MenuItem>> {
        self.record(format!("menu.by_category({category})"));
        self.menu_list()
    }

    async fn categories(&self) -> ServiceResponse<Vec<String>> {
        self.record("menu.categories");
        ServiceResponse::success(self.categories.clone(), "categories")
    }

    async fn popular(&self) -> ServiceResponse<Vec<MenuItem>> {
        self.record("menu.popular");
        self.menu_list()
    }

    async fn list_all(&self, _token: &BearerToken) -> ServiceResponse<Vec<MenuItem>> {
        self.record("menu.list_all");
        self.menu_list()
    }

    async fn get(&self, _token: Option<&BearerToken>, id: i32) -> ServiceResponse<MenuItem> {
        self.record(format!("menu.get({id})"));
        not_scripted()
    }

    async fn create(
        &self,
        _token: &BearerToken,
        _item: &CreateMenuItem,
    ) -> ServiceResponse<MenuItem> {
        self.record("menu.create");
        not_scripted()
    }

    async fn update(
        &self,
        _token: &BearerToken,
        id: i32,
        _changes: &UpdateMenuItem,
    ) -> ServiceResponse<MenuItem> {
        self.record(format!("menu.update({id})"));
        not_scripted()
    }

    async fn delete(&self, _token: &BearerToken, id: i32) -> ServiceResponse<()> {
        self.record(format!("menu.delete({id})"));
        not_scripted()
    }

    async fn toggle_popular(&self, _token: &BearerToken, id: i32) -> ServiceResponse<MenuItem> {
        self.record(format!("menu.toggle_popular({id})"));
        not_scripted()
    }
}

#[async_trait]
impl BookingApi for ScriptedApi {
    async fn list_all(&self, _token: &BearerToken) -> ServiceResponse<Vec<Booking>> {
        self.record("bookings.list_all");
        self.bookings
            .clone()
            .unwrap_or_else(|| ServiceResponse::success(Vec::new(), "empty"))
    }

    async fn get(&self, _token: &BearerToken, id: i32) -> ServiceResponse<Booking> {
        self.record(format!("bookings.get({id})"));
        not_scripted()
    }

    async fn by_date(&self, _token: &BearerToken, date: NaiveDate) -> ServiceResponse<Vec<Booking>> {
        self.record(format!("bookings.by_date({date})"));
        not_scripted()
    }

    async fn by_date_range(
        &self,
        _token: &BearerToken,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResponse<Vec<Booking>> {
        self.record(format!("bookings.by_date_range({start},{end})"));
        not_scripted()
    }

    async fn update(
        &self,
        _token: &BearerToken,
        id: i32,
        _changes: &UpdateBooking,
    ) -> ServiceResponse<Booking> {
        self.record(format!("bookings.update({id})"));
        not_scripted()
    }

    async fn delete(&self, _token: &BearerToken, id: i32) -> ServiceResponse<()> {
        self.record(format!("bookings.delete({id})"));
        not_scripted()
    }
}

// Clock the test moves forward by hand.
pub(crate) struct ManualClock(Mutex<NaiveDateTime>);

impl ManualClock {
    pub(crate) fn new(start: NaiveDateTime) -> Self {
        Self(Mutex::new(start))
    }

    pub(crate) fn advance_minutes(&self, minutes: i64) {
        let mut now = self.0.lock().expect("clock mutex poisoned");
        *now += chrono::Duration::minutes(minutes);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.0.lock().expect("clock mutex poisoned")
    }
}
