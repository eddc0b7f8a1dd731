// Shared harness: an in-memory stand-in for the restaurant REST API plus the
// real web front-end, both on ephemeral ports.
#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::NaiveDate;
use restaurant_web::Settings;
use restaurant_web::domain::{Booking, MenuItem, Table, TableSummary};
use restaurant_web::interface_adapters::clients::ApiHttp;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;
use url::Url;

pub const ACCESS_TOKEN: &str = "stub-access-token";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "secret1";

pub struct StubApi {
    tables: Mutex<Vec<Table>>,
    menu: Mutex<Vec<MenuItem>>,
    bookings: Mutex<Vec<Booking>>,
    // Makes `menuitem/admin/all` answer 500.
    pub fail_menu: AtomicBool,
}

impl StubApi {
    fn seeded() -> Self {
        let created = NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .expect("valid date");
        let dish = |id: i32, name: &str, category: &str, cents: i64, popular: bool, available: bool| {
            MenuItem {
                id,
                name: name.to_string(),
                description: format!("{name}, freshly made"),
                price: Decimal::new(cents, 2),
                category: category.to_string(),
                image_url: None,
                is_popular: popular,
                is_available: available,
                created_at: created,
            }
        };
        let booking = |id: i32, day: u32, guests: i32| Booking {
            id,
            booking_date_time: NaiveDate::from_ymd_opt(2030, 6, day)
                .and_then(|d| d.and_hms_opt(19, 0, 0))
                .expect("valid date"),
            number_of_guests: guests,
            special_requests: None,
            created_at: created,
            customer: None,
            table: Some(TableSummary {
                id: 1,
                table_number: 1,
                capacity: 4,
            }),
        };

        Self {
            tables: Mutex::new(vec![
                Table {
                    id: 1,
                    table_number: 1,
                    capacity: 4,
                    is_active: true,
                    current_bookings_count: 0,
                },
                Table {
                    id: 2,
                    table_number: 2,
                    capacity: 2,
                    is_active: false,
                    current_bookings_count: 1,
                },
            ]),
            menu: Mutex::new(vec![
                dish(1, "Tomato soup", "Starter", 8900, true, true),
                dish(2, "Grilled salmon", "Main", 24900, true, true),
                dish(3, "Chocolate fondant", "Dessert", 9900, false, false),
            ]),
            bookings: Mutex::new(vec![booking(1, 1, 2), booking(2, 2, 4)]),
            fail_menu: AtomicBool::new(false),
        }
    }

    pub fn table(&self, id: i32) -> Option<Table> {
        self.tables
            .lock()
            .expect("tables mutex")
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }

    pub fn table_by_number(&self, number: i32) -> Option<Table> {
        self.tables
            .lock()
            .expect("tables mutex")
            .iter()
            .find(|t| t.table_number == number)
            .cloned()
    }
}

type Stub = State<Arc<StubApi>>;

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some(format!("Bearer {ACCESS_TOKEN}").as_str())
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, "missing or invalid token").into_response()
}

#[derive(Deserialize)]
struct Credentials {
    username: String,
    password: String,
}

async fn mock_login(Json(body): Json<Credentials>) -> Response {
    if body.username != ADMIN_USERNAME || body.password != ADMIN_PASSWORD {
        return (StatusCode::UNAUTHORIZED, "bad credentials").into_response();
    }
    Json(json!({
        "accessToken": ACCESS_TOKEN,
        "refreshToken": "stub-refresh-token",
        "expiresAt": "2030-01-01T00:00:00Z",
        "tokenType": "Bearer",
        "administrator": {
            "id": "7f1c",
            "username": ADMIN_USERNAME,
            "name": "Site Admin",
            "email": "admin@example.com"
        }
    }))
    .into_response()
}

async fn authorized_ack(headers: HeaderMap) -> Response {
    if authorized(&headers) {
        StatusCode::OK.into_response()
    } else {
        unauthorized()
    }
}

async fn refresh() -> Response {
    unauthorized()
}

async fn list_tables(State(stub): Stub, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(stub.tables.lock().expect("tables mutex").clone()).into_response()
}

async fn list_active_tables(State(stub): Stub, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let active: Vec<Table> = stub
        .tables
        .lock()
        .expect("tables mutex")
        .iter()
        .filter(|t| t.is_active)
        .cloned()
        .collect();
    Json(active).into_response()
}

async fn get_table(State(stub): Stub, headers: HeaderMap, Path(id): Path<i32>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    match stub.table(id) {
        Some(table) => Json(table).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewTable {
    table_number: i32,
    capacity: i32,
}

async fn create_table(State(stub): Stub, headers: HeaderMap, Json(body): Json<NewTable>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if !(1..=20).contains(&body.capacity) {
        return (StatusCode::BAD_REQUEST, "Capacity must be between 1 and 20").into_response();
    }
    let mut tables = stub.tables.lock().expect("tables mutex");
    let id = tables.iter().map(|t| t.id).max().unwrap_or(0) + 1;
    let table = Table {
        id,
        table_number: body.table_number,
        capacity: body.capacity,
        is_active: true,
        current_bookings_count: 0,
    };
    tables.push(table.clone());
    (StatusCode::CREATED, Json(table)).into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableChanges {
    table_number: Option<i32>,
    capacity: Option<i32>,
    is_active: Option<bool>,
}

async fn update_table(
    State(stub): Stub,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(body): Json<TableChanges>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut tables = stub.tables.lock().expect("tables mutex");
    let Some(table) = tables.iter_mut().find(|t| t.id == id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let Some(number) = body.table_number {
        table.table_number = number;
    }
    if let Some(capacity) = body.capacity {
        table.capacity = capacity;
    }
    if let Some(active) = body.is_active {
        table.is_active = active;
    }
    Json(table.clone()).into_response()
}

async fn delete_table(State(stub): Stub, headers: HeaderMap, Path(id): Path<i32>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut tables = stub.tables.lock().expect("tables mutex");
    let before = tables.len();
    tables.retain(|t| t.id != id);
    if tables.len() == before {
        StatusCode::NOT_FOUND.into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn toggle_table(State(stub): Stub, headers: HeaderMap, Path(id): Path<i32>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut tables = stub.tables.lock().expect("tables mutex");
    match tables.iter_mut().find(|t| t.id == id) {
        Some(table) => {
            table.is_active = !table.is_active;
            Json(table.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn available_menu(State(stub): Stub) -> Response {
    let items: Vec<MenuItem> = stub
        .menu
        .lock()
        .expect("menu mutex")
        .iter()
        .filter(|m| m.is_available)
        .cloned()
        .collect();
    Json(items).into_response()
}

async fn popular_menu(State(stub): Stub) -> Response {
    let items: Vec<MenuItem> = stub
        .menu
        .lock()
        .expect("menu mutex")
        .iter()
        .filter(|m| m.is_popular)
        .cloned()
        .collect();
    Json(items).into_response()
}

async fn all_menu(State(stub): Stub, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if stub.fail_menu.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "menu store offline").into_response();
    }
    Json(stub.menu.lock().expect("menu mutex").clone()).into_response()
}

// Deliberately the wrong shape: an object where a list is expected.
async fn categories() -> Response {
    Json(json!({ "categories": ["Starter", "Main", "Dessert"] })).into_response()
}

async fn list_bookings(State(stub): Stub, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(stub.bookings.lock().expect("bookings mutex").clone()).into_response()
}

fn stub_router(stub: Arc<StubApi>) -> Router {
    Router::new()
        .route("/api/auth/login", post(mock_login))
        .route("/api/auth/logout", post(authorized_ack))
        .route("/api/auth/validate", get(authorized_ack))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/tables", get(list_tables).post(create_table))
        .route("/api/tables/active", get(list_active_tables))
        .route(
            "/api/tables/{id}",
            get(get_table).put(update_table).delete(delete_table),
        )
        .route("/api/tables/{id}/toggle-active", put(toggle_table))
        .route("/api/menuitem", get(available_menu))
        .route("/api/menuitem/popular", get(popular_menu))
        .route("/api/menuitem/admin/all", get(all_menu))
        .route("/api/menuitem/categories", get(categories))
        .route("/api/Booking", get(list_bookings))
        .with_state(stub)
}

pub struct TestEnv {
    pub stub: Arc<StubApi>,
    pub api_url: Url,
    pub app_url: String,
    // Browser stand-in; redirects are inspected, not followed.
    pub browser: reqwest::Client,
}

impl TestEnv {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.app_url)
    }

    pub fn api_http(&self) -> ApiHttp {
        ApiHttp::new(self.api_url.clone(), Duration::from_secs(5)).expect("api client")
    }
}

// Listeners are bound before serving starts, so early requests just queue.
pub async fn start() -> TestEnv {
    let stub = Arc::new(StubApi::seeded());

    let api_listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub api port");
    let api_addr = api_listener.local_addr().expect("stub api addr");
    let router = stub_router(Arc::clone(&stub));
    tokio::spawn(async move {
        axum::serve(api_listener, router).await.expect("stub api failed");
    });
    let api_url = Url::parse(&format!("http://{api_addr}/api/")).expect("stub api url");

    let settings = Settings {
        bind_host: "127.0.0.1".to_string(),
        http_port: 0,
        api_base_url: api_url.clone(),
        api_timeout: Duration::from_secs(5),
        session_idle_timeout: Duration::from_secs(30 * 60),
        booking_app_url: None,
    };
    let app_listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind app port");
    let app_addr = app_listener.local_addr().expect("app addr");
    tokio::spawn(async move {
        restaurant_web::run(app_listener, settings)
            .await
            .expect("app server failed");
    });

    let browser = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("browser client");

    TestEnv {
        stub,
        api_url,
        app_url: format!("http://{app_addr}"),
        browser,
    }
}

pub fn form_body(pairs: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

pub fn location(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

// `name=value` part of the session Set-Cookie header.
pub fn session_cookie(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

pub async fn post_form(
    env: &TestEnv,
    path: &str,
    cookie: Option<&str>,
    pairs: &[(&str, &str)],
) -> reqwest::Response {
    let mut request = env
        .browser
        .post(env.url(path))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(form_body(pairs));
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    request.send().await.expect("form post")
}

pub async fn get_page(env: &TestEnv, path: &str, cookie: Option<&str>) -> reqwest::Response {
    let mut request = env.browser.get(env.url(path));
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    request.send().await.expect("page get")
}

// Logs the stub administrator in and returns the session cookie.
pub async fn login(env: &TestEnv) -> String {
    let response = post_form(
        env,
        "/auth/login",
        None,
        &[("username", ADMIN_USERNAME), ("password", ADMIN_PASSWORD)],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    session_cookie(&response).expect("login sets a session cookie")
}
