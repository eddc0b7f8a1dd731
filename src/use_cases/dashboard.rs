use std::sync::Arc;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::task::JoinError;

use crate::domain::{
    BearerToken, Booking, BookingApi, Clock, MenuApi, MenuItem, ServiceResponse, Table, TableApi,
};

// Summary figures shown on the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatistics {
    pub total_tables: usize,
    pub active_tables: usize,
    pub inactive_tables: usize,
    pub total_capacity: i64,
    pub average_capacity: f64,

    pub total_menu_items: usize,
    pub available_menu_items: usize,
    pub popular_menu_items: usize,
    pub unavailable_menu_items: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_price: Decimal,
    pub most_popular_category: Option<String>,

    pub total_bookings: usize,
    pub today_bookings: usize,
    pub upcoming_bookings: usize,
    pub past_bookings: usize,
    pub total_guests: i64,

    // Tables with at least one booking right now.
    pub tables_with_bookings: usize,
    // Active tables with no bookings.
    pub available_tables: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub statistics: DashboardStatistics,
    // One "<resource>: <message>" entry per failed source.
    pub errors: Vec<String>,
    pub warning: Option<String>,
}

impl DashboardReport {
    pub fn into_envelope(self) -> ServiceResponse<DashboardStatistics> {
        match self.warning {
            None => ServiceResponse::success(self.statistics, "Statistics loaded successfully"),
            Some(warning) => ServiceResponse {
                succeeded: false,
                message: warning,
                data: Some(self.statistics),
                errors: self.errors,
            },
        }
    }
}

// Dashboard aggregation use case with injected dependencies.
pub struct DashboardUseCase {
    pub tables: Arc<dyn TableApi>,
    pub menu: Arc<dyn MenuApi>,
    pub bookings: Arc<dyn BookingApi>,
    pub clock: Arc<dyn Clock>,
}

impl DashboardUseCase {
    /// Loads tables, menu items and bookings concurrently and folds them into
    /// statistics.
    ///
    /// A failed or panicking source contributes zeros and one entry in
    /// `errors`; the others are still aggregated.
    pub async fn execute(&self, token: &BearerToken) -> DashboardReport {
        // Fan out: the three fetches are independent and run as separate tasks so a
        // fault in one branch cannot take the others down.
        let tables = {
            let api = Arc::clone(&self.tables);
            let token = token.clone();
            tokio::spawn(async move { api.list_all(&token).await })
        };
        let menu = {
            let api = Arc::clone(&self.menu);
            let token = token.clone();
            tokio::spawn(async move { api.list_all(&token).await })
        };
        let bookings = {
            let api = Arc::clone(&self.bookings);
            let token = token.clone();
            tokio::spawn(async move { api.list_all(&token).await })
        };

        // Fan in: wait for every branch before aggregating.
        let (tables, menu, bookings) = tokio::join!(tables, menu, bookings);

        let mut errors = Vec::new();
        let tables = settle("tables", tables, &mut errors);
        let menu = settle("menu items", menu, &mut errors);
        let bookings = settle("bookings", bookings, &mut errors);

        let statistics = compute_statistics(&tables, &menu, &bookings, self.clock.now());

        let warning = if errors.is_empty() {
            None
        } else {
            tracing::warn!(errors = ?errors, "dashboard rendered with partial data");
            Some(format!(
                "Some statistics could not be loaded: {}",
                errors.join("; ")
            ))
        };

        DashboardReport {
            statistics,
            errors,
            warning,
        }
    }
}

fn settle<T: Default>(
    resource: &str,
    joined: Result<ServiceResponse<T>, JoinError>,
    errors: &mut Vec<String>,
) -> T {
    match joined {
        Ok(response) if response.succeeded => response.data_or_default(),
        Ok(response) => {
            errors.push(format!("{resource}: {}", response.message));
            T::default()
        }
        Err(err) => {
            tracing::error!(resource, error = %err, "dashboard fetch task failed");
            errors.push(format!("{resource}: unexpected error while loading"));
            T::default()
        }
    }
}

/// Pure fold of the three lists; `now` is the server's current local time.
pub fn compute_statistics(
    tables: &[Table],
    menu: &[MenuItem],
    bookings: &[Booking],
    now: NaiveDateTime,
) -> DashboardStatistics {
    let total_tables = tables.len();
    let active_tables = tables.iter().filter(|t| t.is_active).count();
    let total_capacity: i64 = tables.iter().map(|t| i64::from(t.capacity)).sum();
    let average_capacity = if total_tables == 0 {
        0.0
    } else {
        total_capacity as f64 / total_tables as f64
    };

    let total_menu_items = menu.len();
    let available_menu_items = menu.iter().filter(|m| m.is_available).count();
    let average_price = if total_menu_items == 0 {
        Decimal::ZERO
    } else {
        let sum: Decimal = menu.iter().map(|m| m.price).sum();
        (sum / Decimal::from(total_menu_items)).round_dp(2)
    };

    let today = now.date();

    DashboardStatistics {
        total_tables,
        active_tables,
        inactive_tables: total_tables - active_tables,
        total_capacity,
        average_capacity,

        total_menu_items,
        available_menu_items,
        popular_menu_items: menu.iter().filter(|m| m.is_popular).count(),
        unavailable_menu_items: total_menu_items - available_menu_items,
        average_price,
        most_popular_category: most_popular_category(menu),

        total_bookings: bookings.len(),
        today_bookings: bookings
            .iter()
            .filter(|b| b.booking_date_time.date() == today)
            .count(),
        upcoming_bookings: bookings
            .iter()
            .filter(|b| b.booking_date_time > now)
            .count(),
        past_bookings: bookings
            .iter()
            .filter(|b| b.booking_date_time < now)
            .count(),
        total_guests: bookings.iter().map(|b| i64::from(b.number_of_guests)).sum(),

        tables_with_bookings: tables
            .iter()
            .filter(|t| t.current_bookings_count > 0)
            .count(),
        available_tables: tables
            .iter()
            .filter(|t| t.is_active && t.current_bookings_count == 0)
            .count(),
    }
}

// Ties go to the category seen first.
fn most_popular_category(menu: &[MenuItem]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for item in menu {
        match counts.iter_mut().find(|(category, _)| *category == item.category) {
            Some((_, count)) => *count += 1,
            None => counts.push((item.category.as_str(), 1)),
        }
    }
    // sort_by is stable, so first-seen order survives among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.first().map(|(category, _)| category.to_string())
}
