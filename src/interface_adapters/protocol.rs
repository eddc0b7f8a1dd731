use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::validation::checkbox;

// Browser-facing query strings and JSON bodies.

#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TablesQuery {
    pub active: Option<String>,
}

impl TablesQuery {
    pub fn active_only(&self) -> bool {
        checkbox(self.active.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BookingsQuery {
    pub date: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingFilter {
    All,
    Date(NaiveDate),
    Range(NaiveDate, NaiveDate),
}

impl BookingsQuery {
    // A complete range beats a single date, which beats no filter.
    // Unparseable dates are treated as absent.
    pub fn filter(&self) -> BookingFilter {
        let from = parse_date(self.from.as_deref());
        let to = parse_date(self.to.as_deref());
        match (from, to, parse_date(self.date.as_deref())) {
            (Some(from), Some(to), _) if from <= to => BookingFilter::Range(from, to),
            (Some(from), Some(to), _) => BookingFilter::Range(to, from),
            (_, _, Some(date)) => BookingFilter::Date(date),
            _ => BookingFilter::All,
        }
    }
}

fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
}

// Response of `POST /auth/refresh`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshResponse {
    pub success: bool,
    pub message: String,
}

// Response of `GET /auth/check`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatusResponse {
    pub is_authenticated: bool,
    pub admin_name: Option<String>,
    pub admin_username: Option<String>,
}
