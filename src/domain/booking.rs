use crate::domain::datetime;
use crate::domain::validation::{ValidationErrors, check_length, non_blank, parse_in_range};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const GUESTS_RANGE: (i32, i32) = (1, 20);

// Every booking occupies its table for a fixed slot.
pub const BOOKING_DURATION_HOURS: i64 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i32,
    #[serde(with = "datetime")]
    pub booking_date_time: NaiveDateTime,
    pub number_of_guests: i32,
    #[serde(default)]
    pub special_requests: Option<String>,
    #[serde(default, with = "datetime")]
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub customer: Option<CustomerSummary>,
    #[serde(default)]
    pub table: Option<TableSummary>,
}

impl Booking {
    // Display-only; the API never stores an end time.
    pub fn end_time(&self) -> NaiveDateTime {
        self.booking_date_time + Duration::hours(BOOKING_DURATION_HOURS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    pub id: i32,
    pub table_number: i32,
    pub capacity: i32,
}

// Body of `PUT Booking/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBooking {
    #[serde(skip_serializing_if = "Option::is_none", with = "datetime::option")]
    pub booking_date_time: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_guests: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub booking_date_time: String,
    #[serde(default)]
    pub number_of_guests: String,
    #[serde(default)]
    pub special_requests: String,
}

impl From<&Booking> for BookingForm {
    fn from(booking: &Booking) -> Self {
        Self {
            // datetime-local inputs want minute precision.
            booking_date_time: booking.booking_date_time.format("%Y-%m-%dT%H:%M").to_string(),
            number_of_guests: booking.number_of_guests.to_string(),
            special_requests: booking.special_requests.clone().unwrap_or_default(),
        }
    }
}

impl BookingForm {
    pub fn validate(&self) -> Result<UpdateBooking, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let booking_date_time = match non_blank(Some(self.booking_date_time.as_str())) {
            Some(raw) => {
                let parsed = datetime::parse(raw);
                if parsed.is_none() {
                    errors.add("bookingDateTime", "must be a valid date and time");
                }
                parsed
            }
            None => None,
        };

        let (min, max) = GUESTS_RANGE;
        let number_of_guests = non_blank(Some(self.number_of_guests.as_str()))
            .and_then(|raw| parse_in_range(&mut errors, "numberOfGuests", raw, min, max));

        let special_requests = non_blank(Some(self.special_requests.as_str()));
        if let Some(requests) = special_requests {
            check_length(&mut errors, "specialRequests", requests, 0, 500);
        }

        let update = UpdateBooking {
            booking_date_time,
            number_of_guests,
            special_requests: special_requests.map(str::to_string),
        };
        errors.finish(update)
    }
}
