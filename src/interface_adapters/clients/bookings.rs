use crate::domain::{BearerToken, Booking, BookingApi, ServiceResponse, UpdateBooking};
use crate::interface_adapters::clients::http::{ApiHttp, Call};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;

const BOOKING: &str = "Booking";
const BOOKINGS: &str = "Bookings";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone)]
pub struct BookingClient {
    api: ApiHttp,
}

impl BookingClient {
    pub fn new(api: ApiHttp) -> Self {
        Self { api }
    }
}

#[async_trait]
impl BookingApi for BookingClient {
    async fn list_all(&self, token: &BearerToken) -> ServiceResponse<Vec<Booking>> {
        let request = self
            .api
            .request(Method::GET, self.api.endpoint(&["Booking"]), Some(token));
        self.api
            .fetch(Call::new("bookings.list_all", BOOKINGS), request, "Bookings loaded")
            .await
    }

    async fn get(&self, token: &BearerToken, id: i32) -> ServiceResponse<Booking> {
        let id_segment = id.to_string();
        let url = self.api.endpoint(&["Booking", id_segment.as_str()]);
        let request = self.api.request(Method::GET, url, Some(token));
        self.api
            .fetch(Call::new("bookings.get", BOOKING).with_id(id), request, "Booking loaded")
            .await
    }

    async fn by_date(&self, token: &BearerToken, date: NaiveDate) -> ServiceResponse<Vec<Booking>> {
        let date = date.format(DATE_FORMAT).to_string();
        let url = self
            .api
            .endpoint_with_query(&["Booking", "by-date"], &[("date", date.as_str())]);
        let request = self.api.request(Method::GET, url, Some(token));
        self.api
            .fetch(Call::new("bookings.by_date", BOOKINGS), request, "Bookings loaded")
            .await
    }

    async fn by_date_range(
        &self,
        token: &BearerToken,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResponse<Vec<Booking>> {
        let start = start.format(DATE_FORMAT).to_string();
        let end = end.format(DATE_FORMAT).to_string();
        let url = self.api.endpoint_with_query(
            &["Booking", "date-range"],
            &[("startDate", start.as_str()), ("endDate", end.as_str())],
        );
        let request = self.api.request(Method::GET, url, Some(token));
        self.api
            .fetch(
                Call::new("bookings.by_date_range", BOOKINGS),
                request,
                "Bookings loaded",
            )
            .await
    }

    async fn update(
        &self,
        token: &BearerToken,
        id: i32,
        changes: &UpdateBooking,
    ) -> ServiceResponse<Booking> {
        let id_segment = id.to_string();
        let url = self.api.endpoint(&["Booking", id_segment.as_str()]);
        let request = self.api.request(Method::PUT, url, Some(token)).json(changes);
        self.api
            .fetch(
                Call::new("bookings.update", BOOKING).with_id(id),
                request,
                "Booking updated successfully",
            )
            .await
    }

    async fn delete(&self, token: &BearerToken, id: i32) -> ServiceResponse<()> {
        let id_segment = id.to_string();
        let url = self.api.endpoint(&["Booking", id_segment.as_str()]);
        let request = self.api.request(Method::DELETE, url, Some(token));
        self.api
            .execute(
                Call::new("bookings.delete", BOOKING).with_id(id),
                request,
                "Booking deleted successfully",
            )
            .await
    }
}
