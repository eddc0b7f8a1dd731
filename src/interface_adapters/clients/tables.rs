use crate::domain::{BearerToken, CreateTable, ServiceResponse, Table, TableApi, UpdateTable};
use crate::interface_adapters::clients::http::{ApiHttp, Call};
use async_trait::async_trait;
use reqwest::Method;

const TABLE: &str = "Table";

// `tables` endpoints; every call needs an administrator token.
#[derive(Clone)]
pub struct TableClient {
    api: ApiHttp,
}

impl TableClient {
    pub fn new(api: ApiHttp) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TableApi for TableClient {
    async fn list_all(&self, token: &BearerToken) -> ServiceResponse<Vec<Table>> {
        let request = self
            .api
            .request(Method::GET, self.api.endpoint(&["tables"]), Some(token));
        self.api
            .fetch(Call::new("tables.list_all", "Tables"), request, "Tables loaded")
            .await
    }

    async fn list_active(&self, token: &BearerToken) -> ServiceResponse<Vec<Table>> {
        let request = self.api.request(
            Method::GET,
            self.api.endpoint(&["tables", "active"]),
            Some(token),
        );
        self.api
            .fetch(
                Call::new("tables.list_active", "Active tables"),
                request,
                "Active tables loaded",
            )
            .await
    }

    async fn get(&self, token: &BearerToken, id: i32) -> ServiceResponse<Table> {
        let id_segment = id.to_string();
        let url = self.api.endpoint(&["tables", id_segment.as_str()]);
        let request = self.api.request(Method::GET, url, Some(token));
        self.api
            .fetch(Call::new("tables.get", TABLE).with_id(id), request, "Table loaded")
            .await
    }

    async fn create(&self, token: &BearerToken, table: &CreateTable) -> ServiceResponse<Table> {
        let url = self.api.endpoint(&["tables"]);
        let request = self.api.request(Method::POST, url, Some(token)).json(table);
        self.api
            .fetch(
                Call::new("tables.create", TABLE),
                request,
                "Table created successfully",
            )
            .await
    }

    async fn update(
        &self,
        token: &BearerToken,
        id: i32,
        changes: &UpdateTable,
    ) -> ServiceResponse<Table> {
        let id_segment = id.to_string();
        let url = self.api.endpoint(&["tables", id_segment.as_str()]);
        let request = self.api.request(Method::PUT, url, Some(token)).json(changes);
        self.api
            .fetch(
                Call::new("tables.update", TABLE).with_id(id),
                request,
                "Table updated successfully",
            )
            .await
    }

    async fn delete(&self, token: &BearerToken, id: i32) -> ServiceResponse<()> {
        let id_segment = id.to_string();
        let url = self.api.endpoint(&["tables", id_segment.as_str()]);
        let request = self.api.request(Method::DELETE, url, Some(token));
        self.api
            .execute(
                Call::new("tables.delete", TABLE).with_id(id),
                request,
                "Table deleted successfully",
            )
            .await
    }

    async fn toggle_active(&self, token: &BearerToken, id: i32) -> ServiceResponse<Table> {
        let id_segment = id.to_string();
        let url = self
            .api
            .endpoint(&["tables", id_segment.as_str(), "toggle-active"]);
        let request = self.api.request(Method::PUT, url, Some(token));
        self.api
            .fetch(
                Call::new("tables.toggle_active", TABLE).with_id(id),
                request,
                "Table status updated",
            )
            .await
    }
}
