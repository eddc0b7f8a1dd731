use crate::domain::{BearerToken, CreateMenuItem, MenuApi, MenuItem, ServiceResponse, UpdateMenuItem};
use crate::interface_adapters::clients::http::{ApiHttp, Call};
use async_trait::async_trait;
use reqwest::Method;

const ITEM: &str = "Menu item";
const ITEMS: &str = "Menu items";

// `menuitem` endpoints of the restaurant API.
#[derive(Clone)]
pub struct MenuClient {
    api: ApiHttp,
}

impl MenuClient {
    pub fn new(api: ApiHttp) -> Self {
        Self { api }
    }

    async fn list(
        &self,
        operation: &'static str,
        segments: &[&str],
        query: &[(&str, &str)],
        token: Option<&BearerToken>,
    ) -> ServiceResponse<Vec<MenuItem>> {
        let url = self.api.endpoint_with_query(segments, query);
        let request = self.api.request(Method::GET, url, token);
        self.api
            .fetch(Call::new(operation, ITEMS), request, "Menu items loaded")
            .await
    }
}

#[async_trait]
impl MenuApi for MenuClient {
    async fn list_available(&self) -> ServiceResponse<Vec<MenuItem>> {
        self.list("menu.list_available", &["menuitem"], &[], None).await
    }

    async fn search(&self, term: &str) -> ServiceResponse<Vec<MenuItem>> {
        self.list("menu.search", &["menuitem", "search"], &[("term", term)], None)
            .await
    }

    async fn by_category(&self, category: &str) -> ServiceResponse<Vec<MenuItem>> {
        self.list("menu.by_category", &["menuitem", "category", category], &[], None)
            .await
    }

    async fn categories(&self) -> ServiceResponse<Vec<String>> {
        let url = self.api.endpoint(&["menuitem", "categories"]);
        let request = self.api.request(Method::GET, url, None);
        self.api
            .fetch(Call::new("menu.categories", "Categories"), request, "Categories loaded")
            .await
    }

    async fn popular(&self) -> ServiceResponse<Vec<MenuItem>> {
        self.list("menu.popular", &["menuitem", "popular"], &[], None).await
    }

    async fn list_all(&self, token: &BearerToken) -> ServiceResponse<Vec<MenuItem>> {
        self.list("menu.list_all", &["menuitem", "admin", "all"], &[], Some(token))
            .await
    }

    async fn get(&self, token: Option<&BearerToken>, id: i32) -> ServiceResponse<MenuItem> {
        let id_segment = id.to_string();
        let url = self.api.endpoint(&["menuitem", id_segment.as_str()]);
        let request = self.api.request(Method::GET, url, token);
        self.api
            .fetch(Call::new("menu.get", ITEM).with_id(id), request, "Menu item loaded")
            .await
    }

    async fn create(&self, token: &BearerToken, item: &CreateMenuItem) -> ServiceResponse<MenuItem> {
        let url = self.api.endpoint(&["menuitem"]);
        let request = self.api.request(Method::POST, url, Some(token)).json(item);
        self.api
            .fetch(
                Call::new("menu.create", ITEM),
                request,
                "Menu item created successfully",
            )
            .await
    }

    async fn update(
        &self,
        token: &BearerToken,
        id: i32,
        changes: &UpdateMenuItem,
    ) -> ServiceResponse<MenuItem> {
        let id_segment = id.to_string();
        let url = self.api.endpoint(&["menuitem", id_segment.as_str()]);
        let request = self.api.request(Method::PUT, url, Some(token)).json(changes);
        self.api
            .fetch(
                Call::new("menu.update", ITEM).with_id(id),
                request,
                "Menu item updated successfully",
            )
            .await
    }

    async fn delete(&self, token: &BearerToken, id: i32) -> ServiceResponse<()> {
        let id_segment = id.to_string();
        let url = self.api.endpoint(&["menuitem", id_segment.as_str()]);
        let request = self.api.request(Method::DELETE, url, Some(token));
        self.api
            .execute(
                Call::new("menu.delete", ITEM).with_id(id),
                request,
                "Menu item deleted successfully",
            )
            .await
    }

    async fn toggle_popular(&self, token: &BearerToken, id: i32) -> ServiceResponse<MenuItem> {
        let id_segment = id.to_string();
        let url = self
            .api
            .endpoint(&["menuitem", id_segment.as_str(), "toggle-popular"]);
        let request = self.api.request(Method::PUT, url, Some(token));
        self.api
            .fetch(
                Call::new("menu.toggle_popular", ITEM).with_id(id),
                request,
                "Popular flag updated",
            )
            .await
    }
}
