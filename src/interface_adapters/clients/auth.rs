use crate::domain::auth::RefreshRequest;
use crate::domain::{AuthApi, BearerToken, LoginRequest, ServiceResponse, TokenPair};
use crate::interface_adapters::clients::http::{ApiCallError, ApiHttp, Call, settle};
use async_trait::async_trait;
use reqwest::Method;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

// Auth endpoints of the restaurant API.
#[derive(Clone)]
pub struct AuthClient {
    api: ApiHttp,
}

impl AuthClient {
    pub fn new(api: ApiHttp) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthApi for AuthClient {
    #[tracing::instrument(name = "auth_login", skip_all, fields(username = %request.username))]
    async fn login(&self, request: &LoginRequest) -> ServiceResponse<TokenPair> {
        let call = Call::new("auth.login", "Administrator");
        let http = self
            .api
            .request(Method::POST, self.api.endpoint(&["auth", "login"]), None)
            .json(request);

        // Bad credentials come back as 401 or 400; both mean the same to the user.
        match self.api.try_fetch::<TokenPair>(call, http).await {
            Err(ApiCallError::Unauthorized | ApiCallError::BadRequest(_)) => {
                tracing::warn!("login rejected by API");
                ServiceResponse::failure(INVALID_CREDENTIALS)
            }
            Ok(tokens) if tokens.access_token.trim().is_empty() => {
                tracing::error!("login succeeded without an access token");
                ServiceResponse::failure("Data format error: empty access token")
            }
            result => settle(call, result, "Login successful"),
        }
    }

    async fn refresh(&self, refresh_token: &str) -> ServiceResponse<TokenPair> {
        let call = Call::new("auth.refresh", "Session");
        let body = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };
        let http = self
            .api
            .request(Method::POST, self.api.endpoint(&["auth", "refresh"]), None)
            .json(&body);
        self.api.fetch(call, http, "Token refreshed").await
    }

    async fn logout(&self, token: &BearerToken) -> ServiceResponse<()> {
        let call = Call::new("auth.logout", "Session");
        let http = self
            .api
            .request(Method::POST, self.api.endpoint(&["auth", "logout"]), Some(token));
        self.api.execute(call, http, "Logged out").await
    }

    async fn validate(&self, token: &BearerToken) -> ServiceResponse<()> {
        let call = Call::new("auth.validate", "Session");
        let http = self
            .api
            .request(Method::GET, self.api.endpoint(&["auth", "validate"]), Some(token));
        self.api.execute(call, http, "Token is valid").await
    }
}
