use crate::domain::{BearerToken, ServiceResponse};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

// Shared reqwest plumbing for the REST API wrappers. One instance (one
// connection pool) is cloned into every resource client.
#[derive(Clone)]
pub struct ApiHttp {
    http: Client,
    base_url: Url,
}

#[derive(Debug, Error)]
pub enum ApiClientInitError {
    #[error("API base URL {0} cannot carry path segments")]
    NotABase(Url),
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

// Everything that can go wrong on one outbound call. Never leaves the client
// layer: `settle` folds it into a failed envelope.
#[derive(Debug, Error)]
pub enum ApiCallError {
    #[error("Request timed out: {0}")]
    Timeout(reqwest::Error),
    #[error("Network error: {0}")]
    Transport(reqwest::Error),
    #[error("{}", missing_message(.resource, .id))]
    NotFound {
        resource: &'static str,
        id: Option<i32>,
    },
    #[error("Validation error: {0}")]
    BadRequest(String),
    #[error("Unauthorized: please log in again")]
    Unauthorized,
    #[error("API returned {status}")]
    Upstream { status: StatusCode },
    #[error("Data format error: {0}")]
    Decode(String),
}

fn missing_message(resource: &str, id: &Option<i32>) -> String {
    match id {
        Some(id) => format!("{resource} with ID {id} not found"),
        None => format!("{resource} not found"),
    }
}

impl ApiCallError {
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiCallError::Timeout(err)
        } else {
            ApiCallError::Transport(err)
        }
    }

    // Caller-side problems are warnings; the rest means the API is unhealthy.
    fn is_client_side(&self) -> bool {
        matches!(
            self,
            ApiCallError::NotFound { .. } | ApiCallError::BadRequest(_) | ApiCallError::Unauthorized
        )
    }
}

// Identifies one outbound call for messages and log fields.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Call {
    pub operation: &'static str,
    pub resource: &'static str,
    pub id: Option<i32>,
}

impl Call {
    pub(crate) fn new(operation: &'static str, resource: &'static str) -> Self {
        Self {
            operation,
            resource,
            id: None,
        }
    }

    pub(crate) fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }
}

impl ApiHttp {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ApiClientInitError> {
        if base_url.cannot_be_a_base() {
            return Err(ApiClientInitError::NotABase(base_url));
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // Appends percent-encoded path segments to the base URL.
    pub(crate) fn endpoint<S: AsRef<str>>(&self, segments: &[S]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            for segment in segments {
                path.push(segment.as_ref());
            }
        }
        url
    }

    pub(crate) fn endpoint_with_query(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.endpoint(segments);
        url.query_pairs_mut().extend_pairs(query);
        url
    }

    pub(crate) fn request(
        &self,
        method: Method,
        url: Url,
        token: Option<&BearerToken>,
    ) -> RequestBuilder {
        let request = self.http.request(method, url);
        match token {
            Some(token) => request.bearer_auth(token.as_str()),
            None => request,
        }
    }

    // Sends and decodes the body into `T`.
    pub(crate) async fn try_fetch<T: DeserializeOwned>(
        &self,
        call: Call,
        request: RequestBuilder,
    ) -> Result<T, ApiCallError> {
        let body = dispatch(call, request).await?;
        serde_json::from_str(&body).map_err(|err| ApiCallError::Decode(err.to_string()))
    }

    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        call: Call,
        request: RequestBuilder,
        success_message: &str,
    ) -> ServiceResponse<T> {
        settle(call, self.try_fetch(call, request).await, success_message)
    }

    // Sends and ignores whatever body comes back.
    pub(crate) async fn execute(
        &self,
        call: Call,
        request: RequestBuilder,
        success_message: &str,
    ) -> ServiceResponse<()> {
        let result = dispatch(call, request).await.map(|_| ());
        match settle(call, result, success_message) {
            response if response.succeeded => ServiceResponse::acknowledged(response.message),
            response => response,
        }
    }
}

async fn dispatch(call: Call, request: RequestBuilder) -> Result<String, ApiCallError> {
    let response = request
        .send()
        .await
        .map_err(ApiCallError::from_transport)?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(ApiCallError::from_transport)?;

    if status.is_success() {
        Ok(body)
    } else {
        Err(classify(call, status, body))
    }
}

pub(crate) fn classify(call: Call, status: StatusCode, body: String) -> ApiCallError {
    match status {
        StatusCode::NOT_FOUND => ApiCallError::NotFound {
            resource: call.resource,
            id: call.id,
        },
        StatusCode::BAD_REQUEST => ApiCallError::BadRequest(body),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiCallError::Unauthorized,
        status => ApiCallError::Upstream { status },
    }
}

// Folds a call outcome into the envelope handlers consume, logging on the way.
pub(crate) fn settle<T>(
    call: Call,
    result: Result<T, ApiCallError>,
    success_message: &str,
) -> ServiceResponse<T> {
    match result {
        Ok(data) => {
            tracing::info!(operation = call.operation, id = ?call.id, "API call succeeded");
            ServiceResponse::success(data, success_message)
        }
        Err(err) if err.is_client_side() => {
            tracing::warn!(operation = call.operation, id = ?call.id, error = %err, "API call rejected");
            ServiceResponse::failure(err.to_string())
        }
        Err(err) => {
            tracing::error!(operation = call.operation, id = ?call.id, error = %err, "API call failed");
            ServiceResponse::failure(err.to_string())
        }
    }
}
