use serde::Serialize;

/// Uniform outcome of a remote call, typed by the payload the call site expects.
///
/// Clients never return `Err`: transport faults, non-2xx statuses and
/// undecodable bodies all arrive here with `succeeded == false` and a
/// human-readable `message`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse<T> {
    pub succeeded: bool,
    pub message: String,
    pub data: Option<T>,
    pub errors: Vec<String>,
}

impl<T> ServiceResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            message: message.into(),
            data: Some(data),
            errors: Vec::new(),
        }
    }

    // Success without a payload (delete acknowledgements and the like).
    pub fn acknowledged(message: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            message: message.into(),
            data: None,
            errors: Vec::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            message: message.into(),
            data: None,
            errors: Vec::new(),
        }
    }

    pub fn failure_with_errors(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            succeeded: false,
            message: message.into(),
            data: None,
            errors,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Records an error; a successful envelope becomes a failure.
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        if self.succeeded {
            self.succeeded = false;
            self.message = "Operation failed with errors".to_string();
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ServiceResponse<U> {
        ServiceResponse {
            succeeded: self.succeeded,
            message: self.message,
            data: self.data.map(f),
            errors: self.errors,
        }
    }
}

impl<T: Default> ServiceResponse<T> {
    // Payload of a successful call, or the empty default when none was returned.
    pub fn data_or_default(self) -> T {
        self.data.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_error_is_added_to_success_then_envelope_becomes_failure() {
        let mut response = ServiceResponse::success(vec![1, 2], "loaded");

        response.add_error("tables: boom");

        assert!(!response.succeeded);
        assert!(response.has_errors());
        assert_eq!(response.message, "Operation failed with errors");
        assert_eq!(response.data(), Some(&vec![1, 2]));
    }

    #[test]
    fn when_error_is_added_to_failure_then_message_is_kept() {
        let mut response = ServiceResponse::<()>::failure("API returned 500");

        response.add_error("detail");

        assert_eq!(response.message, "API returned 500");
        assert_eq!(response.errors, vec!["detail".to_string()]);
    }

    #[test]
    fn when_acknowledged_list_is_narrowed_then_defaults_to_empty() {
        let response = ServiceResponse::<Vec<u32>>::acknowledged("deleted");

        assert!(response.succeeded);
        assert!(response.data_or_default().is_empty());
    }

    #[test]
    fn when_envelope_is_serialized_then_fields_are_camel_case() {
        let response = ServiceResponse::success(3, "ok");

        let json = serde_json::to_value(&response).expect("expected json");

        assert_eq!(json["succeeded"], true);
        assert_eq!(json["data"], 3);
        assert_eq!(json["errors"], serde_json::json!([]));
    }
}
