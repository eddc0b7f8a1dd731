use crate::domain::datetime;
use crate::domain::validation::{ValidationErrors, check_length};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// Opaque credential proving the caller is an authenticated administrator.
// Never empty; mutating API calls take it by reference so a missing token
// cannot reach the wire.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep tokens out of logs.
impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

// Body of `POST auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl LoginRequest {
    pub fn validate(self) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let username = self.username.trim().to_string();
        if username.is_empty() {
            errors.add("username", "is required");
        } else {
            check_length(&mut errors, "username", &username, 3, 50);
        }
        if self.password.is_empty() {
            errors.add("password", "is required");
        } else {
            check_length(&mut errors, "password", &self.password, 6, 100);
        }
        errors.finish(Self {
            username,
            password: self.password,
        })
    }
}

// Body of `POST auth/refresh`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(with = "datetime")]
    pub expires_at: NaiveDateTime,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub administrator: AdministratorInfo,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdministratorInfo {
    pub id: String,
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
}
