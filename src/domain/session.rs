use serde::Serialize;

use crate::domain::auth::{BearerToken, TokenPair};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Info,
    Warning,
    Error,
}

// One-time notice shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

// Everything this tier remembers about a browser between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionData {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub admin_name: Option<String>,
    pub admin_username: Option<String>,
    pub flashes: Vec<Flash>,
}

impl SessionData {
    pub fn bearer_token(&self) -> Option<BearerToken> {
        self.access_token.clone().and_then(BearerToken::new)
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer_token().is_some()
    }

    pub fn sign_in(&mut self, tokens: &TokenPair) {
        self.access_token = Some(tokens.access_token.clone());
        self.refresh_token = Some(tokens.refresh_token.clone());
        self.admin_name = Some(tokens.administrator.name.clone());
        self.admin_username = Some(tokens.administrator.username.clone());
    }

    // Keeps the administrator identity; only the token pair rotates.
    pub fn rotate_tokens(&mut self, tokens: &TokenPair) {
        self.access_token = Some(tokens.access_token.clone());
        self.refresh_token = Some(tokens.refresh_token.clone());
    }

    pub fn sign_out(&mut self) {
        self.access_token = None;
        self.refresh_token = None;
        self.admin_name = None;
        self.admin_username = None;
    }

    pub fn flash(&mut self, kind: FlashKind, message: impl Into<String>) {
        self.flashes.push(Flash {
            kind,
            message: message.into(),
        });
    }

    pub fn take_flashes(&mut self) -> Vec<Flash> {
        std::mem::take(&mut self.flashes)
    }

    pub fn identity(&self) -> SessionIdentity {
        SessionIdentity {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
            admin_name: self.admin_name.clone(),
            admin_username: self.admin_username.clone(),
        }
    }

    pub fn set_identity(&mut self, identity: SessionIdentity) {
        self.access_token = identity.access_token;
        self.refresh_token = identity.refresh_token;
        self.admin_name = identity.admin_name;
        self.admin_username = identity.admin_username;
    }
}

/// Credentials and display identity held by a session. All `None` when signed out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionIdentity {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub admin_name: Option<String>,
    pub admin_username: Option<String>,
}

/// What a single request did to its session.
///
/// Replayed onto the stored copy when the request finishes, so requests that
/// overlap only ever write the fields they touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionChange {
    pub identity: Option<SessionIdentity>,
    // Stored flashes this request displayed, oldest first.
    pub shown_flashes: Vec<Flash>,
    pub new_flashes: Vec<Flash>,
}

impl SessionChange {
    pub fn is_empty(&self) -> bool {
        self.identity.is_none() && self.shown_flashes.is_empty() && self.new_flashes.is_empty()
    }

    pub fn apply_to(&self, data: &mut SessionData) {
        if let Some(identity) = &self.identity {
            data.set_identity(identity.clone());
        }
        // A flash shown by another request in the meantime is already gone.
        for shown in &self.shown_flashes {
            if let Some(position) = data.flashes.iter().position(|flash| flash == shown) {
                data.flashes.remove(position);
            }
        }
        data.flashes.extend(self.new_flashes.iter().cloned());
    }
}
