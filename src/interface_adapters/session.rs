use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{BearerToken, Flash, FlashKind, SessionChange, SessionData, TokenPair};
use crate::interface_adapters::state::AppState;

pub const SESSION_COOKIE: &str = "restaurant_session";

/// Request-scoped view of the browser session.
///
/// Handlers read and mutate it through the request extensions. Every mutation
/// is also recorded as a [`SessionChange`]; the middleware replays only that
/// change onto the store once the handler is done.
#[derive(Clone, Default)]
pub struct SessionHandle {
    state: Arc<Mutex<HandleState>>,
}

#[derive(Default)]
struct HandleState {
    // Invariant: `data.flashes` is the unshown stored flashes followed by
    // `change.new_flashes`.
    data: SessionData,
    change: SessionChange,
    // Sign-in and sign-out move the session to a fresh id.
    renew: bool,
}

pub(crate) struct SessionOutcome {
    pub data: SessionData,
    pub change: SessionChange,
    pub renew: bool,
}

impl SessionHandle {
    pub fn new(data: SessionData) -> Self {
        Self {
            state: Arc::new(Mutex::new(HandleState {
                data,
                ..Default::default()
            })),
        }
    }

    pub async fn snapshot(&self) -> SessionData {
        self.state.lock().await.data.clone()
    }

    pub async fn read<R>(&self, f: impl FnOnce(&SessionData) -> R) -> R {
        f(&self.state.lock().await.data)
    }

    pub async fn bearer_token(&self) -> Option<BearerToken> {
        self.state.lock().await.data.bearer_token()
    }

    pub async fn flash(&self, kind: FlashKind, message: impl Into<String>) {
        let flash = Flash {
            kind,
            message: message.into(),
        };
        let mut state = self.state.lock().await;
        state.data.flashes.push(flash.clone());
        state.change.new_flashes.push(flash);
    }

    pub async fn take_flashes(&self) -> Vec<Flash> {
        let mut state = self.state.lock().await;
        let taken = state.data.take_flashes();
        let added = std::mem::take(&mut state.change.new_flashes).len();
        let stored = taken.len().saturating_sub(added);
        state.change.shown_flashes.extend(taken[..stored].iter().cloned());
        taken
    }

    pub async fn sign_in(&self, tokens: &TokenPair) {
        let mut state = self.state.lock().await;
        state.data.sign_in(tokens);
        let identity = state.data.identity();
        state.change.identity = Some(identity);
        state.renew = true;
    }

    pub async fn sign_out(&self) {
        let mut state = self.state.lock().await;
        state.data.sign_out();
        let identity = state.data.identity();
        state.change.identity = Some(identity);
        state.renew = true;
    }

    pub async fn rotate_tokens(&self, tokens: &TokenPair) {
        let mut state = self.state.lock().await;
        state.data.rotate_tokens(tokens);
        let identity = state.data.identity();
        state.change.identity = Some(identity);
    }

    pub(crate) async fn finish(&self) -> SessionOutcome {
        let mut state = self.state.lock().await;
        SessionOutcome {
            data: state.data.clone(),
            change: std::mem::take(&mut state.change),
            renew: state.renew,
        }
    }
}

// Loads the session before the handler runs and writes back what it changed.
pub async fn session_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let existing = match session_id_from(request.headers()) {
        Some(id) => match state.sessions.load(&id).await {
            Ok(Some(data)) => Some((id, data)),
            Ok(None) => None,
            Err(e) => {
                tracing::error!(error = %e, "failed to load session");
                None
            }
        },
        None => None,
    };
    let (session_id, data) = match existing {
        Some((id, data)) => (Some(id), data),
        None => (None, SessionData::default()),
    };

    let handle = SessionHandle::new(data);
    request.extensions_mut().insert(handle.clone());

    let response = next.run(request).await;
    let outcome = handle.finish().await;

    match session_id {
        Some(id) if !outcome.renew => {
            if !outcome.change.is_empty() {
                match state.sessions.apply(&id, &outcome.change).await {
                    Ok(true) => {}
                    Ok(false) => tracing::debug!("session ended while the request was in flight"),
                    Err(e) => tracing::error!(error = %e, "failed to save session"),
                }
            }
            response
        }
        Some(id) => {
            // Carry over whatever the old session still holds, then retire its id.
            let previous = state.sessions.remove(&id).await.unwrap_or_else(|e| {
                tracing::error!(error = %e, "failed to remove session");
                None
            });
            let mut data = previous.unwrap_or_default();
            outcome.change.apply_to(&mut data);
            start_session(&state, response, data, true).await
        }
        None => start_session(&state, response, outcome.data, outcome.renew).await,
    }
}

// Issues a fresh id for `data`; an empty session gets no cookie, or an
// expired one when it replaces an earlier session.
async fn start_session(
    state: &AppState,
    mut response: Response,
    data: SessionData,
    replaces: bool,
) -> Response {
    if data == SessionData::default() {
        if replaces {
            set_cookie(&mut response, &expired_session_cookie());
        }
        return response;
    }
    let session_id = Uuid::new_v4().to_string();
    if let Err(e) = state.sessions.create(&session_id, data).await {
        tracing::error!(error = %e, "failed to save session");
        return response;
    }
    set_cookie(&mut response, &session_cookie(&session_id));
    response
}

fn set_cookie(response: &mut Response, cookie: &str) {
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(e) => tracing::error!(error = %e, "invalid session cookie value"),
    }
}

pub fn session_cookie(session_id: &str) -> String {
    format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax")
}

pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

// Only well-formed ids are looked up; anything else starts a fresh session.
fn session_id_from(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
        .map(|id| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).expect("header"));
        headers
    }

    #[test]
    fn when_cookie_header_has_session_then_id_is_extracted() {
        let id = Uuid::new_v4().to_string();

        let found = session_id_from(&headers(&format!("theme=dark; {SESSION_COOKIE}={id}")));

        assert_eq!(found, Some(id));
    }

    #[test]
    fn when_session_cookie_is_not_a_uuid_then_it_is_ignored() {
        assert_eq!(
            session_id_from(&headers(&format!("{SESSION_COOKIE}=../../etc"))),
            None
        );
    }

    #[test]
    fn when_cookie_is_built_then_it_is_http_only_and_lax() {
        let cookie = session_cookie("abc");

        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
    }

    #[tokio::test]
    async fn when_flashes_are_taken_through_handle_then_snapshot_is_empty() {
        let handle = SessionHandle::default();
        handle.flash(FlashKind::Success, "saved").await;

        let taken = handle.take_flashes().await;

        assert_eq!(taken.len(), 1);
        assert!(handle.snapshot().await.flashes.is_empty());
        // Added and shown within one request: nothing left to store.
        assert!(handle.finish().await.change.is_empty());
    }

    #[tokio::test]
    async fn when_stored_flashes_are_shown_then_change_records_them() {
        let mut data = SessionData::default();
        data.flash(FlashKind::Warning, "log in first");
        let handle = SessionHandle::new(data);
        handle.flash(FlashKind::Info, "fresh").await;

        let taken = handle.take_flashes().await;
        let outcome = handle.finish().await;

        assert_eq!(taken.len(), 2);
        assert_eq!(outcome.change.shown_flashes.len(), 1);
        assert_eq!(outcome.change.shown_flashes[0].message, "log in first");
        assert!(outcome.change.new_flashes.is_empty());
        assert!(!outcome.renew);
    }

    #[tokio::test]
    async fn when_only_read_then_no_change_is_recorded() {
        let data = SessionData {
            access_token: Some("access".to_string()),
            ..Default::default()
        };
        let handle = SessionHandle::new(data);

        assert!(handle.bearer_token().await.is_some());
        assert!(handle.finish().await.change.is_empty());
    }

    #[tokio::test]
    async fn when_signing_out_then_session_is_renewed_with_cleared_identity() {
        let data = SessionData {
            access_token: Some("access".to_string()),
            admin_name: Some("Site Admin".to_string()),
            ..Default::default()
        };
        let handle = SessionHandle::new(data);

        handle.sign_out().await;
        let outcome = handle.finish().await;

        assert!(outcome.renew);
        assert_eq!(outcome.change.identity, Some(Default::default()));
    }

    #[test]
    fn when_cookie_is_expired_then_max_age_is_zero() {
        assert!(expired_session_cookie().contains("Max-Age=0"));
    }
}
