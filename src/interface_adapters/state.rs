use async_trait::async_trait;
use chrono::{Local, NaiveDateTime, TimeDelta};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::domain::{
    AuthApi, BookingApi, Clock, MenuApi, SessionChange, SessionData, SessionStore, TableApi,
};
use crate::use_cases::{DashboardUseCase, MenuCatalogUseCase};

// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    // We use Arc<dyn Trait> to hold any implementation (dependency injection).
    pub auth: Arc<dyn AuthApi>,
    pub menu: Arc<dyn MenuApi>,
    pub tables: Arc<dyn TableApi>,
    pub bookings: Arc<dyn BookingApi>,
    pub sessions: Arc<dyn SessionStore>,
    pub clock: Arc<dyn Clock>,
    // External booking front-end, when one is deployed.
    pub booking_app_url: Option<String>,
}

impl AppState {
    pub fn dashboard(&self) -> DashboardUseCase {
        DashboardUseCase {
            tables: Arc::clone(&self.tables),
            menu: Arc::clone(&self.menu),
            bookings: Arc::clone(&self.bookings),
            clock: Arc::clone(&self.clock),
        }
    }

    pub fn catalog(&self) -> MenuCatalogUseCase {
        MenuCatalogUseCase {
            menu: Arc::clone(&self.menu),
        }
    }
}

struct StoredSession {
    data: SessionData,
    last_seen: NaiveDateTime,
}

// In-memory session store adapter. Entries idle for longer than the timeout
// are dropped on access or by `purge_expired`.
#[derive(Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<String, StoredSession>>>,
    clock: Arc<dyn Clock>,
    idle_timeout: TimeDelta,
}

impl InMemorySessionStore {
    pub fn new(clock: Arc<dyn Clock>, idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            clock,
            idle_timeout: TimeDelta::from_std(idle_timeout)
                .unwrap_or_else(|_| TimeDelta::minutes(30)),
        }
    }

    fn is_expired(&self, stored: &StoredSession, now: NaiveDateTime) -> bool {
        now - stored.last_seen > self.idle_timeout
    }

    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, stored| !self.is_expired(stored, now));
        before - sessions.len()
    }

    // Periodically evicts idle sessions until the runtime shuts down.
    pub fn spawn_sweeper(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let purged = store.purge_expired().await;
                if purged > 0 {
                    tracing::debug!(purged, "expired sessions purged");
                }
            }
        })
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, session_id: &str) -> Result<Option<SessionData>, String> {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().await;
        let expired = match sessions.get(session_id) {
            Some(stored) => self.is_expired(stored, now),
            None => return Ok(None),
        };
        if expired {
            sessions.remove(session_id);
            return Ok(None);
        }
        Ok(sessions.get_mut(session_id).map(|stored| {
            stored.last_seen = now;
            stored.data.clone()
        }))
    }

    async fn create(&self, session_id: &str, data: SessionData) -> Result<(), String> {
        let last_seen = self.clock.now();
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session_id.to_string(), StoredSession { data, last_seen });
        Ok(())
    }

    async fn apply(&self, session_id: &str, change: &SessionChange) -> Result<bool, String> {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().await;
        let expired = match sessions.get(session_id) {
            Some(stored) => self.is_expired(stored, now),
            None => return Ok(false),
        };
        if expired {
            sessions.remove(session_id);
            return Ok(false);
        }
        Ok(match sessions.get_mut(session_id) {
            Some(stored) => {
                change.apply_to(&mut stored.data);
                stored.last_seen = now;
                true
            }
            None => false,
        })
    }

    async fn remove(&self, session_id: &str) -> Result<Option<SessionData>, String> {
        let mut sessions = self.sessions.lock().await;
        Ok(sessions.remove(session_id).map(|stored| stored.data))
    }
}

// System clock adapter; the dashboard compares against server-local time.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
