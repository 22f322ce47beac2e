/**
 * Session Management
 *
 * Server-side sessions keyed by a random id carried in an HttpOnly cookie.
 *
 * - `SessionStore` holds every live session in memory and is shared through
 *   the application state.
 * - `Session` is the request-scoped view of one client's session. Handlers
 *   receive it as an extractor, mutate it through `set_user` / `clear`, and
 *   emit the resulting `Set-Cookie` header with their response.
 *
 * A session holds at most one value: the authenticated username.
 */

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::shared::AppConfig;

/// Data stored in a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionData {
    /// Authenticated username
    pub user: Option<String>,
}

#[derive(Debug, Clone)]
struct SessionRecord {
    data: SessionData,
    /// `None` when the max age overflows `Instant`; such sessions never expire.
    expires_at: Option<Instant>,
}

impl SessionRecord {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// In-memory session store
///
/// Cheap to clone; all clones share the same sessions.
#[derive(Clone, Debug)]
pub struct SessionStore {
    records: Arc<RwLock<HashMap<Uuid, SessionRecord>>>,
    cookie_name: Arc<str>,
    max_age: Duration,
}

impl SessionStore {
    pub fn new(cookie_name: impl Into<String>, max_age: Duration) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            cookie_name: Arc::from(cookie_name.into()),
            max_age,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.session_cookie_name.clone(), config.session_max_age)
    }

    /// Name of the session cookie
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Load a live session. Expired sessions are dropped on access.
    pub async fn load(&self, id: Uuid) -> Option<SessionData> {
        let now = Instant::now();
        {
            let records = self.records.read().await;
            match records.get(&id) {
                None => return None,
                Some(record) if !record.is_expired(now) => return Some(record.data.clone()),
                Some(_) => {}
            }
        }

        tracing::debug!("Session {} expired", id);
        self.records.write().await.remove(&id);
        None
    }

    /// Store `data` under `id`, restarting its lifetime.
    pub async fn save(&self, id: Uuid, data: SessionData) {
        let record = SessionRecord {
            data,
            expires_at: Instant::now().checked_add(self.max_age),
        };
        self.records.write().await.insert(id, record);
    }

    /// Remove a session. Returns whether it existed.
    pub async fn remove(&self, id: Uuid) -> bool {
        self.records.write().await.remove(&id).is_some()
    }

    /// Drop every expired session and return how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired(now));
        before - records.len()
    }

    /// Number of stored sessions, expired ones included until purged.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Extract the session id from the request's `Cookie` headers.
    ///
    /// Cookies with another name or a value that is not a UUID are ignored.
    pub fn session_id_from_headers(&self, headers: &HeaderMap) -> Option<Uuid> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .filter(|(name, _)| *name == &*self.cookie_name)
            .find_map(|(_, value)| Uuid::parse_str(value.trim()).ok())
    }

    fn set_cookie(&self, id: Uuid) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.cookie_name,
            id,
            self.max_age.as_secs()
        )
    }

    fn expire_cookie(&self) -> String {
        format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
            self.cookie_name
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CookieChange {
    Unchanged,
    Set(Uuid),
    Expire,
}

/// One client's session for the duration of a request
#[derive(Debug)]
pub struct Session {
    store: SessionStore,
    id: Option<Uuid>,
    data: SessionData,
    cookie: CookieChange,
}

impl Session {
    /// Resolve the session for `id`. Unknown or expired ids yield an
    /// anonymous session.
    pub async fn load(store: SessionStore, id: Option<Uuid>) -> Self {
        let (id, data) = match id {
            Some(id) => match store.load(id).await {
                Some(data) => (Some(id), data),
                None => (None, SessionData::default()),
            },
            None => (None, SessionData::default()),
        };

        Self {
            store,
            id,
            data,
            cookie: CookieChange::Unchanged,
        }
    }

    /// Current session id, if the client has a live session
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Authenticated username, if any
    pub fn user(&self) -> Option<&str> {
        self.data.user.as_deref()
    }

    pub fn data(&self) -> &SessionData {
        &self.data
    }

    /// Mark the session as authenticated for `username`.
    ///
    /// The previous session (if any) is discarded and a fresh id issued.
    pub async fn set_user(&mut self, username: &str) {
        if let Some(old) = self.id.take() {
            self.store.remove(old).await;
        }

        let id = Uuid::new_v4();
        self.data = SessionData {
            user: Some(username.to_string()),
        };
        self.store.save(id, self.data.clone()).await;
        self.id = Some(id);
        self.cookie = CookieChange::Set(id);
    }

    /// Clear all session state. Safe to call on an anonymous session.
    pub async fn clear(&mut self) {
        if let Some(id) = self.id.take() {
            self.store.remove(id).await;
        }
        self.data = SessionData::default();
        self.cookie = CookieChange::Expire;
    }

    /// `Set-Cookie` value reflecting changes made during this request
    pub fn set_cookie_header(&self) -> Option<String> {
        match self.cookie {
            CookieChange::Unchanged => None,
            CookieChange::Set(id) => Some(self.store.set_cookie(id)),
            CookieChange::Expire => Some(self.store.expire_cookie()),
        }
    }
}

impl<S> FromRequestParts<S> for Session
where
    SessionStore: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let store = SessionStore::from_ref(state);
        let id = store.session_id_from_headers(&parts.headers);
        Ok(Session::load(store, id).await)
    }
}
