//! Server-held session registry.
//!
//! Maps an opaque high-entropy token to the identity it was issued for.
//! The token is its own key and is never derived from the identity's
//! natural key, so two logins for the same user hold two sessions.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use models::auth::Role;
use uuid::Uuid;

use crate::errors::ServiceError;

/// Who a session belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
struct Session {
    identity: Identity,
    created_at: DateTime<Utc>,
}

/// Token -> session map with a fixed time-to-live.
///
/// Sessions live only in process memory and are lost on restart.
pub struct SessionRegistry {
    sessions: DashMap<String, Session>,
    ttl: Duration,
}

pub const DEFAULT_TTL_SECS: i64 = 3600;

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_TTL_SECS))
    }
}

impl SessionRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self { sessions: DashMap::new(), ttl }
    }

    /// Issue a fresh token for the identity.
    pub fn create(&self, identity: Identity) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.insert(token.clone(), Session { identity, created_at: Utc::now() });
        token
    }

    /// Resolve a token to its identity, failing `Unauthenticated` for
    /// unknown tokens and `Expired` past the TTL. Expired entries are
    /// evicted, so a later validate fails the same way.
    pub fn validate(&self, token: &str) -> Result<Identity, ServiceError> {
        self.validate_at(token, Utc::now())
    }

    fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, ServiceError> {
        // clone out so the map ref is released before any eviction
        let session = match self.sessions.get(token) {
            None => return Err(ServiceError::Unauthenticated("invalid token".into())),
            Some(entry) => entry.clone(),
        };
        if now - session.created_at > self.ttl {
            self.sessions.remove(token);
            return Err(ServiceError::Expired);
        }
        Ok(session.identity)
    }

    /// Drop a session; absent tokens are ignored.
    pub fn revoke(&self, token: &str) {
        self.sessions.remove(token);
    }

    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }
}
