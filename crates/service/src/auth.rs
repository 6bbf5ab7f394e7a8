//! Token auth demo over the session registry.
//!
//! Accounts are a fixed demo list; the interesting part is the session
//! lifecycle, which `SessionRegistry` owns.

use models::auth::{Account, LoginRequest, Role, TokenResponse};
use tracing::info;

use crate::errors::ServiceError;
use crate::session::{Identity, SessionRegistry};

pub struct AuthService {
    accounts: Vec<Account>,
    sessions: SessionRegistry,
}

impl AuthService {
    pub fn new(accounts: Vec<Account>, sessions: SessionRegistry) -> Self {
        Self { accounts, sessions }
    }

    pub fn seeded() -> Self {
        Self::new(
            vec![
                Account { username: "admin".into(), password: "adminpass".into(), role: Role::Admin },
                Account { username: "user".into(), password: "userpass".into(), role: Role::User },
            ],
            SessionRegistry::default(),
        )
    }

    /// Check credentials and issue a session token.
    pub fn login(&self, req: &LoginRequest) -> Result<TokenResponse, ServiceError> {
        let account = self
            .accounts
            .iter()
            .find(|a| a.username == req.username && a.password == req.password)
            .ok_or_else(|| ServiceError::Unauthenticated("incorrect username or password".into()))?;

        let token = self
            .sessions
            .create(Identity { username: account.username.clone(), role: account.role });
        info!(username = %account.username, "login");
        Ok(TokenResponse { access_token: token, token_type: "Bearer", role: account.role })
    }

    /// Resolve a bearer token; expired sessions are evicted on the way.
    pub fn authenticate(&self, token: &str) -> Result<Identity, ServiceError> {
        self.sessions.validate(token)
    }

    /// Like `authenticate`, but also requires the admin role.
    pub fn authenticate_admin(&self, token: &str) -> Result<Identity, ServiceError> {
        let identity = self.authenticate(token)?;
        if identity.role != Role::Admin {
            return Err(ServiceError::Forbidden("admin access required".into()));
        }
        Ok(identity)
    }

    /// Revoke a session; unknown tokens are ignored.
    pub fn logout(&self, token: &str) {
        self.sessions.revoke(token);
    }
}
