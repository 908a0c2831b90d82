use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::Session;

/// The single configured demo credential. Client-side token checking is a
/// demo affordance, not a security boundary; a real deployment moves
/// verification behind a trusted backend with the same contract.
pub const DEMO_USERNAME: &str = "admin@gmail.com";
pub const DEMO_PASSWORD: &str = "test@123";
const DEMO_USER_ID: &str = "1";
const REGISTERED_USER_ID: &str = "2";

/// Session lifetime encoded into the token, in milliseconds
const TOKEN_TTL_MILLIS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("failed to persist session token: {0}")]
    TokenStore(#[from] std::io::Error),
}

/// Encode a session as base64 of its JSON object
pub fn encode_token(session: &Session) -> String {
    // Session serializes cleanly; a failure here would be a programming error
    let json = serde_json::to_string(session).expect("session serializes to JSON");
    BASE64.encode(json)
}

/// Decode a stored token; None on any malformation
pub fn decode_token(token: &str) -> Option<Session> {
    let bytes = BASE64.decode(token.trim()).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Issues, restores and clears the process-wide session.
///
/// The token lives in a single file at a fixed path, the terminal analog of
/// the browser's one `localStorage` key.
pub struct SessionManager {
    token_path: PathBuf,
    current: Option<Session>,
}

impl SessionManager {
    pub fn new(token_path: impl Into<PathBuf>) -> Self {
        Self {
            token_path: token_path.into(),
            current: None,
        }
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Log in against the demo credential and persist a fresh 24h token
    pub fn login(&mut self, username: &str, password: &str) -> Result<Session, AuthError> {
        if username != DEMO_USERNAME || password != DEMO_PASSWORD {
            return Err(AuthError::InvalidCredentials);
        }
        self.issue(DEMO_USER_ID, username)
    }

    /// Register always succeeds: no uniqueness or validation checks exist,
    /// and every registration mints the same fixed user id. A recorded
    /// design gap, kept as-is.
    pub fn register(&mut self, username: &str, _password: &str) -> Result<Session, AuthError> {
        self.issue(REGISTERED_USER_ID, username)
    }

    /// Restore the persisted session, if any; expired or malformed tokens
    /// trigger logout side effects and yield None
    pub fn restore(&mut self) -> Option<Session> {
        self.restore_at(Utc::now().timestamp_millis())
    }

    pub(crate) fn restore_at(&mut self, now_millis: i64) -> Option<Session> {
        let raw = match std::fs::read_to_string(&self.token_path) {
            Ok(raw) => raw,
            Err(_) => return None,
        };

        match decode_token(&raw) {
            Some(session) if session.is_valid_at(now_millis) => {
                debug!("restored session for {}", session.username);
                self.current = Some(session.clone());
                Some(session)
            }
            Some(session) => {
                warn!("session for {} expired, logging out", session.username);
                self.logout();
                None
            }
            None => {
                warn!("stored token is malformed, logging out");
                self.logout();
                None
            }
        }
    }

    /// Clear the persisted token and the in-memory session
    pub fn logout(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.token_path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("failed to remove token file: {}", e);
            }
        }
        self.current = None;
    }

    fn issue(&mut self, id: &str, username: &str) -> Result<Session, AuthError> {
        let session = Session {
            id: id.to_string(),
            username: username.to_string(),
            exp: Utc::now().timestamp_millis() + TOKEN_TTL_MILLIS,
        };
        std::fs::write(&self.token_path, encode_token(&session))?;
        self.current = Some(session.clone());
        Ok(session)
    }
}
