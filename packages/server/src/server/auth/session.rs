use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Session token (random UUID)
pub type SessionToken = String;

/// How long an admin session stays valid
const SESSION_TTL_HOURS: i64 = 24;

/// Session data stored after a successful admin login
#[derive(Clone, Debug)]
pub struct AdminSession {
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl AdminSession {
    pub fn started_now() -> Self {
        Self {
            created_at: chrono::Utc::now(),
        }
    }
}

/// In-memory admin session store
///
/// The login it backs is a shared secret, not a security boundary, so
/// sessions live in process memory and expire after 24 hours.
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, AdminSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a new session and return the token
    pub async fn create_session(&self, session: AdminSession) -> SessionToken {
        let token = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.insert(token.clone(), session);
        token
    }

    /// Get session by token; an expired session is dropped and reads as
    /// absent, so stale entries never accumulate
    pub async fn get_session(&self, token: &str) -> Option<AdminSession> {
        let session = {
            let sessions = self.sessions.read().await;
            sessions.get(token)?.clone()
        };

        let elapsed = chrono::Utc::now().signed_duration_since(session.created_at);
        if elapsed.num_hours() >= SESSION_TTL_HOURS {
            self.sessions.write().await.remove(token);
            return None;
        }

        Some(session)
    }

    /// Delete session (logout)
    pub async fn delete_session(&self, token: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
