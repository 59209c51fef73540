//! Service contracts a platform can expose
//!
//! Every platform exposes some subset of these services. Calls are
//! synchronous from the caller's point of view; SDK bindings that are
//! asynchronous internally block or cache behind these methods.

use crate::types::{Achievement, LeaderboardEntry, SessionId, User};

/// Error returned by platform service operations
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("No user is signed in")]
    NotSignedIn,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("Operation not supported: {0}")]
    Unsupported(&'static str),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Backend error: {0}")]
    Backend(String),
}

/// User identity and authentication
pub trait UserService: Send + Sync {
    /// The currently signed-in user, if any
    fn current_user(&self) -> Result<Option<User>, ServiceError>;

    /// Sign in and return the resulting user
    fn sign_in(&self) -> Result<User, ServiceError>;

    fn sign_out(&self) -> Result<(), ServiceError>;
}

/// Score boards
pub trait LeaderboardService: Send + Sync {
    fn submit_score(&self, board: &str, score: i64) -> Result<(), ServiceError>;

    /// Highest-ranked entries, at most `count` of them, ordered by rank
    fn top_entries(&self, board: &str, count: usize)
        -> Result<Vec<LeaderboardEntry>, ServiceError>;
}

/// Achievements for the signed-in user
pub trait AchievementService: Send + Sync {
    fn unlock(&self, id: &str) -> Result<(), ServiceError>;

    /// Record partial progress in `0.0..=1.0`
    fn set_progress(&self, id: &str, progress: f32) -> Result<(), ServiceError>;

    fn achievements(&self) -> Result<Vec<Achievement>, ServiceError>;
}

/// Key/value save-data storage
pub trait StorageService: Send + Sync {
    fn save(&self, key: &str, data: &[u8]) -> Result<(), ServiceError>;

    /// Returns `Ok(None)` when the key has never been saved
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, ServiceError>;

    /// Returns whether anything was deleted
    fn delete(&self, key: &str) -> Result<bool, ServiceError>;

    fn exists(&self, key: &str) -> Result<bool, ServiceError> {
        Ok(self.load(key)?.is_some())
    }

    fn keys(&self) -> Result<Vec<String>, ServiceError>;
}

/// Session-based multiplayer
pub trait MultiplayerService: Send + Sync {
    fn host_session(&self, max_players: u32) -> Result<SessionId, ServiceError>;

    fn join_session(&self, id: &SessionId) -> Result<(), ServiceError>;

    fn leave_session(&self) -> Result<(), ServiceError>;
}
