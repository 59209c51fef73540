//! Plain data records exchanged with platform services.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A player account as seen by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: String,
    pub signed_in: bool,
}

impl User {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            signed_in: false,
        }
    }
}

/// One row of a leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub display_name: String,
    /// 1-based rank on the board
    pub rank: u32,
    pub score: i64,
}

/// An achievement and the current player's progress on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub unlocked: bool,
    /// Completion in `0.0..=1.0`
    pub progress: f32,
}

/// Identifier of a hosted or joined multiplayer session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_signed_out() {
        let user = User::new("u-1", "Ada");
        assert!(!user.signed_in);
        assert_eq!(user.display_name, "Ada");
    }
}
