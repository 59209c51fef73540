//! The platform handle returned by a successful initializer
//!
//! A platform bundles the SDK-backed services behind one object. The registry
//! stores it as `Arc<dyn Platform>` and never inspects or mutates it.

use crate::metadata::PlatformInfo;
use crate::services::{
    AchievementService, LeaderboardService, MultiplayerService, StorageService, UserService,
};

/// A bundle of gaming-platform services
///
/// Every accessor defaults to `None`, so a platform only overrides the
/// services it actually provides.
///
/// # Example Usage
///
/// ```rust
/// # use platform_core::{Platform, PlatformInfo};
/// fn describe(platform: &dyn Platform) -> String {
///     let info = platform.info();
///     let storage = if platform.storage().is_some() { "yes" } else { "no" };
///     format!("{} (storage: {})", info.display_name, storage)
/// }
/// ```
pub trait Platform: Send + Sync + std::fmt::Debug + 'static {
    /// Identification and advertised services
    fn info(&self) -> PlatformInfo;

    fn user(&self) -> Option<&dyn UserService> {
        None
    }

    fn leaderboards(&self) -> Option<&dyn LeaderboardService> {
        None
    }

    fn achievements(&self) -> Option<&dyn AchievementService> {
        None
    }

    fn storage(&self) -> Option<&dyn StorageService> {
        None
    }

    fn multiplayer(&self) -> Option<&dyn MultiplayerService> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ServiceKind;
    use crate::services::ServiceError;
    use crate::types::LeaderboardEntry;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct MockBoards {
        scores: Mutex<Vec<(String, i64)>>,
    }

    impl LeaderboardService for MockBoards {
        fn submit_score(&self, board: &str, score: i64) -> Result<(), ServiceError> {
            self.scores.lock().unwrap().push((board.to_string(), score));
            Ok(())
        }

        fn top_entries(
            &self,
            board: &str,
            count: usize,
        ) -> Result<Vec<LeaderboardEntry>, ServiceError> {
            let mut scores: Vec<i64> = self
                .scores
                .lock()
                .unwrap()
                .iter()
                .filter(|(b, _)| b == board)
                .map(|(_, s)| *s)
                .collect();
            scores.sort_unstable_by(|a, b| b.cmp(a));
            Ok(scores
                .into_iter()
                .take(count)
                .enumerate()
                .map(|(i, score)| LeaderboardEntry {
                    user_id: "mock".into(),
                    display_name: "Mock".into(),
                    rank: i as u32 + 1,
                    score,
                })
                .collect())
        }
    }

    #[derive(Debug, Default)]
    struct MockPlatform {
        boards: MockBoards,
    }

    impl Platform for MockPlatform {
        fn info(&self) -> PlatformInfo {
            PlatformInfo::new("mock", "Mock Platform").with_service(ServiceKind::Leaderboards)
        }

        fn leaderboards(&self) -> Option<&dyn LeaderboardService> {
            Some(&self.boards)
        }
    }

    #[test]
    fn test_unprovided_services_default_to_none() {
        let platform = MockPlatform::default();
        assert!(platform.user().is_none());
        assert!(platform.achievements().is_none());
        assert!(platform.storage().is_none());
        assert!(platform.multiplayer().is_none());
        assert!(platform.leaderboards().is_some());
    }

    #[test]
    fn test_service_through_trait_object() {
        let platform: Box<dyn Platform> = Box::new(MockPlatform::default());
        let boards = platform.leaderboards().unwrap();

        boards.submit_score("arcade", 10).unwrap();
        boards.submit_score("arcade", 30).unwrap();
        boards.submit_score("arcade", 20).unwrap();
        boards.submit_score("other", 99).unwrap();

        let top = boards.top_entries("arcade", 2).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].score, 30);
        assert_eq!(top[0].rank, 1);
        assert_eq!(top[1].score, 20);
        assert_eq!(top[1].rank, 2);
    }

    #[test]
    fn test_storage_exists_default_uses_load() {
        #[derive(Debug)]
        struct OneKey;

        impl StorageService for OneKey {
            fn save(&self, _key: &str, _data: &[u8]) -> Result<(), ServiceError> {
                Err(ServiceError::Unsupported("save"))
            }
            fn load(&self, key: &str) -> Result<Option<Vec<u8>>, ServiceError> {
                Ok((key == "slot1").then(|| vec![1]))
            }
            fn delete(&self, _key: &str) -> Result<bool, ServiceError> {
                Ok(false)
            }
            fn keys(&self) -> Result<Vec<String>, ServiceError> {
                Ok(vec!["slot1".into()])
            }
        }

        assert!(OneKey.exists("slot1").unwrap());
        assert!(!OneKey.exists("slot2").unwrap());
        match OneKey.save("slot1", &[]) {
            Err(ServiceError::Unsupported(op)) => assert_eq!(op, "save"),
            other => panic!("Expected Unsupported error, got {:?}", other),
        }
    }
}
