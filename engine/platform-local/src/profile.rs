//! Local player profile.

use std::sync::{Mutex, MutexGuard, PoisonError};

use platform_core::{ServiceError, User, UserService};

/// A single local player, signed in from the start
#[derive(Debug)]
pub struct LocalProfile {
    user: Mutex<User>,
}

impl LocalProfile {
    pub fn new(profile_name: &str) -> Self {
        let mut user = User::new(format!("local:{}", profile_name), profile_name);
        user.signed_in = true;
        Self {
            user: Mutex::new(user),
        }
    }

    fn user(&self) -> MutexGuard<'_, User> {
        self.user.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl UserService for LocalProfile {
    fn current_user(&self) -> Result<Option<User>, ServiceError> {
        let user = self.user();
        Ok(user.signed_in.then(|| user.clone()))
    }

    fn sign_in(&self) -> Result<User, ServiceError> {
        let mut user = self.user();
        user.signed_in = true;
        Ok(user.clone())
    }

    fn sign_out(&self) -> Result<(), ServiceError> {
        self.user().signed_in = false;
        Ok(())
    }
}
