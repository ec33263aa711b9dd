// core/src/users.rs

use crate::error::{StoreError, StoreResult};
use crate::model::{Role, User, UserId};
use parking_lot::RwLock;
use tracing::info;

/// Registered accounts. Usernames are unique and compared exactly.
#[derive(Debug, Default)]
pub struct UserDirectory {
  users: RwLock<Vec<User>>,
}

impl UserDirectory {
  pub fn new() -> Self {
    Self::default()
  }

  /// Stores a new account with the next free id. The caller hashes the
  /// password.
  pub fn create(&self, username: &str, password_hash: String, role: Role) -> StoreResult<User> {
    let mut users = self.users.write();
    if users.iter().any(|u| u.username == username) {
      return Err(StoreError::UsernameTaken {
        username: username.to_string(),
      });
    }
    let id = users.iter().map(|u| u.id).max().map_or(1, |max| max + 1);
    let user = User {
      id,
      username: username.to_string(),
      password_hash,
      role,
    };
    users.push(user.clone());
    info!(user_id = id, %role, "User account created.");
    Ok(user)
  }

  pub fn find_by_username(&self, username: &str) -> Option<User> {
    self.users.read().iter().find(|u| u.username == username).cloned()
  }

  pub fn username_taken(&self, username: &str) -> bool {
    self.users.read().iter().any(|u| u.username == username)
  }

  pub fn len(&self) -> usize {
    self.users.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.users.read().is_empty()
  }
}
