use std::collections::BTreeMap;

use async_trait::async_trait;
use gatekeeper_sdk::{DirectoryClient, DirectoryError};

/// Username to groups table.
pub struct StaticDirectory {
    users: BTreeMap<String, Vec<String>>,
}

impl StaticDirectory {
    #[must_use]
    pub fn new(users: BTreeMap<String, Vec<String>>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl DirectoryClient for StaticDirectory {
    async fn groups_for_user(&self, username: &str) -> Result<Vec<String>, DirectoryError> {
        self.users
            .get(username)
            .cloned()
            .ok_or_else(|| DirectoryError::UserNotFound {
                username: username.to_owned(),
            })
    }
}
