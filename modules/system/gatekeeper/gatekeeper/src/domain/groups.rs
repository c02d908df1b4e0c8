use std::collections::BTreeSet;
use std::sync::Arc;

use gatekeeper_sdk::DirectoryClient;
use tracing::{debug, warn};

use crate::config::AllowList;

/// Groups a user belongs to, as reported by the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSet(BTreeSet<String>);

impl GroupSet {
    /// True when at least one group is shared with `allow_list`.
    #[must_use]
    pub fn intersects(&self, allow_list: &AllowList) -> bool {
        allow_list.iter().any(|group| self.0.contains(group))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for GroupSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Decides whether a user may proceed based on group membership.
///
/// Fails closed: any directory error is logged and treated as "not a member".
#[derive(Clone)]
pub struct GroupGatekeeper {
    directory: Arc<dyn DirectoryClient>,
}

impl GroupGatekeeper {
    #[must_use]
    pub fn new(directory: Arc<dyn DirectoryClient>) -> Self {
        Self { directory }
    }

    pub async fn is_authorized(&self, username: &str, allow_list: &AllowList) -> bool {
        let groups: GroupSet = match self.directory.groups_for_user(username).await {
            Ok(groups) => groups.into_iter().collect(),
            Err(err) => {
                warn!(username, error = %err, "directory lookup failed");
                return false;
            }
        };

        if groups.is_empty() {
            debug!(username, "User belongs to no groups");
            return false;
        }

        let member = groups.intersects(allow_list);
        debug!(
            username,
            groups = groups.len(),
            allowed = member,
            "Group membership evaluated"
        );
        member
    }
}
