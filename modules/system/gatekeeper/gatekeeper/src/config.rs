use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

fn default_max_credential_bytes() -> usize {
    8 * 1024
}

/// Gatekeeper configuration.
///
/// Loaded once at process start and never mutated afterwards; every request
/// reads the same instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatekeeperConfig {
    /// Trusted local/dev environment. When true every request is authorized
    /// without looking at credentials.
    pub local_environment: bool,

    /// Groups granting user-level access. A user needs only one of them.
    pub allow_list: AllowList,

    /// Upper bound for `Authorization` and `X-jwt-assertion` header values.
    pub max_credential_bytes: usize,
}

impl Default for GatekeeperConfig {
    fn default() -> Self {
        Self {
            local_environment: false,
            allow_list: AllowList::default(),
            max_credential_bytes: default_max_credential_bytes(),
        }
    }
}

/// Set of group identifiers allowed user-level access.
///
/// Deserializes from either a list (`["admins", "staff"]`) or a single
/// comma-separated string (`"admins, staff"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AllowList(BTreeSet<String>);

impl AllowList {
    #[must_use]
    pub fn new<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            groups
                .into_iter()
                .map(Into::into)
                .map(|g: String| g.trim().to_owned())
                .filter(|g| !g.is_empty())
                .collect(),
        )
    }

    /// Parse a comma-separated list of groups. Blank entries are dropped.
    #[must_use]
    pub fn parse(joined: &str) -> Self {
        Self::new(joined.split(','))
    }

    #[must_use]
    pub fn contains(&self, group: &str) -> bool {
        self.0.contains(group)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<'de> Deserialize<'de> for AllowList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            List(Vec<String>),
            Joined(String),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::List(groups) => Self::new(groups),
            Repr::Joined(joined) => Self::parse(&joined),
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_closed() {
        let cfg = GatekeeperConfig::default();
        assert!(!cfg.local_environment);
        assert!(cfg.allow_list.is_empty());
        assert_eq!(cfg.max_credential_bytes, 8192);
    }

    #[test]
    fn allow_list_from_sequence() {
        let cfg: GatekeeperConfig =
            serde_json::from_value(serde_json::json!({"allow_list": ["admins", "staff"]}))
                .unwrap();
        assert_eq!(cfg.allow_list, AllowList::new(["admins", "staff"]));
    }

    #[test]
    fn allow_list_from_comma_separated_string() {
        let cfg: GatekeeperConfig =
            serde_json::from_value(serde_json::json!({"allow_list": "admins, staff"})).unwrap();
        assert!(cfg.allow_list.contains("admins"));
        assert!(cfg.allow_list.contains("staff"));
        assert_eq!(cfg.allow_list.len(), 2);
    }

    #[test]
    fn parse_drops_blank_entries() {
        let list = AllowList::parse("admins, , staff,");
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["admins", "staff"]);
    }

    #[test]
    fn empty_string_is_empty_list() {
        assert!(AllowList::parse("").is_empty());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res: Result<GatekeeperConfig, _> =
            serde_json::from_value(serde_json::json!({"allow_lst": ["admins"]}));
        assert!(res.is_err());
    }
}
