use serde::{Deserialize, Serialize};

use crate::profile::UserProfile;

/// One configured account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
    /// Falls back to the username when absent.
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    fn profile(&self) -> UserProfile {
        let display_name = self
            .display_name
            .clone()
            .unwrap_or_else(|| self.username.clone());
        UserProfile::new(self.username.clone(), display_name)
    }
}

/// Fixed table of accounts allowed to sign in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialTable {
    entries: Vec<Credential>,
}

impl CredentialTable {
    pub fn new(entries: Vec<Credential>) -> Self {
        Self { entries }
    }

    /// Built-in demo account (`admin` / `admin`).
    pub fn demo() -> Self {
        Self::new(vec![
            Credential::new("admin", "admin").with_display_name("Administrator"),
        ])
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Profile of the matching account. The username is trimmed; the password
    /// must match exactly.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<UserProfile> {
        let username = username.trim();
        let profile = self
            .entries
            .iter()
            .find(|c| c.username == username && c.password == password)
            .map(Credential::profile);

        match &profile {
            Some(p) => tracing::info!(username = %p.username, "sign-in accepted"),
            None => tracing::warn!(username = %username, "sign-in rejected"),
        }
        profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CredentialTable {
        CredentialTable::new(vec![
            Credential::new("manager", "s3cret").with_display_name("Store Manager"),
            Credential::new("clerk", "counter"),
        ])
    }

    #[test]
    fn matching_credentials_return_profile() {
        let profile = table().authenticate(" manager ", "s3cret").unwrap();
        assert_eq!(profile, UserProfile::new("manager", "Store Manager"));
        assert_eq!(profile.to_string(), "Store Manager (manager)");
    }

    #[test]
    fn display_name_defaults_to_username() {
        let profile = table().authenticate("clerk", "counter").unwrap();
        assert_eq!(profile.display_name, "clerk");
    }

    #[test]
    fn wrong_password_or_unknown_user_is_rejected() {
        assert_eq!(table().authenticate("manager", "S3CRET"), None);
        assert_eq!(table().authenticate("manager", " s3cret"), None);
        assert_eq!(table().authenticate("ghost", "s3cret"), None);
        assert_eq!(CredentialTable::default().authenticate("admin", "admin"), None);
    }

    #[test]
    fn demo_table_accepts_admin() {
        assert!(CredentialTable::demo().authenticate("admin", "admin").is_some());
    }

    #[test]
    fn deserializes_from_plain_list() {
        let raw = r#"[{"username":"a","password":"b"},{"username":"c","password":"d","display_name":"C"}]"#;
        let table: CredentialTable = serde_json::from_str(raw).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.authenticate("c", "d").unwrap().display_name, "C");
    }
}
