use serde::{Deserialize, Serialize};

/// The signed-in user, as shown by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub display_name: String,
}

impl UserProfile {
    pub fn new(username: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            display_name: display_name.into(),
        }
    }
}

impl core::fmt::Display for UserProfile {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.display_name, self.username)
    }
}
