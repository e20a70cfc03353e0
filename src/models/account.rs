use serde::{Deserialize, Serialize};

pub const DEFAULT_PROFILE_ID: &str = "default";

/// Registered user. The password is kept as entered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl User {
    pub fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }

    pub fn session(&self) -> Session {
        Session {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// The signed-in user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub name: String,
    pub email: String,
}

/// A viewing identity under one account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_kids: bool,
}

impl Profile {
    pub fn new(name: String, is_kids: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            is_kids,
        }
    }

    /// Profile shown to a user who has not created any yet
    pub fn default_for(session: &Session) -> Self {
        let name = if session.name.trim().is_empty() {
            "Main".to_string()
        } else {
            session.name.clone()
        };

        Self {
            id: DEFAULT_PROFILE_ID.to_string(),
            name,
            is_kids: false,
        }
    }
}
