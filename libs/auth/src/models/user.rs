//! User model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Name to greet the user with
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ if !self.email.is_empty() => &self.email,
            _ => &self.id,
        }
    }
}

/// User login credentials
///
/// The identifier is sent as `email` when it looks like one (contains both
/// `@` and `.`), otherwise as `userName`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LoginCredentials {
    Email { email: String, password: String },
    #[serde(rename_all = "camelCase")]
    UserName { user_name: String, password: String },
}

impl LoginCredentials {
    /// Build credentials from whatever the user typed as identifier
    pub fn new(identifier: &str, password: &str) -> Self {
        let identifier = identifier.trim().to_string();
        let password = password.to_string();

        if identifier.contains('@') && identifier.contains('.') {
            LoginCredentials::Email {
                email: identifier,
                password,
            }
        } else {
            LoginCredentials::UserName {
                user_name: identifier,
                password,
            }
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            LoginCredentials::Email { email, .. } => email,
            LoginCredentials::UserName { user_name, .. } => user_name,
        }
    }
}

/// Registration form as filled in by the user
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// New user creation payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Registration response payload, after envelope unwrapping
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}
