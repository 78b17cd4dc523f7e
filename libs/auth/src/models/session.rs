//! Session model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::User;

/// Authenticated session as persisted by the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    pub user: User,
}

/// Login response payload, after envelope unwrapping
///
/// The API sends either `{ accessToken, user, message }` or the user object
/// itself with the token inside it.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "LoginPayload")]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LoginPayload {
    #[serde(rename_all = "camelCase")]
    WithUser {
        access_token: String,
        user: User,
        #[serde(default)]
        message: Option<String>,
    },
    UserWithToken(UserWithToken),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserWithToken {
    access_token: String,
    #[serde(alias = "_id")]
    id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LoginPayload> for LoginResponse {
    fn from(payload: LoginPayload) -> Self {
        match payload {
            LoginPayload::WithUser {
                access_token,
                user,
                message,
            } => Self {
                access_token,
                user,
                message,
            },
            LoginPayload::UserWithToken(data) => Self {
                access_token: data.access_token,
                user: User {
                    id: data.id,
                    email: data.email,
                    name: data.name,
                    created_at: data.created_at,
                    updated_at: data.updated_at,
                },
                message: None,
            },
        }
    }
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Self {
            access_token: response.access_token,
            user: response.user,
        }
    }
}
