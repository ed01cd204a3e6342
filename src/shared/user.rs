//! User wire types
//!
//! Projections of a user record that are safe to send to clients. None of
//! these carry the password hash.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::preference::Preference;

/// A user's first and last name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FullName {
    pub first: String,
    pub last: String,
}

/// Search result entry for `GET /user/bulk`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    pub username: String,
    pub name: FullName,
    pub email: String,
    #[serde(rename = "_id")]
    pub id: Uuid,
}

/// Profile returned by `GET /user/details`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserDetails {
    pub username: String,
    pub name: FullName,
    pub email: String,
    pub preferences: Vec<Preference>,
}

/// Returned by signup and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,
    pub message: String,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<UserSummary>,
    pub message: String,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDetailsResponse {
    pub user: UserDetails,
    pub message: String,
    pub success: bool,
}
