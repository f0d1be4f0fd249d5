// SPDX-License-Identifier: MIT

//! User model for storage and API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A registered member.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub role: UserRole,
    pub created_at: NaiveDateTime,
}

/// Role carried in the session token; the booking core only requires
/// `member`, higher roles exist for admin tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Member,
    Host,
    Admin,
    Superadmin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Member => "member",
            UserRole::Host => "host",
            UserRole::Admin => "admin",
            UserRole::Superadmin => "superadmin",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(UserRole::Member),
            "host" => Ok(UserRole::Host),
            "admin" => Ok(UserRole::Admin),
            "superadmin" => Ok(UserRole::Superadmin),
            _ => Err(()),
        }
    }
}
