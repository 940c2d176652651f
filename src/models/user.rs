use serde::{Deserialize, Serialize};

use crate::policy::Role;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(deserialize_with = "super::string_or_number")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl UserProfile {
    pub fn role(&self) -> Role {
        Role::parse(&self.role)
    }

    /// Name shown to other meeting participants.
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.name, self.role)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}
