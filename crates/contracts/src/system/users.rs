use serde::{Deserialize, Serialize};

/// Dashboard user as returned by `GET /api/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub last_login_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

pub const USER_ROLES: [&str; 3] = ["admin", "manager", "agent"];

/// Body of `POST /api/users/create`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserDto {
    pub name: String,
    pub email: String,
    pub password: String,
    pub department: String,
    pub role: String,
}

/// Body of `PUT /api/users/update/:id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserDto {
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: String,
    pub is_active: bool,
}
