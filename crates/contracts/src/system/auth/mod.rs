use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: SessionUser,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Session metadata kept next to the token in client storage under `auth`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthMeta {
    pub issued_at: DateTime<Utc>,
    pub ttl_seconds: i64,
}

impl AuthMeta {
    pub fn new(issued_at: DateTime<Utc>, ttl_seconds: i64) -> Self {
        Self {
            issued_at,
            ttl_seconds,
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.issued_at + Duration::seconds(self.ttl_seconds)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_expiry_boundary() {
        let issued = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let meta = AuthMeta::new(issued, 3600);
        assert!(!meta.is_expired(issued + Duration::seconds(3599)));
        assert!(meta.is_expired(issued + Duration::seconds(3600)));
    }

    #[test]
    fn test_login_response_defaults_token_type() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{"access_token":"abc","expires_in":60,"user":{"id":1,"name":"Ann","email":"a@x.io"}}"#,
        )
        .unwrap();
        assert_eq!(resp.token_type, "Bearer");
        assert_eq!(resp.user.role, None);
    }
}
