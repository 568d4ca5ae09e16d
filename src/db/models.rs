use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const ACTIVE: i32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: String,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub mobile_number: String,
    // Never serialized into any response body.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub gender: String,
    pub is_active: i32,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub mobile_number: String,
    pub gender: String,
}

impl User {
    pub fn new(fields: NewUser, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            user_id: Uuid::new_v4().to_string(),
            user_name: fields.user_name,
            first_name: fields.first_name,
            last_name: fields.last_name,
            email_address: fields.email_address,
            mobile_number: fields.mobile_number,
            password_hash,
            gender: fields.gender,
            is_active: ACTIVE,
            created_on: now,
            updated_on: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.is_active == ACTIVE
    }
}

/// Partial update of profile fields; `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub user_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub mobile_number: Option<String>,
    pub gender: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_fields() -> NewUser {
        NewUser {
            user_name: "alice".into(),
            first_name: "Alice".into(),
            last_name: "Smith".into(),
            email_address: "alice@example.com".into(),
            mobile_number: "5550100".into(),
            gender: "female".into(),
        }
    }

    #[test]
    fn test_new_user_is_active_with_fresh_id() {
        let user = User::new(new_fields(), "$2b$04$hash".into());
        assert!(user.is_active());
        assert!(Uuid::parse_str(&user.user_id).is_ok());
        assert_eq!(user.created_on, user.updated_on);
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User::new(new_fields(), "$2b$04$hash".into());
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["user_name"], "alice");
    }
}
