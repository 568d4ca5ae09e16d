//! Shared test fixtures: settings without a database and an in-memory
//! implementation of the user store.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use account_service::config::{AuthConfig, DatabaseConfig, ServerConfig, Settings};
use account_service::db::{NewUser, User, UserStore, UserUpdate};
use account_service::{AppError, AppState};

pub fn test_settings() -> Settings {
    Settings {
        environment: "test".to_string(),
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 2570,
            workers: 2,
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
        },
        auth: AuthConfig {
            access_secret: "test_access_secret".to_string(),
            refresh_secret: "test_refresh_secret".to_string(),
        },
    }
}

pub fn app_state(store: Arc<MemoryUserStore>) -> AppState {
    AppState::with_store(test_settings(), store).expect("failed to build test state")
}

pub fn seeded_user(user_name: &str, password: &str) -> User {
    User::new(
        NewUser {
            user_name: user_name.to_string(),
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            email_address: format!("{}@example.com", user_name),
            mobile_number: "5550100".to_string(),
            gender: "female".to_string(),
        },
        bcrypt::hash(password, 4).unwrap(),
    )
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, user: User) {
        self.users
            .lock()
            .unwrap()
            .insert(user.user_id.clone(), user);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_active_by_username(&self, user_name: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.user_name == user_name && u.is_active())
            .cloned())
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().get(user_id).cloned())
    }

    async fn find_active_by_user_id(&self, user_id: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .get(user_id)
            .filter(|u| u.is_active())
            .cloned())
    }

    async fn username_exists(&self, user_name: &str) -> Result<bool, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|u| u.user_name == user_name))
    }

    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        self.users
            .lock()
            .unwrap()
            .insert(user.user_id.clone(), user.clone());
        Ok(())
    }

    async fn list_active(&self) -> Result<Vec<User>, AppError> {
        let mut users: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|u| u.is_active())
            .cloned()
            .collect();
        users.sort_by_key(|u| u.created_on);
        Ok(users)
    }

    async fn update_user(&self, user_id: &str, changes: &UserUpdate) -> Result<u64, AppError> {
        let mut users = self.users.lock().unwrap();
        match users.get_mut(user_id) {
            Some(user) => {
                if let Some(v) = &changes.user_name {
                    user.user_name = v.clone();
                }
                if let Some(v) = &changes.first_name {
                    user.first_name = v.clone();
                }
                if let Some(v) = &changes.last_name {
                    user.last_name = v.clone();
                }
                if let Some(v) = &changes.email_address {
                    user.email_address = v.clone();
                }
                if let Some(v) = &changes.mobile_number {
                    user.mobile_number = v.clone();
                }
                if let Some(v) = &changes.gender {
                    user.gender = v.clone();
                }
                user.updated_on = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_user(&self, user_id: &str) -> Result<bool, AppError> {
        Ok(self.users.lock().unwrap().remove(user_id).is_some())
    }
}
