use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AuthError;
use crate::password;

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "demo123";
pub const DEMO_NAME: &str = "Demo User";

#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: jiff::Timestamp,
}

/// A user as returned to clients, without the password hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: jiff::Timestamp,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            created_at: user.created_at,
        }
    }
}

/// In-memory user directory.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: RwLock<Vec<User>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A directory holding only the demo account, hashed at `cost`.
    pub async fn with_demo_user(cost: u32) -> Result<Self, AuthError> {
        let directory = Self::new();
        let hash = password::hash_password_with_cost(DEMO_PASSWORD, cost).await?;
        directory.create(DEMO_EMAIL, DEMO_NAME, hash).await?;
        Ok(directory)
    }

    /// Case-insensitive email lookup.
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    pub async fn find_by_id(&self, id: &str) -> Option<User> {
        self.users.read().await.iter().find(|u| u.id == id).cloned()
    }

    pub async fn create(
        &self,
        email: &str,
        name: &str,
        password_hash: String,
    ) -> Result<User, AuthError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(email)) {
            return Err(AuthError::UserExists(email.to_string()));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            name: name.to_string(),
            password_hash,
            created_at: jiff::Timestamp::now(),
        };
        users.push(user.clone());
        tracing::info!(user_id = %user.id, "user created");
        Ok(user)
    }

    /// Look up by email and check the password.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .find_by_email(email)
            .await
            .ok_or(AuthError::InvalidCredentials)?;
        if password::verify_password(password, &user.password_hash).await? {
            Ok(user)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    pub async fn list(&self) -> Vec<PublicUser> {
        self.users.read().await.iter().map(PublicUser::from).collect()
    }
}
