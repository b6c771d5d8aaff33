//! User Repository

use super::{BaseRepository, RepoResult};
use crate::db::models::{User, UserCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const USER_FIELDS: &str = "record::id(id) AS id, email, name, role, department";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find user by uid (document key)
    pub async fn find_by_id(&self, uid: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {USER_FIELDS} FROM type::thing('user', $id)"))
            .bind(("id", uid.to_string()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Find the first user with this email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {USER_FIELDS} FROM user WHERE email = $email LIMIT 1"
            ))
            .bind(("email", email.to_string()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create or replace the user stored under `uid`
    pub async fn upsert(&self, uid: &str, data: UserCreate) -> RepoResult<()> {
        self.base
            .db()
            .query("UPSERT type::thing('user', $id) CONTENT $data RETURN NONE")
            .bind(("id", uid.to_string()))
            .bind(("data", data))
            .await?
            .check()?;
        Ok(())
    }
}
