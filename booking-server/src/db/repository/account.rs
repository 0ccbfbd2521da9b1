//! Client Account Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Account;
use crate::utils::time::now_micros;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "account";

#[derive(Clone)]
pub struct AccountRepository {
    base: BaseRepository,
}

impl AccountRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find account by exact email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>> {
        let rows: Vec<Account> = self
            .base
            .db()
            .query("SELECT * FROM account WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Find the most recent account registered under a phone number
    pub async fn find_by_phone(&self, phone: &str) -> RepoResult<Option<Account>> {
        let rows: Vec<Account> = self
            .base
            .db()
            .query(
                "SELECT * FROM account WHERE phone = $phone ORDER BY created_at DESC LIMIT 1",
            )
            .bind(("phone", phone.to_string()))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Create a client account
    pub async fn create(
        &self,
        last_name: String,
        first_name: String,
        email: Option<String>,
        phone: String,
        password_hash: String,
    ) -> RepoResult<Account> {
        let account = Account {
            id: None,
            last_name,
            first_name,
            email,
            phone,
            password_hash,
            created_at: now_micros(),
        };

        let created: Option<Account> = self.base.db().create(TABLE).content(account).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create account".to_string()))
    }
}
