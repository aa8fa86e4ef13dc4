use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::{accounts, prelude::*};
use crate::models::account::{Account, NewAccount};

pub struct AccountRepository {
    conn: DatabaseConnection,
}

impl AccountRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a new account. A duplicate email surfaces as a unique-constraint `DbErr`.
    pub async fn insert(&self, account: &NewAccount) -> Result<Account> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = accounts::ActiveModel {
            email: Set(account.email.clone()),
            first_name: Set(account.first_name.clone()),
            last_name: Set(account.last_name.clone()),
            password_hash: Set(account.password_hash.clone()),
            is_active: Set(account.is_active),
            is_admin: Set(account.is_admin),
            is_superuser: Set(account.is_superuser),
            last_login: Set(None),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert account")?;

        Ok(Account::from(model))
    }

    /// Get account by (already normalized) email
    pub async fn get_by_email(&self, email: &str) -> Result<Option<Account>> {
        let account = Accounts::find()
            .filter(accounts::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query account by email")?;

        Ok(account.map(Account::from))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Account>> {
        let account = Accounts::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query account by ID")?;

        Ok(account.map(Account::from))
    }

    pub async fn list(&self) -> Result<Vec<Account>> {
        let rows = Accounts::find()
            .order_by_asc(accounts::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list accounts")?;

        Ok(rows.into_iter().map(Account::from).collect())
    }

    pub async fn count(&self) -> Result<u64> {
        Accounts::find()
            .count(&self.conn)
            .await
            .context("Failed to count accounts")
    }

    /// Write every mutable column of `account` back to its row.
    ///
    /// Returns `None` when no row with `account.id` exists.
    pub async fn update(&self, account: &Account) -> Result<Option<Account>> {
        let Some(existing) = Accounts::find_by_id(account.id)
            .one(&self.conn)
            .await
            .context("Failed to query account for update")?
        else {
            return Ok(None);
        };

        let now = chrono::Utc::now().to_rfc3339();

        let mut active: accounts::ActiveModel = existing.into();
        active.email = Set(account.email.clone());
        active.first_name = Set(account.first_name.clone());
        active.last_name = Set(account.last_name.clone());
        active.password_hash = Set(account.password_hash.clone());
        active.is_active = Set(account.is_active);
        active.is_admin = Set(account.is_admin);
        active.is_superuser = Set(account.is_superuser);
        active.last_login = Set(account.last_login.clone());
        active.updated_at = Set(now);

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update account")?;

        Ok(Some(Account::from(model)))
    }

    pub async fn delete_by_email(&self, email: &str) -> Result<bool> {
        let result = Accounts::delete_many()
            .filter(accounts::Column::Email.eq(email))
            .exec(&self.conn)
            .await
            .context("Failed to delete account")?;

        Ok(result.rows_affected > 0)
    }
}
