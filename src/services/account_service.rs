//! Domain service for account creation and authentication.
//!
//! The factory never talks to the database directly: it is handed an
//! [`AccountStore`] and relies on the store's unique index on `email` to
//! arbitrate concurrent registrations.

use thiserror::Error;

use crate::models::account::{Account, AccountFields, NewAccount};

/// Errors specific to account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Account already exists: {0}")]
    Uniqueness(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Detail message of a unique-constraint violation, if `err` is one.
pub(crate) fn unique_violation(err: &sea_orm::DbErr) -> Option<String> {
    match err.sql_err() {
        Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => Some(detail),
        _ => None,
    }
}

impl From<sea_orm::DbErr> for AccountError {
    fn from(err: sea_orm::DbErr) -> Self {
        unique_violation(&err).map_or_else(|| Self::Database(err.to_string()), Self::Uniqueness)
    }
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<sea_orm::DbErr>() {
            Some(db_err) => unique_violation(db_err)
                .map_or_else(|| Self::Database(db_err.to_string()), Self::Uniqueness),
            None => Self::Internal(format!("{err:#}")),
        }
    }
}

/// Persistence for accounts.
#[async_trait::async_trait]
pub trait AccountStore: Send + Sync {
    /// Persists a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Uniqueness`] if the email is already taken.
    async fn insert(&self, account: NewAccount) -> Result<Account, AccountError>;

    /// Writes back a modified account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] if the account no longer exists.
    async fn update(&self, account: &Account) -> Result<Account, AccountError>;

    async fn get_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    async fn list(&self) -> Result<Vec<Account>, AccountError>;

    /// Deletes the account with `email`, returning whether one existed.
    async fn delete(&self, email: &str) -> Result<bool, AccountError>;
}

/// Creates and authenticates accounts.
#[async_trait::async_trait]
pub trait AccountFactory: Send + Sync {
    /// Validates and normalizes `email`, hashes `password` and persists a
    /// regular account. A `None` password leaves the account without a usable
    /// password.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Validation`] for an empty email or oversized
    /// fields, and propagates [`AccountError::Uniqueness`] from the store.
    async fn create_account(
        &self,
        email: &str,
        password: Option<&str>,
        fields: AccountFields,
    ) -> Result<Account, AccountError>;

    /// Same as [`AccountFactory::create_account`], then grants the admin and
    /// superuser flags.
    async fn create_superuser(
        &self,
        email: &str,
        password: Option<&str>,
        fields: AccountFields,
    ) -> Result<Account, AccountError>;

    /// Checks a login attempt and records `last_login` on success.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidCredentials`] for an unknown email, an
    /// inactive account or a wrong password alike.
    async fn authenticate(&self, email: &str, password: &str) -> Result<Account, AccountError>;

    /// Replaces the password hash. `None` marks the password unusable.
    async fn set_password(
        &self,
        email: &str,
        password: Option<&str>,
    ) -> Result<Account, AccountError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_errors_convert_to_database_variant() {
        let err: AccountError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, AccountError::Database(_)));
    }

    #[test]
    fn anyhow_wrapped_db_errors_stay_database_errors() {
        let err = anyhow::Error::new(sea_orm::DbErr::Custom("boom".to_string()))
            .context("Failed to insert account");
        let err: AccountError = err.into();
        assert!(matches!(err, AccountError::Database(_)));
    }

    #[test]
    fn other_anyhow_errors_are_internal() {
        let err: AccountError = anyhow::anyhow!("hash failed").into();
        assert!(matches!(err, AccountError::Internal(_)));
    }

    #[test]
    fn validation_message_is_readable() {
        let err = AccountError::Validation("email required".to_string());
        assert_eq!(err.to_string(), "Validation failed: email required");
    }
}
