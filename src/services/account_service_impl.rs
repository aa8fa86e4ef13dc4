//! Store-backed implementation of the `AccountFactory` trait.

use anyhow::Context;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::task;
use tracing::{debug, info, warn};

use crate::domain::email::{MAX_EMAIL_LENGTH, is_blank, normalize_email};
use crate::domain::password::{Argon2Hasher, unusable_password, verify_password};
use crate::models::account::{Account, AccountFields, MAX_NAME_LENGTH, NewAccount};
use crate::services::account_service::{AccountError, AccountFactory, AccountStore};

pub struct StoreAccountFactory<S> {
    store: S,
    hasher: Arc<Argon2Hasher>,
}

impl<S: AccountStore> StoreAccountFactory<S> {
    #[must_use]
    pub fn new(store: S, hasher: Argon2Hasher) -> Self {
        Self {
            store,
            hasher: Arc::new(hasher),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Argon2 is CPU-intensive, so hashing runs on the blocking pool.
    async fn derive_hash(&self, password: Option<&str>) -> Result<String, AccountError> {
        let Some(password) = password else {
            return Ok(unusable_password());
        };

        let password = password.to_string();
        let hasher = Arc::clone(&self.hasher);

        let hash = task::spawn_blocking(move || hasher.hash(&password))
            .await
            .context("Password hashing task panicked")??;

        Ok(hash)
    }
}

fn validate_email(email: &str) -> Result<String, AccountError> {
    if is_blank(email) {
        return Err(AccountError::Validation("email required".to_string()));
    }

    let email = normalize_email(email);
    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(AccountError::Validation(format!(
            "email must be at most {MAX_EMAIL_LENGTH} characters"
        )));
    }

    Ok(email)
}

fn validate_fields(fields: &AccountFields) -> Result<(), AccountError> {
    for (name, value) in [
        ("first_name", &fields.first_name),
        ("last_name", &fields.last_name),
    ] {
        if value.chars().count() > MAX_NAME_LENGTH {
            return Err(AccountError::Validation(format!(
                "{name} must be at most {MAX_NAME_LENGTH} characters"
            )));
        }
    }

    Ok(())
}

#[async_trait]
impl<S: AccountStore> AccountFactory for StoreAccountFactory<S> {
    async fn create_account(
        &self,
        email: &str,
        password: Option<&str>,
        fields: AccountFields,
    ) -> Result<Account, AccountError> {
        let email = validate_email(email)?;
        validate_fields(&fields)?;

        let password_hash = self.derive_hash(password).await?;
        let account = self
            .store
            .insert(NewAccount::from_fields(email, password_hash, fields))
            .await?;

        info!("Created account {} (id {})", account.email, account.id);
        Ok(account)
    }

    async fn create_superuser(
        &self,
        email: &str,
        password: Option<&str>,
        fields: AccountFields,
    ) -> Result<Account, AccountError> {
        let mut account = self.create_account(email, password, fields).await?;

        account.is_admin = true;
        account.is_superuser = true;
        let account = self.store.update(&account).await?;

        info!("Granted superuser to {}", account.email);
        Ok(account)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Account, AccountError> {
        let email = normalize_email(email);

        let Some(mut account) = self.store.get_by_email(&email).await? else {
            debug!("Login attempt for unknown account {email}");
            return Err(AccountError::InvalidCredentials);
        };

        if !account.is_active {
            warn!("Login attempt for inactive account {email}");
            return Err(AccountError::InvalidCredentials);
        }

        let stored = account.password_hash.clone();
        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || verify_password(&password, &stored))
            .await
            .context("Password verification task panicked")?;

        if !is_valid {
            warn!("Failed login for {email}");
            return Err(AccountError::InvalidCredentials);
        }

        account.last_login = Some(chrono::Utc::now().to_rfc3339());
        self.store.update(&account).await
    }

    async fn set_password(
        &self,
        email: &str,
        password: Option<&str>,
    ) -> Result<Account, AccountError> {
        let email = normalize_email(email);

        let mut account = self
            .store
            .get_by_email(&email)
            .await?
            .ok_or_else(|| AccountError::NotFound(email.clone()))?;

        account.password_hash = self.derive_hash(password).await?;
        let account = self.store.update(&account).await?;

        info!("Password updated for {}", account.email);
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecurityConfig;
    use crate::models::account::Authenticatable;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        accounts: Mutex<Vec<Account>>,
    }

    #[async_trait]
    impl AccountStore for MemoryStore {
        async fn insert(&self, new: NewAccount) -> Result<Account, AccountError> {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.iter().any(|a| a.email == new.email) {
                return Err(AccountError::Uniqueness(new.email));
            }

            let account = Account {
                id: i32::try_from(accounts.len()).unwrap() + 1,
                email: new.email,
                first_name: new.first_name,
                last_name: new.last_name,
                password_hash: new.password_hash,
                is_active: new.is_active,
                is_admin: new.is_admin,
                is_superuser: new.is_superuser,
                last_login: None,
                created_at: "now".to_string(),
                updated_at: "now".to_string(),
            };
            accounts.push(account.clone());
            Ok(account)
        }

        async fn update(&self, account: &Account) -> Result<Account, AccountError> {
            let mut accounts = self.accounts.lock().unwrap();
            let slot = accounts
                .iter_mut()
                .find(|a| a.id == account.id)
                .ok_or_else(|| AccountError::NotFound(account.email.clone()))?;
            *slot = account.clone();
            Ok(account.clone())
        }

        async fn get_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts.iter().find(|a| a.email == email).cloned())
        }

        async fn list(&self) -> Result<Vec<Account>, AccountError> {
            Ok(self.accounts.lock().unwrap().clone())
        }

        async fn delete(&self, email: &str) -> Result<bool, AccountError> {
            let mut accounts = self.accounts.lock().unwrap();
            let before = accounts.len();
            accounts.retain(|a| a.email != email);
            Ok(accounts.len() != before)
        }
    }

    fn factory() -> StoreAccountFactory<MemoryStore> {
        let hasher = Argon2Hasher::new(&SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            ..SecurityConfig::default()
        })
        .unwrap();
        StoreAccountFactory::new(MemoryStore::default(), hasher)
    }

    fn names() -> AccountFields {
        AccountFields::new("Ada", "Lovelace")
    }

    #[tokio::test]
    async fn create_account_lowercases_email() {
        let factory = factory();
        let account = factory
            .create_account("Foo@Example.COM", Some("secret"), names())
            .await
            .unwrap();

        assert_eq!(account.email, "foo@example.com");
        assert_eq!(account.first_name, "Ada");
        assert_eq!(account.last_name, "Lovelace");
    }

    #[tokio::test]
    async fn create_account_rejects_empty_email() {
        let factory = factory();

        let err = factory
            .create_account("", Some("x"), names())
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Validation(ref msg) if msg == "email required"));

        let err = factory
            .create_superuser("   ", Some("x"), names())
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Validation(_)));

        assert!(factory.store().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_account_defaults_flags() {
        let factory = factory();
        let account = factory
            .create_account("a@b.com", Some("pw"), names())
            .await
            .unwrap();

        assert!(account.is_active);
        assert!(!account.is_admin);
        assert!(!account.is_superuser);
    }

    #[tokio::test]
    async fn create_superuser_sets_both_flags() {
        let factory = factory();
        let account = factory
            .create_superuser("root@b.com", Some("pw"), names().superuser(false))
            .await
            .unwrap();

        assert!(account.is_active);
        assert!(account.is_admin);
        assert!(account.is_superuser);

        let stored = factory
            .store()
            .get_by_email("root@b.com")
            .await
            .unwrap()
            .unwrap();
        assert!(stored.is_admin && stored.is_superuser);
    }

    #[tokio::test]
    async fn duplicate_email_differing_in_case_is_rejected() {
        let factory = factory();
        factory
            .create_account("dup@b.com", Some("pw"), names())
            .await
            .unwrap();

        let err = factory
            .create_account("DUP@B.COM", Some("pw"), names())
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Uniqueness(ref email) if email == "dup@b.com"));
    }

    #[tokio::test]
    async fn account_without_password_cannot_authenticate() {
        let factory = factory();
        let account = factory
            .create_account("a@b.com", None, names())
            .await
            .unwrap();

        assert!(!account.has_usable_password());
        assert!(!account.check_password(""));

        let err = factory.authenticate("a@b.com", "").await.unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
    }

    #[tokio::test]
    async fn password_is_hashed() {
        let factory = factory();
        let account = factory
            .create_account("a@b.com", Some("hunter22"), names())
            .await
            .unwrap();

        assert_ne!(account.password_hash, "hunter22");
        assert!(account.check_password("hunter22"));
        assert!(!account.check_password("hunter23"));
    }

    #[tokio::test]
    async fn authenticate_records_last_login() {
        let factory = factory();
        factory
            .create_account("a@b.com", Some("pw"), names())
            .await
            .unwrap();

        let account = factory.authenticate(" A@B.com", "pw").await.unwrap();
        assert!(account.last_login.is_some());

        let err = factory.authenticate("a@b.com", "nope").await.unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));

        let err = factory.authenticate("x@b.com", "pw").await.unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
    }

    #[tokio::test]
    async fn inactive_account_cannot_authenticate() {
        let factory = factory();
        factory
            .create_account("a@b.com", Some("pw"), names().active(false))
            .await
            .unwrap();

        let err = factory.authenticate("a@b.com", "pw").await.unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
    }

    #[tokio::test]
    async fn oversized_fields_are_rejected() {
        let factory = factory();

        let long_email = format!("{}@b.com", "a".repeat(MAX_EMAIL_LENGTH));
        let err = factory
            .create_account(&long_email, None, names())
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Validation(_)));

        let fields = AccountFields::new("a".repeat(MAX_NAME_LENGTH + 1), "Lovelace");
        let err = factory
            .create_account("a@b.com", None, fields)
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Validation(_)));
    }

    #[tokio::test]
    async fn set_password_rehashes_or_disables() {
        let factory = factory();
        factory
            .create_account("a@b.com", Some("old"), names())
            .await
            .unwrap();

        let account = factory.set_password("a@b.com", Some("new")).await.unwrap();
        assert!(account.check_password("new"));
        assert!(!account.check_password("old"));

        let account = factory.set_password("a@b.com", None).await.unwrap();
        assert!(!account.has_usable_password());

        let err = factory.set_password("x@b.com", None).await.unwrap_err();
        assert!(matches!(err, AccountError::NotFound(_)));
    }
}
