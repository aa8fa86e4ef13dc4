use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::models::account::{Account, NewAccount};
use crate::services::account_service::{AccountError, AccountStore, unique_violation};

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn from_config(config: &crate::config::Config) -> Result<Self> {
        Self::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn account_repo(&self) -> repositories::account::AccountRepository {
        repositories::account::AccountRepository::new(self.conn.clone())
    }

    pub async fn get_account_by_id(&self, id: i32) -> Result<Option<Account>> {
        self.account_repo().get_by_id(id).await
    }

    pub async fn count_accounts(&self) -> Result<u64> {
        self.account_repo().count().await
    }
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<DbErr>()
        .and_then(unique_violation)
        .is_some()
}

#[async_trait]
impl AccountStore for Store {
    async fn insert(&self, account: NewAccount) -> Result<Account, AccountError> {
        self.account_repo().insert(&account).await.map_err(|e| {
            if is_unique_violation(&e) {
                AccountError::Uniqueness(account.email.clone())
            } else {
                e.into()
            }
        })
    }

    async fn update(&self, account: &Account) -> Result<Account, AccountError> {
        match self.account_repo().update(account).await {
            Ok(Some(updated)) => Ok(updated),
            Ok(None) => Err(AccountError::NotFound(account.email.clone())),
            Err(e) if is_unique_violation(&e) => {
                Err(AccountError::Uniqueness(account.email.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        Ok(self.account_repo().get_by_email(email).await?)
    }

    async fn list(&self) -> Result<Vec<Account>, AccountError> {
        Ok(self.account_repo().list().await?)
    }

    async fn delete(&self, email: &str) -> Result<bool, AccountError> {
        let deleted = self.account_repo().delete_by_email(email).await?;
        if deleted {
            info!("Deleted account {email}");
        }
        Ok(deleted)
    }
}
