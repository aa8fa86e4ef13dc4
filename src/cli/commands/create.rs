//! Create account command handlers

use crate::config::Config;
use crate::models::account::AccountFields;
use crate::services::{AccountError, AccountFactory};

use super::{account_factory, check_password_policy};

pub async fn cmd_create_user(
    config: &Config,
    email: &str,
    fields: AccountFields,
    password: Option<&str>,
) -> anyhow::Result<()> {
    create(config, email, fields, password, false).await
}

pub async fn cmd_create_superuser(
    config: &Config,
    email: &str,
    fields: AccountFields,
    password: Option<&str>,
) -> anyhow::Result<()> {
    create(config, email, fields, password, true).await
}

async fn create(
    config: &Config,
    email: &str,
    fields: AccountFields,
    password: Option<&str>,
    superuser: bool,
) -> anyhow::Result<()> {
    let missing = fields.missing_required();
    if !missing.is_empty() {
        println!("Missing required fields: {}", missing.join(", "));
        return Ok(());
    }

    if let Err(msg) = check_password_policy(config, password) {
        println!("{msg}");
        return Ok(());
    }

    let factory = account_factory(config).await?;

    let result = if superuser {
        factory.create_superuser(email, password, fields).await
    } else {
        factory.create_account(email, password, fields).await
    };

    match result {
        Ok(account) => {
            let kind = if account.is_superuser {
                "Superuser"
            } else {
                "Account"
            };
            println!("✓ {kind} created: {} (ID: {})", account.email, account.id);
            if password.is_none() {
                println!("  No password set; use 'accounts set-password' to enable login.");
            }
            Ok(())
        }
        Err(e @ (AccountError::Validation(_) | AccountError::Uniqueness(_))) => {
            println!("{e}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
