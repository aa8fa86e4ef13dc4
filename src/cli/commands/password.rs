//! Password command handlers

use crate::config::Config;
use crate::services::{AccountError, AccountFactory};

use super::{account_factory, check_password_policy};

pub async fn cmd_check_password(
    config: &Config,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    let factory = account_factory(config).await?;

    match factory.authenticate(email, password).await {
        Ok(account) => {
            println!("✓ Credentials valid for {account}");
            if account.can_access_admin() {
                println!("  Admin panel access: yes");
            }
            Ok(())
        }
        Err(AccountError::InvalidCredentials) => {
            println!("✗ Invalid credentials");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn cmd_set_password(
    config: &Config,
    email: &str,
    password: Option<&str>,
) -> anyhow::Result<()> {
    if let Err(msg) = check_password_policy(config, password) {
        println!("{msg}");
        return Ok(());
    }

    let factory = account_factory(config).await?;

    match factory.set_password(email, password).await {
        Ok(account) if password.is_some() => {
            println!("✓ Password updated for {account}");
            Ok(())
        }
        Ok(account) => {
            println!("✓ Password login disabled for {account}");
            Ok(())
        }
        Err(AccountError::NotFound(email)) => {
            println!("No account with email {email}.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
