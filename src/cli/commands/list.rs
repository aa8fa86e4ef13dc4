//! List accounts command handler

use crate::config::Config;
use crate::services::AccountStore;

use super::account_factory;

pub async fn cmd_list_accounts(config: &Config, json: bool) -> anyhow::Result<()> {
    let factory = account_factory(config).await?;
    let accounts = factory.store().list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&accounts)?);
        return Ok(());
    }

    if accounts.is_empty() {
        println!("No accounts yet.");
        println!();
        println!("Create one with:");
        println!("  accounts create-superuser <email> --first-name <first> --last-name <last>");
        return Ok(());
    }

    println!("Accounts ({} total)", accounts.len());
    println!("{:-<70}", "");

    for account in accounts {
        let role = if account.is_superuser {
            "superuser"
        } else if account.is_admin {
            "admin"
        } else {
            "user"
        };
        let status = if account.is_active { "active" } else { "inactive" };

        println!("{} [{}]", account.email, role);
        println!(
            "  ID: {} | Name: {} | Status: {}",
            account.id,
            account.full_name(),
            status
        );
    }

    Ok(())
}
