use crate::config::Config;
use crate::domain::email::normalize_email;
use crate::services::AccountStore;

use super::account_factory;

pub async fn cmd_delete_account(config: &Config, email: &str, yes: bool) -> anyhow::Result<()> {
    let factory = account_factory(config).await?;
    let email = normalize_email(email);

    let Some(account) = factory.store().get_by_email(&email).await? else {
        println!("No account with email {email}.");
        return Ok(());
    };

    if !yes {
        println!("Delete account '{}' (ID: {})?", account.email, account.id);
        println!("Enter 'y' to confirm, anything else to cancel:");

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if factory.store().delete(&account.email).await? {
        println!("✓ Deleted: {}", account.email);
    } else {
        println!("Failed to delete account.");
    }

    Ok(())
}
