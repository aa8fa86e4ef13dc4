use crate::config::Config;
use crate::domain::email::normalize_email;
use crate::models::account::Authenticatable;
use crate::services::AccountStore;

use super::account_factory;

pub async fn cmd_show_account(config: &Config, email: &str) -> anyhow::Result<()> {
    let factory = account_factory(config).await?;
    let email = normalize_email(email);

    let Some(account) = factory.store().get_by_email(&email).await? else {
        println!("No account with email {email}.");
        return Ok(());
    };

    println!("{account}");
    println!("{:-<40}", "");
    println!("ID:            {}", account.id);
    println!("Name:          {}", account.full_name());
    println!("Active:        {}", account.is_active);
    println!("Admin:         {}", account.is_admin);
    println!("Superuser:     {}", account.is_superuser);
    println!("Password set:  {}", account.has_usable_password());
    println!(
        "Last login:    {}",
        account.last_login.as_deref().unwrap_or("never")
    );
    println!("Created:       {}", account.created_at);
    println!("Updated:       {}", account.updated_at);

    Ok(())
}
