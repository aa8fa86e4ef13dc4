mod create;
mod delete;
mod list;
mod password;
mod show;

pub use create::{cmd_create_superuser, cmd_create_user};
pub use delete::cmd_delete_account;
pub use list::cmd_list_accounts;
pub use password::{cmd_check_password, cmd_set_password};
pub use show::cmd_show_account;

use crate::config::Config;
use crate::db::Store;
use crate::domain::password::Argon2Hasher;
use crate::services::StoreAccountFactory;

async fn account_factory(config: &Config) -> anyhow::Result<StoreAccountFactory<Store>> {
    let store = Store::from_config(config).await?;
    let hasher = Argon2Hasher::new(&config.security)?;
    Ok(StoreAccountFactory::new(store, hasher))
}

/// Rejects passwords shorter than the configured minimum.
fn check_password_policy(config: &Config, password: Option<&str>) -> Result<(), String> {
    let min = config.security.min_password_length;
    match password {
        Some(p) if min > 0 && p.chars().count() < min => {
            Err(format!("Password must be at least {min} characters"))
        }
        _ => Ok(()),
    }
}
