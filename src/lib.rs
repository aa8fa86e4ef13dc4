pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod services;

use clap::Parser;
pub use config::Config;
use cli::{Cli, Commands};
use models::AccountFields;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Entry point for the CLI once `config` has been loaded.
pub async fn run(config: Config) -> anyhow::Result<()> {
    config.validate()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &config.source {
        Some(path) => info!("Loaded config from: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::CreateUser {
            email,
            first_name,
            last_name,
            password,
            inactive,
            admin,
        } => {
            let fields = AccountFields::new(first_name, last_name)
                .active(!inactive)
                .admin(admin);
            cli::cmd_create_user(&config, &email, fields, password.as_deref()).await
        }

        Commands::CreateSuperuser {
            email,
            first_name,
            last_name,
            password,
        } => {
            let fields = AccountFields::new(first_name, last_name);
            cli::cmd_create_superuser(&config, &email, fields, password.as_deref()).await
        }

        Commands::List { json } => cli::cmd_list_accounts(&config, json).await,

        Commands::Show { email } => cli::cmd_show_account(&config, &email).await,

        Commands::Delete { email, yes } => cli::cmd_delete_account(&config, &email, yes).await,

        Commands::CheckPassword { email, password } => {
            cli::cmd_check_password(&config, &email, &password).await
        }

        Commands::SetPassword { email, password } => {
            cli::cmd_set_password(&config, &email, password.as_deref()).await
        }

        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                info!("config.toml already exists, leaving it untouched");
                println!("config.toml already exists.");
            }
            Ok(())
        }
    }
}
