//! CLI module - administrative commands for managing accounts.

mod commands;

use clap::{Parser, Subcommand};

/// Accounts - manage email-keyed user accounts
#[derive(Parser)]
#[command(name = "accounts")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a regular account
    #[command(alias = "createuser")]
    CreateUser {
        /// Email address (login identifier)
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// Password; omit to create the account without a usable password
        #[arg(long)]
        password: Option<String>,
        /// Create the account as inactive
        #[arg(long)]
        inactive: bool,
        /// Grant admin-panel login
        #[arg(long)]
        admin: bool,
    },

    /// Create an account with admin and superuser rights
    #[command(alias = "createsuperuser")]
    CreateSuperuser {
        /// Email address (login identifier)
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// Password; omit to create the account without a usable password
        #[arg(long)]
        password: Option<String>,
    },

    /// List all accounts
    #[command(alias = "ls")]
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a single account
    Show {
        email: String,
    },

    /// Delete an account
    #[command(alias = "rm")]
    Delete {
        email: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Verify a password the way a login would
    CheckPassword {
        email: String,
        password: String,
    },

    /// Change an account's password
    SetPassword {
        email: String,
        /// New password; omit to disable password login
        #[arg(long)]
        password: Option<String>,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
