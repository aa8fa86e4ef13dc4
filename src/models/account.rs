use serde::Serialize;
use std::fmt;

use crate::domain::password::{is_usable_password, verify_password};
use crate::entities::accounts;

/// Field used as the login identifier.
pub const USERNAME_FIELD: &str = "email";

/// Fields, besides the login identifier, that registration must collect.
pub const REQUIRED_FIELDS: [&str; 2] = ["first_name", "last_name"];

/// Maximum stored length of `first_name` and `last_name`.
pub const MAX_NAME_LENGTH: usize = 200;

/// Password checks every account supports.
pub trait Authenticatable {
    /// Returns true when `password` matches the stored hash.
    fn check_password(&self, password: &str) -> bool;

    /// Returns false for accounts created or reset without a password.
    fn has_usable_password(&self) -> bool;
}

/// A persisted user account, keyed by its lowercase email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub is_superuser: bool,
    pub last_login: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Account {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Admin-panel login is open to active admins and superusers.
    #[must_use]
    pub const fn can_access_admin(&self) -> bool {
        self.is_active && (self.is_admin || self.is_superuser)
    }

    /// Active superusers implicitly hold every permission.
    #[must_use]
    pub const fn has_all_permissions(&self) -> bool {
        self.is_active && self.is_superuser
    }
}

impl Authenticatable for Account {
    fn check_password(&self, password: &str) -> bool {
        verify_password(password, &self.password_hash)
    }

    fn has_usable_password(&self) -> bool {
        is_usable_password(&self.password_hash)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.email)
    }
}

impl From<accounts::Model> for Account {
    fn from(model: accounts::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            password_hash: model.password_hash,
            is_active: model.is_active,
            is_admin: model.is_admin,
            is_superuser: model.is_superuser,
            last_login: model.last_login,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Registration fields supplied alongside the email and password.
///
/// The flag overrides are applied on top of the defaults
/// (`is_active = true`, `is_admin = false`, `is_superuser = false`).
#[derive(Debug, Clone, Default)]
pub struct AccountFields {
    pub first_name: String,
    pub last_name: String,
    pub is_active: Option<bool>,
    pub is_admin: Option<bool>,
    pub is_superuser: Option<bool>,
}

impl AccountFields {
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    #[must_use]
    pub fn admin(mut self, is_admin: bool) -> Self {
        self.is_admin = Some(is_admin);
        self
    }

    #[must_use]
    pub fn superuser(mut self, is_superuser: bool) -> Self {
        self.is_superuser = Some(is_superuser);
        self
    }

    /// Names of required fields left empty.
    #[must_use]
    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_FIELDS
            .into_iter()
            .filter(|field| match *field {
                "first_name" => self.first_name.trim().is_empty(),
                "last_name" => self.last_name.trim().is_empty(),
                _ => false,
            })
            .collect()
    }
}

/// A validated account ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub is_superuser: bool,
}

impl NewAccount {
    #[must_use]
    pub fn from_fields(email: String, password_hash: String, fields: AccountFields) -> Self {
        Self {
            email,
            first_name: fields.first_name,
            last_name: fields.last_name,
            password_hash,
            is_active: fields.is_active.unwrap_or(true),
            is_admin: fields.is_admin.unwrap_or(false),
            is_superuser: fields.is_superuser.unwrap_or(false),
        }
    }
}
