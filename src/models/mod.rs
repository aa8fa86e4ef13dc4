pub mod account;

pub use account::{Account, AccountFields, Authenticatable, NewAccount};
