pub mod account_service;
pub use account_service::{AccountError, AccountFactory, AccountStore};

pub mod account_service_impl;
pub use account_service_impl::StoreAccountFactory;
