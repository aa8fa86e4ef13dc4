//! Account domain rules that do not depend on storage.
//!
//! - [`email`]: login identifier normalization.
//! - [`password`]: Argon2id hashing and the unusable-password marker.

pub mod email;
pub mod password;
