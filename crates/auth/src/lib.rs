//! `stockroom-auth`: sign-in against a fixed credential table.
//!
//! This is a gate for a single local user, not a security boundary: the table
//! is supplied by configuration and compared in plaintext.

pub mod credentials;
pub mod profile;

pub use credentials::{Credential, CredentialTable};
pub use profile::UserProfile;
