//! Where the bearer token for authenticated calls comes from.
//!
//! The workflows only ever read a token; persisting the session after login
//! is the caller's choice of `SessionStore`.

pub mod file;
pub mod store;

pub use file::FileSessionStore;
pub use store::{InMemorySessionStore, SessionStore, StaticToken, TokenStore};
