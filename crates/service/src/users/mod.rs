//! User registry: raw calls (`api`), the user/auth join (`join`) and the
//! list/add/update/remove workflows (`service`).

pub mod api;
pub mod join;
pub mod service;

pub use join::join_by_username;
pub use service::UserClient;
