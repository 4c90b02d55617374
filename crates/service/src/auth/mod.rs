//! Auth module: raw auth-service calls (`api`), token decoding (`token`) and
//! the login/registration workflows (`service`).

pub mod api;
pub mod service;
pub mod token;

pub use service::AuthClient;
