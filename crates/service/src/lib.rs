//! Client-side service layer over the auth, user and device microservices.
//! - Each operation is a short chain of dependent HTTP calls.
//! - Raw endpoint calls live in `*::api`; workflows in `auth::service` and
//!   `users::service`.
//! - Workflows return fallback values on failure; `try_*` variants expose the error.

pub mod errors;
pub mod endpoints;
pub mod session;
pub mod auth;
pub mod users;
pub mod device;
pub mod portal;

pub use auth::AuthClient;
pub use endpoints::Endpoints;
pub use errors::ServiceError;
pub use portal::Portal;
pub use users::UserClient;
