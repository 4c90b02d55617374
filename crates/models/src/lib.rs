//! Wire and domain records exchanged with the auth, user and device services.

pub mod errors;
pub mod auth;
pub mod user;
pub mod delete;

pub use auth::{Credentials, LoginReply, RegisterReply, RegisterRequest, RoleClaims, Session};
pub use delete::{DeleteByIds, DeleteByUsernames};
pub use user::{MicroAuth, MicroUser, UserModel};
