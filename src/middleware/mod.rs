pub mod auth;

pub use auth::{RequireKeyAuth, UserContext};
