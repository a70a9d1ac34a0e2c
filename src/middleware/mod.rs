pub mod auth;

pub use auth::{identity_from_headers, require_auth, AuthUser};
