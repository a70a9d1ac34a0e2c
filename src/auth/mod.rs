pub mod password;
pub mod roles;
pub mod token;

pub use roles::Role;
