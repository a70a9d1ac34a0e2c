pub mod orders;
pub mod products;
pub mod users;

use crate::auth::Role;

/// Roles allowed to manage the catalog and read other users' orders.
/// Access decisions happen at the handler boundary; the identity itself
/// comes from the authorization gate.
pub const STAFF_ROLES: &[Role] = &[Role::Admin, Role::Moderator];
