//! Authentication and authorization
//!
//! JWT-based auth with a small in-memory user directory. Roles are
//! opaque capability sets to the transaction core: handlers gate on
//! permissions, the core never looks at users.

pub mod jwt;
pub mod middleware;
pub mod permissions;
pub mod users;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
pub use users::UserDirectory;
