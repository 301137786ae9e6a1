// Admin capability checks for write endpoints
//
// Reading discounts is public; saving them requires a bearer token whose
// claims carry the admin role.

pub mod error;
pub mod middleware;
pub mod token;

pub use error::AuthError;
pub use middleware::AdminUser;
pub use token::{Claims, Role, TokenService};
