pub mod claims;
pub mod cookie;
pub mod jwt;
pub mod ownership;

pub use claims::IdentityClaim;
pub use jwt::{mint_session_token, verify_session_token, SessionClaims};
pub use ownership::ensure_owner;
