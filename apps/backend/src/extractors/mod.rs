pub mod owner_scope;
pub mod session_user;
pub mod validated_json;

pub use owner_scope::OwnerScope;
pub use session_user::SessionUser;
pub use validated_json::{JsonBodyLimit, ValidatedJson};
