use tracing::debug;

use crate::auth::claims::IdentityClaim;
use crate::error::AppError;
use crate::logging::pii::Redacted;

/// Allow access only when the session identity owns the requested records.
///
/// Owner identities are compared as exact strings; no case folding.
pub fn ensure_owner(identity: &IdentityClaim, owner_email: &str) -> Result<(), AppError> {
    if identity.email == owner_email {
        Ok(())
    } else {
        debug!(
            session = %Redacted(&identity.email),
            requested = %Redacted(owner_email),
            "ownership check failed"
        );
        Err(AppError::forbidden())
    }
}
