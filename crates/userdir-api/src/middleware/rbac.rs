//! Role gates applied inside handlers.

use userdir_core::error::AppError;

use crate::extractors::AuthUser;

/// Rejects the request unless the caller holds the admin role.
pub fn require_admin(auth: &AuthUser) -> Result<(), AppError> {
    if auth.is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden("Admin role required"))
    }
}
