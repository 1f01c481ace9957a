//! Authentication
//!
//! Bearer-token validation against the identity provider's signing secret:
//! - [`JwtService`] - token validation
//! - [`CurrentUser`] - authenticated requester (explicit, never ambient)
//! - [`require_admin`] - role gate for back-office handlers

pub mod extractor;
pub mod jwt;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};

use crate::utils::AppError;

/// Reject non-admin requesters
pub fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if user.role.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Role {} is not allowed to access this resource",
            user.role
        )))
    }
}
