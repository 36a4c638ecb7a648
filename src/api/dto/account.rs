//! DTOs for account management endpoints.

use serde::Deserialize;

use crate::domain::entities::Role;

/// Request to change an account's role.
#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: Role,
}
