//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{AccountService, AuthService, LinkService};

/// Shared handles to the application services.
///
/// Cheap to clone; every field is an [`Arc`].
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub link_service: Arc<LinkService>,
    pub account_service: Arc<AccountService>,
}

impl AppState {
    /// Creates application state from constructed services.
    pub fn new(
        auth_service: Arc<AuthService>,
        link_service: Arc<LinkService>,
        account_service: Arc<AccountService>,
    ) -> Self {
        Self {
            auth_service,
            link_service,
            account_service,
        }
    }
}
