//! Business logic services orchestrating repositories and the token manager.
//!
//! - [`AuthService`] - Credentials, session lifecycle, request authentication
//! - [`LinkService`] - Link CRUD, redirect resolution, visit statistics
//! - [`AccountService`] - Account administration

pub mod account_service;
pub mod auth_service;
pub mod link_service;

pub use account_service::AccountService;
pub use auth_service::{AuthIdentity, AuthService, AuthTokens};
pub use link_service::{LinkService, RequestMeta};
