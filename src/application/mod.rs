//! Application layer: services and token management.

pub mod services;
pub mod token_manager;
