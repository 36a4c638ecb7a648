//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod accounts;
pub mod auth;
pub mod health;
pub mod links;
pub mod redirect;

pub use accounts::set_role_handler;
pub use auth::{
    password_change_handler, refresh_handler, sign_in_handler, sign_out_handler, sign_up_handler,
};
pub use health::health_handler;
pub use links::{
    create_link_handler, delete_link_handler, get_link_handler, link_statistics_handler,
    list_links_handler, update_link_handler, user_links_handler,
};
pub use redirect::redirect_handler;
