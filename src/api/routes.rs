//! API route configuration.
//!
//! Session endpoints that establish credentials are public; everything else
//! requires Bearer token authentication via [`crate::api::middleware::auth`].

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, link_statistics_handler,
    list_links_handler, password_change_handler, refresh_handler, set_role_handler,
    sign_in_handler, sign_out_handler, sign_up_handler, update_link_handler, user_links_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes reachable without an access token.
///
/// # Endpoints
///
/// - `POST /auth/signup`  - Register an account, returns a token pair
/// - `POST /auth/signin`  - Open a session with credentials
/// - `POST /auth/refresh` - Rotate a session with a refresh token
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(sign_up_handler))
        .route("/auth/signin", post(sign_in_handler))
        .route("/auth/refresh", post(refresh_handler))
}

/// Routes protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST   /auth/signout`             - Close the caller's session
/// - `POST   /auth/password`            - Change the caller's password
/// - `GET    /links`                    - List the caller's links
/// - `POST   /links`                    - Create a shortened link
/// - `GET    /links/{id}`               - Retrieve a link
/// - `PUT    /links/{id}`               - Replace a link's destinations
/// - `DELETE /links/{id}`               - Delete a link and its visits
/// - `GET    /links/{id}/statistics`    - Visit records over a date range
/// - `GET    /users/{id}/links`         - A user's links (`self` or own id only)
/// - `POST   /users/{id}/role`          - Change an account role (admin only)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signout", post(sign_out_handler))
        .route("/auth/password", post(password_change_handler))
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{id}",
            get(get_link_handler)
                .put(update_link_handler)
                .delete(delete_link_handler),
        )
        .route("/links/{id}/statistics", get(link_statistics_handler))
        .route("/users/{id}/links", get(user_links_handler))
        .route("/users/{id}/role", post(set_role_handler))
}
