//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without I/O. Creation inputs use
//! separate `New*` structs so storage-assigned fields (ids, timestamps)
//! never appear half-initialized.
//!
//! - [`Account`] - A registered user with a role and owned links
//! - [`Link`] - A shortened URL with per-device destinations
//! - [`Visit`] - One redirect resolution event
//! - [`Session`] - The single active token pair for an account

pub mod account;
pub mod link;
pub mod session;
pub mod visit;

pub use account::{Account, NewAccount, Role};
pub use link::{Link, LinkUpdate, NewLink};
pub use session::Session;
pub use visit::{NewVisit, Visit};
