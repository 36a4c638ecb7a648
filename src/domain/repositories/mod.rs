//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the persistence collaborator behind narrow
//! interfaces following the Repository pattern. Concrete implementations
//! live in `crate::infrastructure::persistence`; mockall generates test
//! doubles under `cfg(test)`.
//!
//! - [`AccountRepository`] - Account credential store
//! - [`LinkRepository`] - Short link CRUD
//! - [`VisitRepository`] - Append-only visit records
//! - [`SessionRepository`] - Single-active-session token records

pub mod account_repository;
pub mod link_repository;
pub mod session_repository;
pub mod visit_repository;

pub use account_repository::AccountRepository;
pub use link_repository::LinkRepository;
pub use session_repository::SessionRepository;
pub use visit_repository::VisitRepository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use visit_repository::MockVisitRepository;
