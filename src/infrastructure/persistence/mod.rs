//! PostgreSQL repository implementations.

pub mod pg_account_repository;
pub mod pg_link_repository;
pub mod pg_session_repository;
pub mod pg_visit_repository;

pub use pg_account_repository::PgAccountRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_session_repository::PgSessionRepository;
pub use pg_visit_repository::PgVisitRepository;
