//! Infrastructure layer: database-backed repository implementations.

pub mod persistence;
