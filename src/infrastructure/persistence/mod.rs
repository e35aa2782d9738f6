//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with bound
//! parameters.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage, lookup, deletion and click recording

pub mod pg_link_repository;

pub use pg_link_repository::PgLinkRepository;
