//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP handlers
//! and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::code_allocator::CodeAllocator`] - Produces a valid, currently unused short code
//! - [`services::link_service::LinkService`] - Create, get, list, delete and visit links

pub mod services;
