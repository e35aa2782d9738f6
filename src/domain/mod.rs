//! Domain layer containing the link entity and the store contract.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation layers.
//! Repository traits define contracts implemented by the infrastructure layer;
//! orchestration lives in [`crate::application::services`].
//!
//! # Link Lifecycle
//!
//! ```text
//! {nonexistent} --create--> {active} --record_click (any number of times)--> {active}
//!                                    --delete--> {nonexistent}
//! ```

pub mod entities;
pub mod repositories;
