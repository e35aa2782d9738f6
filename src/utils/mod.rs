//! Pure helpers used by the code allocator and the link store.
//!
//! - [`code_generator`] - Short code generation and format validation
//! - [`url_validator`] - Destination URL validation
//! - [`db_error`] - Classification of database errors

pub mod code_generator;
pub mod db_error;
pub mod url_validator;
