//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkTotals, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the link table.
///
/// This is the only writer of link rows. Implementations must enforce code
/// uniqueness at insert time and make [`LinkRepository::record_click`] a single
/// atomic step.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link with `clicks = 0`, no `last_clicked`, and `created_at = now`.
    ///
    /// Uniqueness is detected by the insert itself, never by a prior read.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeTaken`] if a link with the same code exists.
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Point lookup by code. Read-only.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Returns true if a link currently uses `code`.
    ///
    /// Used by the allocator as an optimistic probe; the insert remains authoritative.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn exists(&self, code: &str) -> Result<bool, AppError>;

    /// Lists every link, newest first. Not paginated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn list_all(&self) -> Result<Vec<Link>, AppError>;

    /// Removes the link row, freeing its code for reuse.
    ///
    /// Returns `Ok(true)` if a row was deleted, `Ok(false)` if no link had this code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError>;

    /// Atomically increments `clicks` by one, sets `last_clicked` to now, and
    /// returns the updated link.
    ///
    /// Returns `Ok(None)` without side effects if no link has this code,
    /// including when a concurrent delete committed first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn record_click(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Number of links and the sum of their click counters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn totals(&self) -> Result<LinkTotals, AppError>;
}
