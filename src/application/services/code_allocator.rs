//! Short code allocation.

use std::sync::Arc;

use serde_json::json;
use tracing::warn;

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};

/// Number of random codes tried before giving up.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 5;

/// Produces a code for a new link.
///
/// Custom codes are only checked for format. Whether they are free is decided by
/// the insert, so there is no window between a check and the write.
///
/// Random codes are probed against the store and regenerated on collision. The
/// probe can race with a concurrent creator; the store's unique constraint still
/// rejects the loser with [`AppError::CodeTaken`].
pub struct CodeAllocator<L: LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository> CodeAllocator<L> {
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Returns `custom_code` unchanged if it is well-formed, otherwise a fresh
    /// random code not currently in use.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidCodeFormat`] if `custom_code` fails validation
    /// - [`AppError::AllocationExhausted`] if [`MAX_ALLOCATION_ATTEMPTS`] random codes collided
    /// - [`AppError::StoreUnavailable`] if the existence probe failed
    pub async fn allocate(&self, custom_code: Option<String>) -> Result<String, AppError> {
        match custom_code {
            Some(custom) => {
                validate_custom_code(&custom)?;
                Ok(custom)
            }
            None => self.generate_unused_code().await,
        }
    }

    /// Draws one random code and probes it.
    ///
    /// Returns `None` if the code is already in use. Each call is one attempt
    /// against [`MAX_ALLOCATION_ATTEMPTS`].
    pub async fn draw(&self) -> Result<Option<String>, AppError> {
        let code = generate_code();

        if self.link_repository.exists(&code).await? {
            warn!(code = %code, "Generated code collided with an existing link");
            return Ok(None);
        }

        Ok(Some(code))
    }

    async fn generate_unused_code(&self) -> Result<String, AppError> {
        for _ in 0..MAX_ALLOCATION_ATTEMPTS {
            if let Some(code) = self.draw().await? {
                return Ok(code);
            }
        }

        Err(allocation_exhausted())
    }
}

pub(crate) fn allocation_exhausted() -> AppError {
    AppError::allocation_exhausted(
        "Failed to generate a unique short code, please retry",
        json!({ "attempts": MAX_ALLOCATION_ATTEMPTS }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::utils::code_generator::is_valid_code;

    #[tokio::test]
    async fn test_custom_code_returned_unchanged_without_probe() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_exists().times(0);

        let allocator = CodeAllocator::new(Arc::new(mock_link_repo));

        let code = allocator.allocate(Some("github".to_string())).await.unwrap();
        assert_eq!(code, "github");
    }

    #[tokio::test]
    async fn test_invalid_custom_code() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_exists().times(0);

        let allocator = CodeAllocator::new(Arc::new(mock_link_repo));

        for bad in ["ab", "has-dash", "waytoolong1", ""] {
            let result = allocator.allocate(Some(bad.to_string())).await;
            assert!(
                matches!(result, Err(AppError::InvalidCodeFormat { .. })),
                "{bad}"
            );
        }
    }

    #[tokio::test]
    async fn test_generated_code_first_attempt() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_exists()
            .times(1)
            .returning(|_| Ok(false));

        let allocator = CodeAllocator::new(Arc::new(mock_link_repo));

        let code = allocator.allocate(None).await.unwrap();
        assert_eq!(code.len(), 6);
        assert!(is_valid_code(&code));
    }

    #[tokio::test]
    async fn test_generated_code_retries_on_collision() {
        let mut mock_link_repo = MockLinkRepository::new();
        let mut seq = mockall::Sequence::new();

        mock_link_repo
            .expect_exists()
            .times(3)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));
        mock_link_repo
            .expect_exists()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(false));

        let allocator = CodeAllocator::new(Arc::new(mock_link_repo));

        let code = allocator.allocate(None).await.unwrap();
        assert!(is_valid_code(&code));
    }

    #[tokio::test]
    async fn test_allocation_exhausted_after_five_collisions() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_exists()
            .times(MAX_ALLOCATION_ATTEMPTS)
            .returning(|_| Ok(true));

        let allocator = CodeAllocator::new(Arc::new(mock_link_repo));

        let result = allocator.allocate(None).await;
        assert!(matches!(result, Err(AppError::AllocationExhausted { .. })));
    }

    #[tokio::test]
    async fn test_probe_failure_is_propagated() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_exists()
            .times(1)
            .returning(|_| Err(AppError::store_unavailable("down", json!({}))));

        let allocator = CodeAllocator::new(Arc::new(mock_link_repo));

        let result = allocator.allocate(None).await;
        assert!(matches!(result, Err(AppError::StoreUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_draw_is_single_attempt() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_exists()
            .times(1)
            .returning(|_| Ok(true));

        let allocator = CodeAllocator::new(Arc::new(mock_link_repo));

        assert!(allocator.draw().await.unwrap().is_none());
    }
}
