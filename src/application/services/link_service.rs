//! Link creation, lookup, deletion and redirect service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::application::services::code_allocator::{
    CodeAllocator, MAX_ALLOCATION_ATTEMPTS, allocation_exhausted,
};
use crate::domain::entities::{Link, LinkTotals, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::url_validator::validate_url;

/// Service for creating, resolving and removing short links.
///
/// The only path that mutates `clicks` is [`LinkService::visit`], which goes
/// straight to the repository's atomic click-record operation.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    allocator: CodeAllocator<L>,
    base_url: String,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    ///
    /// `base_url` is the public origin short URLs are built from,
    /// e.g. `https://sho.rt`.
    pub fn new(link_repository: Arc<L>, base_url: impl Into<String>) -> Self {
        Self {
            allocator: CodeAllocator::new(link_repository.clone()),
            link_repository,
            base_url: base_url.into(),
        }
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `url` - Destination; stored exactly as given
    /// - `custom_code` - Optional custom short code
    ///
    /// # Code Selection
    ///
    /// - Custom code: validated for format only, then inserted. A taken code
    ///   surfaces as [`AppError::CodeTaken`].
    /// - No custom code: random codes are drawn, probed and inserted. A draw
    ///   that collides at the probe or loses an insert race counts as one
    ///   attempt; at most [`MAX_ALLOCATION_ATTEMPTS`] codes are drawn in total.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] - URL is not an absolute http/https URL (nothing is inserted)
    /// - [`AppError::InvalidCodeFormat`] - custom code fails `^[A-Za-z0-9]{6,8}$`
    /// - [`AppError::CodeTaken`] - custom code already exists
    /// - [`AppError::AllocationExhausted`] - no free random code could be found
    /// - [`AppError::StoreUnavailable`] - database failure
    pub async fn create_link(
        &self,
        url: String,
        custom_code: Option<String>,
    ) -> Result<Link, AppError> {
        validate_url(&url)?;

        match custom_code {
            Some(custom) => {
                let code = self.allocator.allocate(Some(custom)).await?;
                let link = self.link_repository.create(NewLink { code, url }).await?;

                info!(code = %link.code, url = %link.url, "Created link with custom code");
                Ok(link)
            }
            None => self.create_with_generated_code(url).await,
        }
    }

    async fn create_with_generated_code(&self, url: String) -> Result<Link, AppError> {
        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            let Some(code) = self.allocator.draw().await? else {
                continue;
            };

            match self
                .link_repository
                .create(NewLink {
                    code,
                    url: url.clone(),
                })
                .await
            {
                Ok(link) => {
                    info!(code = %link.code, url = %link.url, "Created link");
                    return Ok(link);
                }
                Err(AppError::CodeTaken { details, .. }) => {
                    warn!(attempt, %details, "Generated code taken by a concurrent insert");
                }
                Err(e) => return Err(e),
            }
        }

        Err(allocation_exhausted())
    }

    /// Retrieves a link by its short code without recording a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| link_not_found(code))
    }

    /// Lists all links, newest first.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.list_all().await
    }

    /// Deletes a link, freeing its code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code, including on a
    /// repeated delete.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        if !self.link_repository.delete_by_code(code).await? {
            return Err(link_not_found(code));
        }

        info!(code = %code, "Deleted link");
        Ok(())
    }

    /// Records a visit and returns the destination URL to redirect to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code at the moment
    /// the click is recorded.
    pub async fn visit(&self, code: &str) -> Result<String, AppError> {
        let link = self
            .link_repository
            .record_click(code)
            .await?
            .ok_or_else(|| link_not_found(code))?;

        debug!(code = %link.code, clicks = link.clicks, "Recorded click");
        Ok(link.url)
    }

    /// Counts links and sums their clicks.
    pub async fn totals(&self) -> Result<LinkTotals, AppError> {
        self.link_repository.totals().await
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}

fn link_not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}
