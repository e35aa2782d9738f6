//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::LinkService;
use crate::infrastructure::persistence::PgLinkRepository;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<PgLinkRepository>>,
}

impl AppState {
    /// Wires the repository and service on top of an already-open pool.
    ///
    /// `base_url` is the public origin used to build short URLs.
    pub fn new(pool: Arc<PgPool>, base_url: &str) -> Self {
        let link_repository = Arc::new(PgLinkRepository::new(pool));
        let link_service = Arc::new(LinkService::new(link_repository, base_url));

        Self { link_service }
    }
}
