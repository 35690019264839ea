// src/application/commands/stores/service.rs
use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        review::ReviewRepository,
        store::{
            HeartRepository, Store, StoreId, StoreReadRepository, StoreWriteRepository,
            services::StoreSlugService,
        },
    },
};

pub struct StoreCommandService {
    pub(super) write_repo: Arc<dyn StoreWriteRepository>,
    pub(super) read_repo: Arc<dyn StoreReadRepository>,
    pub(super) review_repo: Arc<dyn ReviewRepository>,
    pub(super) heart_repo: Arc<dyn HeartRepository>,
    pub(super) slug_service: Arc<StoreSlugService>,
    pub(super) clock: Arc<dyn Clock>,
}

impl StoreCommandService {
    pub fn new(
        write_repo: Arc<dyn StoreWriteRepository>,
        read_repo: Arc<dyn StoreReadRepository>,
        review_repo: Arc<dyn ReviewRepository>,
        heart_repo: Arc<dyn HeartRepository>,
        slug_service: Arc<StoreSlugService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            review_repo,
            heart_repo,
            slug_service,
            clock,
        }
    }

    pub(super) async fn load_store(&self, id: StoreId) -> ApplicationResult<Store> {
        self.read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("store not found"))
    }
}
