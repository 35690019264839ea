// src/application/queries/stores/service.rs
use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    application::{dto::StoreDto, error::ApplicationResult},
    domain::{
        review::{Review, ReviewRepository},
        store::{HeartRepository, Store, StoreId, StoreReadRepository},
    },
};

pub const DEFAULT_NEAR_MAX_DISTANCE_METERS: f64 = 10_000.0;

pub struct StoreQueryService {
    pub(super) read_repo: Arc<dyn StoreReadRepository>,
    pub(super) review_repo: Arc<dyn ReviewRepository>,
    pub(super) heart_repo: Arc<dyn HeartRepository>,
    pub(super) near_max_distance_meters: f64,
}

impl StoreQueryService {
    pub fn new(
        read_repo: Arc<dyn StoreReadRepository>,
        review_repo: Arc<dyn ReviewRepository>,
        heart_repo: Arc<dyn HeartRepository>,
    ) -> Self {
        Self {
            read_repo,
            review_repo,
            heart_repo,
            near_max_distance_meters: DEFAULT_NEAR_MAX_DISTANCE_METERS,
        }
    }

    pub fn with_near_max_distance(mut self, meters: f64) -> Self {
        self.near_max_distance_meters = meters;
        self
    }

    /// Convert stores to DTOs, joining reviews only when asked to.
    pub(super) async fn to_dtos(
        &self,
        stores: Vec<Store>,
        include_reviews: bool,
    ) -> ApplicationResult<Vec<StoreDto>> {
        if !include_reviews || stores.is_empty() {
            return Ok(stores.into_iter().map(Into::into).collect());
        }

        let ids: Vec<StoreId> = stores.iter().map(|store| store.id).collect();
        let mut by_store: HashMap<StoreId, Vec<Review>> = HashMap::new();
        for review in self.review_repo.list_for_stores(&ids).await? {
            by_store.entry(review.store_id).or_default().push(review);
        }

        Ok(stores
            .into_iter()
            .map(|store| {
                let reviews = by_store.remove(&store.id).unwrap_or_default();
                StoreDto::from(store).with_reviews(reviews)
            })
            .collect())
    }
}
