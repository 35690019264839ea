// src/application/queries/stores/get.rs
use super::StoreQueryService;
use crate::{
    application::{
        dto::StoreDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::store::{Store, StoreId, StoreSlug},
};

pub struct GetStoreBySlugQuery {
    pub slug: String,
    pub include_reviews: bool,
}

pub struct GetStoreByIdQuery {
    pub id: i64,
    pub include_reviews: bool,
}

impl StoreQueryService {
    pub async fn get_store_by_slug(&self, query: GetStoreBySlugQuery) -> ApplicationResult<StoreDto> {
        // A malformed slug cannot name a stored store.
        let slug = StoreSlug::new(query.slug)
            .map_err(|_| ApplicationError::not_found("store not found"))?;
        let store = self.read_repo.find_by_slug(&slug).await?;
        self.single(store, query.include_reviews).await
    }

    pub async fn get_store_by_id(&self, query: GetStoreByIdQuery) -> ApplicationResult<StoreDto> {
        let id = StoreId::new(query.id)?;
        let store = self.read_repo.find_by_id(id).await?;
        self.single(store, query.include_reviews).await
    }

    async fn single(&self, store: Option<Store>, include_reviews: bool) -> ApplicationResult<StoreDto> {
        let store = store.ok_or_else(|| ApplicationError::not_found("store not found"))?;
        self.to_dtos(vec![store], include_reviews)
            .await?
            .pop()
            .ok_or_else(|| ApplicationError::infrastructure("store conversion produced no result"))
    }
}
