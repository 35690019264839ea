// src/domain/store/repository.rs
use crate::domain::errors::DomainResult;
use crate::domain::store::entity::{NearbyStore, NewStore, Store, StoreUpdate};
use crate::domain::store::ranking::{TagCount, TopStore};
use crate::domain::store::value_objects::{GeoPoint, StoreId, StoreSlug};
use crate::domain::user::UserId;
use async_trait::async_trait;

#[async_trait]
pub trait StoreWriteRepository: Send + Sync {
    async fn insert(&self, store: NewStore) -> DomainResult<Store>;
    async fn update(&self, update: StoreUpdate) -> DomainResult<Store>;
}

#[async_trait]
pub trait StoreReadRepository: Send + Sync {
    async fn find_by_id(&self, id: StoreId) -> DomainResult<Option<Store>>;
    async fn find_by_slug(&self, slug: &StoreSlug) -> DomainResult<Option<Store>>;

    /// Slugs starting with `prefix`, compared case-insensitively.
    async fn slugs_with_prefix(
        &self,
        prefix: &str,
        exclude: Option<StoreId>,
    ) -> DomainResult<Vec<StoreSlug>>;

    /// Newest first. Returns the page and the total number of matching stores.
    async fn list_page(
        &self,
        tag: Option<&str>,
        page: u32,
        per_page: u32,
    ) -> DomainResult<(Vec<Store>, u64)>;

    async fn tag_counts(&self) -> DomainResult<Vec<TagCount>>;
    async fn top_rated(&self, limit: usize) -> DomainResult<Vec<TopStore>>;
    async fn search(&self, query: &str, limit: u32) -> DomainResult<Vec<Store>>;
    async fn near(
        &self,
        point: GeoPoint,
        max_distance_meters: f64,
        limit: u32,
    ) -> DomainResult<Vec<NearbyStore>>;
}

#[async_trait]
pub trait HeartRepository: Send + Sync {
    /// Flip the heart for `(user, store)`; returns whether it is now set.
    async fn toggle(&self, user: UserId, store: StoreId) -> DomainResult<bool>;
    async fn list_for_user(&self, user: UserId) -> DomainResult<Vec<StoreId>>;
}
