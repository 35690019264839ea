// tests/support/mocks/repos.rs
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use store_locator::domain::errors::DomainResult;
use store_locator::domain::review::{NewReview, Review, ReviewRepository};
use store_locator::domain::store::{
    GeoPoint, NearbyStore, Store, StoreId, StoreReadRepository, StoreSlug, TagCount, TopStore,
};

/// Counts how often reviews are read.
pub struct CountingReviewRepo {
    inner: Arc<dyn ReviewRepository>,
    reads: AtomicUsize,
}

impl CountingReviewRepo {
    pub fn new(inner: Arc<dyn ReviewRepository>) -> Self {
        Self {
            inner,
            reads: AtomicUsize::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReviewRepository for CountingReviewRepo {
    async fn insert(&self, review: NewReview) -> DomainResult<Review> {
        self.inner.insert(review).await
    }

    async fn list_for_stores(&self, store_ids: &[StoreId]) -> DomainResult<Vec<Review>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.list_for_stores(store_ids).await
    }
}

/// Never reports existing slugs, so the slug check behaves as if every
/// request raced with the others.
pub struct BlindSlugReadRepo {
    inner: Arc<dyn StoreReadRepository>,
}

impl BlindSlugReadRepo {
    pub fn new(inner: Arc<dyn StoreReadRepository>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl StoreReadRepository for BlindSlugReadRepo {
    async fn find_by_id(&self, id: StoreId) -> DomainResult<Option<Store>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_slug(&self, slug: &StoreSlug) -> DomainResult<Option<Store>> {
        self.inner.find_by_slug(slug).await
    }

    async fn slugs_with_prefix(
        &self,
        _prefix: &str,
        _exclude: Option<StoreId>,
    ) -> DomainResult<Vec<StoreSlug>> {
        Ok(Vec::new())
    }

    async fn list_page(
        &self,
        tag: Option<&str>,
        page: u32,
        per_page: u32,
    ) -> DomainResult<(Vec<Store>, u64)> {
        self.inner.list_page(tag, page, per_page).await
    }

    async fn tag_counts(&self) -> DomainResult<Vec<TagCount>> {
        self.inner.tag_counts().await
    }

    async fn top_rated(&self, limit: usize) -> DomainResult<Vec<TopStore>> {
        self.inner.top_rated(limit).await
    }

    async fn search(&self, query: &str, limit: u32) -> DomainResult<Vec<Store>> {
        self.inner.search(query, limit).await
    }

    async fn near(
        &self,
        point: GeoPoint,
        max_distance_meters: f64,
        limit: u32,
    ) -> DomainResult<Vec<NearbyStore>> {
        self.inner.near(point, max_distance_meters, limit).await
    }
}
