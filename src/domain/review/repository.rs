// src/domain/review/repository.rs
use crate::domain::errors::DomainResult;
use crate::domain::review::entity::{NewReview, Review};
use crate::domain::store::StoreId;
use async_trait::async_trait;

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn insert(&self, review: NewReview) -> DomainResult<Review>;
    /// Reviews whose `store` back-reference is one of `store_ids`, newest first.
    async fn list_for_stores(&self, store_ids: &[StoreId]) -> DomainResult<Vec<Review>>;
}
