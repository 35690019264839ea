// src/application/queries/stores/rankings.rs
use super::StoreQueryService;
use crate::{
    application::{
        dto::{TagCountDto, TopStoreDto},
        error::ApplicationResult,
    },
    domain::store::ranking::TOP_STORES_LIMIT,
};

impl StoreQueryService {
    /// Every tag with the number of stores carrying it, most used first.
    pub async fn get_tags_list(&self) -> ApplicationResult<Vec<TagCountDto>> {
        let counts = self.read_repo.tag_counts().await?;
        Ok(counts.into_iter().map(Into::into).collect())
    }

    /// Stores with at least two reviews, best average first, at most ten.
    pub async fn get_top_stores(&self) -> ApplicationResult<Vec<TopStoreDto>> {
        let top = self.read_repo.top_rated(TOP_STORES_LIMIT).await?;
        Ok(top.into_iter().map(Into::into).collect())
    }
}
