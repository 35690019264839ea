// src/application/queries/stores/list.rs
use super::StoreQueryService;
use crate::application::{
    dto::{Page, StoreDto},
    error::ApplicationResult,
};

const DEFAULT_PER_PAGE: u32 = 6;
const MAX_PER_PAGE: u32 = 50;

#[derive(Debug, Clone, Default)]
pub struct ListStoresQuery {
    pub include_reviews: bool,
    pub tag: Option<String>,
    pub page: u32,
    pub per_page: u32,
}

pub(super) fn normalize_paging(page: u32, per_page: u32) -> (u32, u32) {
    let page = page.max(1);
    let per_page = if per_page == 0 {
        DEFAULT_PER_PAGE
    } else {
        per_page.min(MAX_PER_PAGE)
    };
    (page, per_page)
}

impl StoreQueryService {
    pub async fn find_stores(&self, query: ListStoresQuery) -> ApplicationResult<Page<StoreDto>> {
        let (page, per_page) = normalize_paging(query.page, query.per_page);
        let tag = query
            .tag
            .as_deref()
            .map(str::trim)
            .filter(|tag| !tag.is_empty());

        let (stores, total) = self.read_repo.list_page(tag, page, per_page).await?;
        let items = self.to_dtos(stores, query.include_reviews).await?;
        Ok(Page::new(items, page, per_page, total))
    }
}
