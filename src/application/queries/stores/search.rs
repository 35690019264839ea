// src/application/queries/stores/search.rs
use super::StoreQueryService;
use crate::{
    application::{
        dto::{NearbyStoreDto, StoreDto},
        error::ApplicationResult,
    },
    domain::store::GeoPoint,
};

const SEARCH_LIMIT: u32 = 5;
const NEAR_LIMIT: u32 = 10;

pub struct SearchStoresQuery {
    pub q: String,
}

pub struct StoresNearQuery {
    pub lng: f64,
    pub lat: f64,
}

impl StoreQueryService {
    pub async fn search_stores(&self, query: SearchStoresQuery) -> ApplicationResult<Vec<StoreDto>> {
        let trimmed = query.q.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        let stores = self.read_repo.search(trimmed, SEARCH_LIMIT).await?;
        Ok(stores.into_iter().map(Into::into).collect())
    }

    pub async fn stores_near(&self, query: StoresNearQuery) -> ApplicationResult<Vec<NearbyStoreDto>> {
        let point = GeoPoint::new(query.lng, query.lat)?;
        let nearby = self
            .read_repo
            .near(point, self.near_max_distance_meters, NEAR_LIMIT)
            .await?;
        Ok(nearby.into_iter().map(Into::into).collect())
    }
}
