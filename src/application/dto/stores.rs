use crate::application::dto::ReviewDto;
use crate::domain::review::Review;
use crate::domain::store::{Location, NearbyStore, Store, TagCount, TopStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationDto {
    #[serde(rename = "type")]
    pub kind: String,
    /// `[longitude, latitude]`
    pub coordinates: Vec<f64>,
    pub address: String,
}

impl From<Location> for LocationDto {
    fn from(location: Location) -> Self {
        Self {
            kind: location.kind,
            coordinates: location.point.coordinates().to_vec(),
            address: location.address,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoreDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub location: LocationDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Present only when reviews were requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<ReviewDto>>,
}

impl StoreDto {
    pub fn with_reviews(mut self, reviews: Vec<Review>) -> Self {
        self.reviews = Some(reviews.into_iter().map(Into::into).collect());
        self
    }
}

impl From<Store> for StoreDto {
    fn from(store: Store) -> Self {
        Self {
            id: store.id.into(),
            name: store.name.into_inner(),
            slug: store.slug.into_inner(),
            description: store.description,
            tags: store.tags.into_inner(),
            location: store.location.into(),
            photo: store.photo,
            author_id: store.author_id.into(),
            created_at: store.created_at,
            updated_at: store.updated_at,
            reviews: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TagCountDto {
    pub tag: String,
    pub count: u64,
}

impl From<TagCount> for TagCountDto {
    fn from(value: TagCount) -> Self {
        Self {
            tag: value.tag,
            count: value.count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TopStoreDto {
    #[serde(flatten)]
    pub store: StoreDto,
    pub average_rating: f64,
    pub review_count: usize,
}

impl From<TopStore> for TopStoreDto {
    fn from(top: TopStore) -> Self {
        let review_count = top.review_count();
        Self {
            store: StoreDto::from(top.store).with_reviews(top.reviews),
            average_rating: top.average_rating,
            review_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NearbyStoreDto {
    #[serde(flatten)]
    pub store: StoreDto,
    pub distance_meters: f64,
}

impl From<NearbyStore> for NearbyStoreDto {
    fn from(nearby: NearbyStore) -> Self {
        Self {
            store: nearby.store.into(),
            distance_meters: nearby.distance_meters,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HeartStateDto {
    pub store_id: i64,
    pub hearted: bool,
    /// Every store id the user has hearted after the toggle.
    pub hearts: Vec<i64>,
}
