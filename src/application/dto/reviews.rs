use crate::domain::review::Review;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewDto {
    pub id: i64,
    pub store_id: i64,
    pub author_id: i64,
    pub text: String,
    pub rating: u8,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewDto {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.into(),
            store_id: review.store_id.into(),
            author_id: review.author_id.into(),
            text: review.text.into_inner(),
            rating: review.rating.value(),
            created_at: review.created_at,
        }
    }
}
