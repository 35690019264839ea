// src/application/commands/stores/review.rs
use super::StoreCommandService;
use crate::{
    application::{
        dto::{Actor, ReviewDto},
        error::ApplicationResult,
    },
    domain::{
        review::{NewReview, Rating, ReviewText},
        store::StoreId,
    },
};

pub struct AddReviewCommand {
    pub store_id: i64,
    pub text: String,
    pub rating: i64,
}

impl StoreCommandService {
    pub async fn add_review(
        &self,
        actor: &Actor,
        command: AddReviewCommand,
    ) -> ApplicationResult<ReviewDto> {
        let store_id = StoreId::new(command.store_id)?;
        let text = ReviewText::new(command.text)?;
        let rating = Rating::new(command.rating)?;
        self.load_store(store_id).await?;

        let review = self
            .review_repo
            .insert(NewReview {
                store_id,
                author_id: actor.id,
                text,
                rating,
                created_at: self.clock.now(),
            })
            .await?;

        tracing::info!(store_id = %store_id, rating = rating.value(), "review added");
        Ok(review.into())
    }
}
