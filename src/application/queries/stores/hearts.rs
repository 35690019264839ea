// src/application/queries/stores/hearts.rs
use super::StoreQueryService;
use crate::application::{dto::Actor, error::ApplicationResult};

impl StoreQueryService {
    pub async fn hearted_stores(&self, actor: &Actor) -> ApplicationResult<Vec<i64>> {
        let hearts = self.heart_repo.list_for_user(actor.id).await?;
        Ok(hearts.into_iter().map(Into::into).collect())
    }
}
