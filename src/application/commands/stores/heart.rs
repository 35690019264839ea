// src/application/commands/stores/heart.rs
use super::StoreCommandService;
use crate::{
    application::{
        dto::{Actor, HeartStateDto},
        error::ApplicationResult,
    },
    domain::store::StoreId,
};

pub struct ToggleHeartCommand {
    pub store_id: i64,
}

impl StoreCommandService {
    pub async fn toggle_heart(
        &self,
        actor: &Actor,
        command: ToggleHeartCommand,
    ) -> ApplicationResult<HeartStateDto> {
        let store_id = StoreId::new(command.store_id)?;
        self.load_store(store_id).await?;

        let hearted = self.heart_repo.toggle(actor.id, store_id).await?;
        let hearts = self.heart_repo.list_for_user(actor.id).await?;

        tracing::debug!(store_id = %store_id, user = %actor.id, hearted, "heart toggled");
        Ok(HeartStateDto {
            store_id: store_id.into(),
            hearted,
            hearts: hearts.into_iter().map(Into::into).collect(),
        })
    }
}
