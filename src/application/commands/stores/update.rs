// src/application/commands/stores/update.rs
use super::{LocationInput, StoreCommandService};
use crate::{
    application::{
        dto::{Actor, StoreDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        errors::DomainResult,
        store::{
            StoreChanges, StoreId, StoreName, StoreTags,
            specifications::{CanEditStoreSpec, StoreSpecification},
            value_objects::trimmed_text,
        },
    },
};

/// Fields left as `None` are not touched. A blank description or photo
/// clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateStoreCommand {
    pub id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub location: Option<LocationInput>,
    pub photo: Option<String>,
}

impl UpdateStoreCommand {
    fn into_changes(self) -> DomainResult<StoreChanges> {
        Ok(StoreChanges {
            name: self.name.map(StoreName::new).transpose()?,
            description: self.description.map(|d| trimmed_text(Some(d))),
            tags: self.tags.map(StoreTags::new),
            location: self
                .location
                .map(LocationInput::into_location)
                .transpose()?,
            photo: self.photo.map(|p| trimmed_text(Some(p))),
        })
    }
}

impl StoreCommandService {
    pub async fn update_store(
        &self,
        actor: &Actor,
        command: UpdateStoreCommand,
    ) -> ApplicationResult<StoreDto> {
        let id = StoreId::new(command.id)?;
        let store = self.load_store(id).await?;

        if !CanEditStoreSpec::new(&store, actor.id).is_satisfied() {
            return Err(ApplicationError::forbidden(
                "you must own a store in order to edit it",
            ));
        }

        let changes = command.into_changes()?;
        let update = self
            .slug_service
            .prepare_for_update(&store, changes, self.clock.now())
            .await?;
        let renamed = update.slug.is_some();
        let updated = self.write_repo.update(update).await?;

        tracing::info!(store_id = %updated.id, slug = %updated.slug, renamed, "store updated");
        Ok(updated.into())
    }
}
