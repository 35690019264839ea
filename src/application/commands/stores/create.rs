// src/application/commands/stores/create.rs
use super::StoreCommandService;
use crate::{
    application::{
        dto::{Actor, StoreDto},
        error::ApplicationResult,
    },
    domain::{
        errors::DomainResult,
        store::{
            GeoPoint, Location, StoreDraft, StoreName, StoreTags, value_objects::trimmed_text,
        },
        user::UserId,
    },
};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct LocationInput {
    pub kind: Option<String>,
    /// `[longitude, latitude]`
    pub coordinates: Vec<f64>,
    pub address: String,
}

impl LocationInput {
    pub(super) fn into_location(self) -> DomainResult<Location> {
        let point = GeoPoint::from_coordinates(&self.coordinates)?;
        Location::new(self.kind, point, self.address)
    }
}

#[derive(Debug, Clone)]
pub struct CreateStoreCommand {
    pub name: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub location: LocationInput,
    pub photo: Option<String>,
}

impl CreateStoreCommand {
    pub fn builder() -> CreateStoreCommandBuilder {
        CreateStoreCommandBuilder::default()
    }

    fn into_draft(self, author_id: UserId, now: DateTime<Utc>) -> DomainResult<StoreDraft> {
        Ok(StoreDraft {
            name: StoreName::new(self.name)?,
            description: trimmed_text(self.description),
            tags: StoreTags::new(self.tags),
            location: self.location.into_location()?,
            photo: trimmed_text(self.photo),
            author_id,
            created_at: now,
        })
    }
}

#[derive(Default)]
pub struct CreateStoreCommandBuilder {
    name: Option<String>,
    description: Option<String>,
    tags: Vec<String>,
    coordinates: Option<Vec<f64>>,
    address: Option<String>,
    photo: Option<String>,
}

impl CreateStoreCommandBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn coordinates(mut self, lng: f64, lat: f64) -> Self {
        self.coordinates = Some(vec![lng, lat]);
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    pub fn build(self) -> Result<CreateStoreCommand, &'static str> {
        Ok(CreateStoreCommand {
            name: self.name.ok_or("name is required")?,
            description: self.description,
            tags: self.tags,
            location: LocationInput {
                kind: None,
                coordinates: self.coordinates.ok_or("coordinates are required")?,
                address: self.address.ok_or("address is required")?,
            },
            photo: self.photo,
        })
    }
}

impl StoreCommandService {
    pub async fn create_store(
        &self,
        actor: &Actor,
        command: CreateStoreCommand,
    ) -> ApplicationResult<StoreDto> {
        let draft = command.into_draft(actor.id, self.clock.now())?;
        let new_store = self.slug_service.prepare_for_insert(draft).await?;
        let created = self.write_repo.insert(new_store).await?;

        tracing::info!(store_id = %created.id, slug = %created.slug, author = %actor.id, "store created");
        Ok(created.into())
    }
}
