// src/domain/store/entity.rs
use crate::domain::store::value_objects::{Location, StoreId, StoreName, StoreSlug, StoreTags};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Store {
    pub id: StoreId,
    pub name: StoreName,
    pub slug: StoreSlug,
    pub description: Option<String>,
    pub tags: StoreTags,
    pub location: Location,
    pub photo: Option<String>,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.author_id == user
    }

    /// True when `name` would change the stored name.
    pub fn name_differs(&self, name: &StoreName) -> bool {
        self.name != *name
    }
}

/// Store found by a proximity query.
#[derive(Debug, Clone)]
pub struct NearbyStore {
    pub store: Store,
    pub distance_meters: f64,
}

/// A validated store that has not been given a slug yet.
#[derive(Debug, Clone)]
pub struct StoreDraft {
    pub name: StoreName,
    pub description: Option<String>,
    pub tags: StoreTags,
    pub location: Location,
    pub photo: Option<String>,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl StoreDraft {
    pub fn with_slug(self, slug: StoreSlug) -> NewStore {
        NewStore {
            name: self.name,
            slug,
            description: self.description,
            tags: self.tags,
            location: self.location,
            photo: self.photo,
            author_id: self.author_id,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewStore {
    pub name: StoreName,
    pub slug: StoreSlug,
    pub description: Option<String>,
    pub tags: StoreTags,
    pub location: Location,
    pub photo: Option<String>,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated field changes requested for an existing store.
#[derive(Debug, Clone, Default)]
pub struct StoreChanges {
    pub name: Option<StoreName>,
    pub description: Option<Option<String>>,
    pub tags: Option<StoreTags>,
    pub location: Option<Location>,
    pub photo: Option<Option<String>>,
}

#[derive(Debug, Clone)]
pub struct StoreUpdate {
    pub id: StoreId,
    pub name: Option<StoreName>,
    pub slug: Option<StoreSlug>,
    pub description: Option<Option<String>>,
    pub tags: Option<StoreTags>,
    pub location: Option<Location>,
    pub photo: Option<Option<String>>,
    pub updated_at: DateTime<Utc>,
}

impl StoreUpdate {
    pub fn new(id: StoreId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: None,
            slug: None,
            description: None,
            tags: None,
            location: None,
            photo: None,
            updated_at,
        }
    }

    pub fn with_name(mut self, name: StoreName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_slug(mut self, slug: StoreSlug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_changes(mut self, changes: StoreChanges) -> Self {
        self.description = changes.description;
        self.tags = changes.tags;
        self.location = changes.location;
        self.photo = changes.photo;
        self
    }

    /// Apply this update to an in-memory copy of the store.
    pub fn apply_to(self, store: &mut Store) {
        if let Some(name) = self.name {
            store.name = name;
        }
        if let Some(slug) = self.slug {
            store.slug = slug;
        }
        if let Some(description) = self.description {
            store.description = description;
        }
        if let Some(tags) = self.tags {
            store.tags = tags;
        }
        if let Some(location) = self.location {
            store.location = location;
        }
        if let Some(photo) = self.photo {
            store.photo = photo;
        }
        store.updated_at = self.updated_at;
    }
}
