pub mod entity;
pub mod ranking;
pub mod repository;
pub mod services;
pub mod specifications;
pub mod value_objects;

pub use entity::{NearbyStore, NewStore, Store, StoreChanges, StoreDraft, StoreUpdate};
pub use ranking::{TagCount, TopStore};
pub use repository::{HeartRepository, StoreReadRepository, StoreWriteRepository};
pub use value_objects::{GeoPoint, Location, StoreId, StoreName, StoreSlug, StoreTags};
