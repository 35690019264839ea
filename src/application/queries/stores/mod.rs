// src/application/queries/stores/mod.rs
mod get;
mod hearts;
mod list;
mod rankings;
mod search;
mod service;

pub use get::{GetStoreByIdQuery, GetStoreBySlugQuery};
pub use list::ListStoresQuery;
pub use search::{SearchStoresQuery, StoresNearQuery};
pub use service::{DEFAULT_NEAR_MAX_DISTANCE_METERS, StoreQueryService};
