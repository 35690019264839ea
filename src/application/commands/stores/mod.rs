// src/application/commands/stores/mod.rs
mod create;
mod heart;
mod review;
mod service;
mod update;

pub use create::{CreateStoreCommand, CreateStoreCommandBuilder, LocationInput};
pub use heart::ToggleHeartCommand;
pub use review::AddReviewCommand;
pub use service::StoreCommandService;
pub use update::UpdateStoreCommand;
