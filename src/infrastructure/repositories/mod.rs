// src/infrastructure/repositories/mod.rs
mod error;
mod memory;
mod postgres_heart;
mod postgres_review;
mod postgres_store;

pub use error::map_sqlx;
pub use memory::InMemoryStore;
pub use postgres_heart::PostgresHeartRepository;
pub use postgres_review::PostgresReviewRepository;
pub use postgres_store::{PostgresStoreReadRepository, PostgresStoreWriteRepository};

use crate::application::services::Repositories;
use sqlx::PgPool;
use std::sync::Arc;

pub fn postgres_repositories(pool: &PgPool) -> Repositories {
    Repositories {
        store_write: Arc::new(PostgresStoreWriteRepository::new(pool.clone())),
        store_read: Arc::new(PostgresStoreReadRepository::new(pool.clone())),
        reviews: Arc::new(PostgresReviewRepository::new(pool.clone())),
        hearts: Arc::new(PostgresHeartRepository::new(pool.clone())),
    }
}
