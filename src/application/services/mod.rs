// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::stores::StoreCommandService,
        ports::{time::Clock, util::SlugGenerator},
        queries::stores::StoreQueryService,
    },
    domain::{
        review::ReviewRepository,
        store::{HeartRepository, StoreReadRepository, StoreWriteRepository, services::StoreSlugService},
    },
};

/// Storage ports the application runs on.
#[derive(Clone)]
pub struct Repositories {
    pub store_write: Arc<dyn StoreWriteRepository>,
    pub store_read: Arc<dyn StoreReadRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub hearts: Arc<dyn HeartRepository>,
}

pub struct ApplicationServices {
    pub store_commands: Arc<StoreCommandService>,
    pub store_queries: Arc<StoreQueryService>,
}

impl ApplicationServices {
    pub fn new(
        repos: Repositories,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
        near_max_distance_meters: f64,
    ) -> Self {
        let slug_service = Arc::new(StoreSlugService::new(
            Arc::clone(&repos.store_read),
            Arc::clone(&slugger),
        ));

        let store_commands = Arc::new(StoreCommandService::new(
            Arc::clone(&repos.store_write),
            Arc::clone(&repos.store_read),
            Arc::clone(&repos.reviews),
            Arc::clone(&repos.hearts),
            Arc::clone(&slug_service),
            Arc::clone(&clock),
        ));

        let store_queries = Arc::new(
            StoreQueryService::new(
                Arc::clone(&repos.store_read),
                Arc::clone(&repos.reviews),
                Arc::clone(&repos.hearts),
            )
            .with_near_max_distance(near_max_distance_meters),
        );

        Self {
            store_commands,
            store_queries,
        }
    }
}
