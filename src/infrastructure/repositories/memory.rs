// src/infrastructure/repositories/memory.rs
//! Process-local storage with the same semantics as the PostgreSQL
//! repositories. Selected with `DATABASE_URL=memory://`.
use crate::application::services::Repositories;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::review::{NewReview, Review, ReviewId, ReviewRepository};
use crate::domain::store::{
    GeoPoint, HeartRepository, NearbyStore, NewStore, Store, StoreId, StoreReadRepository,
    StoreSlug, StoreUpdate, StoreWriteRepository, TagCount, TopStore,
    ranking::{rank_top_stores, tally_tags},
};
use crate::domain::user::UserId;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct MemoryState {
    stores: BTreeMap<StoreId, Store>,
    reviews: Vec<Review>,
    hearts: Vec<(UserId, StoreId)>,
    last_store_id: i64,
    last_review_id: i64,
}

impl MemoryState {
    fn slug_taken(&self, slug: &StoreSlug, except: Option<StoreId>) -> bool {
        self.stores
            .values()
            .any(|store| store.slug == *slug && Some(store.id) != except)
    }

    fn newest_first(&self) -> Vec<&Store> {
        let mut stores: Vec<&Store> = self.stores.values().collect();
        stores.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        stores
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<MemoryState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire one shared backend into every storage port.
    pub fn into_repositories(self) -> Repositories {
        let shared = Arc::new(self);
        Repositories {
            store_write: Arc::clone(&shared) as Arc<dyn StoreWriteRepository>,
            store_read: Arc::clone(&shared) as Arc<dyn StoreReadRepository>,
            reviews: Arc::clone(&shared) as Arc<dyn ReviewRepository>,
            hearts: shared as Arc<dyn HeartRepository>,
        }
    }
}

#[async_trait]
impl StoreWriteRepository for InMemoryStore {
    async fn insert(&self, store: NewStore) -> DomainResult<Store> {
        let mut state = self.state.write().await;
        if state.slug_taken(&store.slug, None) {
            return Err(DomainError::Conflict("slug already exists".into()));
        }

        let id = StoreId::new(state.last_store_id + 1)?;
        state.last_store_id += 1;

        let created = Store {
            id,
            name: store.name,
            slug: store.slug,
            description: store.description,
            tags: store.tags,
            location: store.location,
            photo: store.photo,
            author_id: store.author_id,
            created_at: store.created_at,
            updated_at: store.updated_at,
        };
        state.stores.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, update: StoreUpdate) -> DomainResult<Store> {
        let mut state = self.state.write().await;
        if let Some(slug) = &update.slug
            && state.slug_taken(slug, Some(update.id))
        {
            return Err(DomainError::Conflict("slug already exists".into()));
        }

        let store = state
            .stores
            .get_mut(&update.id)
            .ok_or_else(|| DomainError::NotFound("store not found".into()))?;
        update.apply_to(store);
        Ok(store.clone())
    }
}

#[async_trait]
impl StoreReadRepository for InMemoryStore {
    async fn find_by_id(&self, id: StoreId) -> DomainResult<Option<Store>> {
        Ok(self.state.read().await.stores.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &StoreSlug) -> DomainResult<Option<Store>> {
        let state = self.state.read().await;
        Ok(state.stores.values().find(|store| store.slug == *slug).cloned())
    }

    async fn slugs_with_prefix(
        &self,
        prefix: &str,
        exclude: Option<StoreId>,
    ) -> DomainResult<Vec<StoreSlug>> {
        let prefix = prefix.to_lowercase();
        let state = self.state.read().await;
        Ok(state
            .stores
            .values()
            .filter(|store| Some(store.id) != exclude)
            .filter(|store| store.slug.as_str().to_lowercase().starts_with(&prefix))
            .map(|store| store.slug.clone())
            .collect())
    }

    async fn list_page(
        &self,
        tag: Option<&str>,
        page: u32,
        per_page: u32,
    ) -> DomainResult<(Vec<Store>, u64)> {
        let state = self.state.read().await;
        let matching: Vec<&Store> = state
            .newest_first()
            .into_iter()
            .filter(|store| tag.is_none_or(|tag| store.tags.contains(tag)))
            .collect();

        let total = matching.len() as u64;
        let per_page = per_page.max(1) as usize;
        let skip = (page.max(1) as usize - 1) * per_page;
        let items = matching
            .into_iter()
            .skip(skip)
            .take(per_page)
            .cloned()
            .collect();
        Ok((items, total))
    }

    async fn tag_counts(&self) -> DomainResult<Vec<TagCount>> {
        let state = self.state.read().await;
        Ok(tally_tags(state.stores.values().map(|store| &store.tags)))
    }

    async fn top_rated(&self, limit: usize) -> DomainResult<Vec<TopStore>> {
        let state = self.state.read().await;
        let stores = state.stores.values().cloned().collect();
        Ok(rank_top_stores(stores, state.reviews.clone(), limit))
    }

    async fn search(&self, query: &str, limit: u32) -> DomainResult<Vec<Store>> {
        let needle = query.to_lowercase();
        let state = self.state.read().await;

        // Name hits rank above description-only hits.
        let mut hits: Vec<(u8, &Store)> = state
            .newest_first()
            .into_iter()
            .filter_map(|store| {
                if store.name.as_str().to_lowercase().contains(&needle) {
                    Some((0, store))
                } else if store
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
                {
                    Some((1, store))
                } else {
                    None
                }
            })
            .collect();
        hits.sort_by_key(|(rank, _)| *rank);

        Ok(hits
            .into_iter()
            .take(limit as usize)
            .map(|(_, store)| store.clone())
            .collect())
    }

    async fn near(
        &self,
        point: GeoPoint,
        max_distance_meters: f64,
        limit: u32,
    ) -> DomainResult<Vec<NearbyStore>> {
        let state = self.state.read().await;
        let mut nearby: Vec<NearbyStore> = state
            .stores
            .values()
            .map(|store| NearbyStore {
                distance_meters: point.distance_meters(&store.location.point),
                store: store.clone(),
            })
            .filter(|nearby| nearby.distance_meters <= max_distance_meters)
            .collect();
        nearby.sort_by(|a, b| {
            a.distance_meters
                .total_cmp(&b.distance_meters)
                .then_with(|| a.store.id.cmp(&b.store.id))
        });
        nearby.truncate(limit as usize);
        Ok(nearby)
    }
}

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn insert(&self, review: NewReview) -> DomainResult<Review> {
        let mut state = self.state.write().await;
        if !state.stores.contains_key(&review.store_id) {
            return Err(DomainError::NotFound("store not found".into()));
        }

        let id = ReviewId::new(state.last_review_id + 1)?;
        state.last_review_id += 1;

        let created = Review {
            id,
            store_id: review.store_id,
            author_id: review.author_id,
            text: review.text,
            rating: review.rating,
            created_at: review.created_at,
        };
        state.reviews.push(created.clone());
        Ok(created)
    }

    async fn list_for_stores(&self, store_ids: &[StoreId]) -> DomainResult<Vec<Review>> {
        let state = self.state.read().await;
        let mut reviews: Vec<Review> = state
            .reviews
            .iter()
            .filter(|review| store_ids.contains(&review.store_id))
            .cloned()
            .collect();
        reviews.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(reviews)
    }
}

#[async_trait]
impl HeartRepository for InMemoryStore {
    async fn toggle(&self, user: UserId, store: StoreId) -> DomainResult<bool> {
        let mut state = self.state.write().await;
        if !state.stores.contains_key(&store) {
            return Err(DomainError::NotFound("store not found".into()));
        }

        if let Some(pos) = state.hearts.iter().position(|&h| h == (user, store)) {
            state.hearts.remove(pos);
            Ok(false)
        } else {
            state.hearts.push((user, store));
            Ok(true)
        }
    }

    async fn list_for_user(&self, user: UserId) -> DomainResult<Vec<StoreId>> {
        let state = self.state.read().await;
        Ok(state
            .hearts
            .iter()
            .filter(|(u, _)| *u == user)
            .map(|(_, store)| *store)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::store::{Location, StoreName, StoreTags};
    use chrono::{Duration, Utc};

    fn new_store(name: &str, slug: &str, tags: &[&str], lng: f64, lat: f64, minutes: i64) -> NewStore {
        let at = Utc::now() + Duration::minutes(minutes);
        NewStore {
            name: StoreName::new(name).unwrap(),
            slug: StoreSlug::new(slug).unwrap(),
            description: Some(format!("{name} serves coffee")),
            tags: StoreTags::new(tags.iter().copied()),
            location: Location::new(None, GeoPoint::new(lng, lat).unwrap(), "addr").unwrap(),
            photo: None,
            author_id: UserId::new(1).unwrap(),
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn duplicate_slug_insert_conflicts() {
        let repo = InMemoryStore::new();
        StoreWriteRepository::insert(&repo, new_store("A", "a", &[], 0.0, 0.0, 0)).await.unwrap();
        let err = StoreWriteRepository::insert(&repo, new_store("A", "a", &[], 0.0, 0.0, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn prefix_lookup_is_case_insensitive_and_honours_exclude() {
        let repo = InMemoryStore::new();
        let first = StoreWriteRepository::insert(&repo, new_store("A", "pizza", &[], 0.0, 0.0, 0)).await.unwrap();
        StoreWriteRepository::insert(&repo, new_store("B", "pizza-2", &[], 0.0, 0.0, 1)).await.unwrap();
        StoreWriteRepository::insert(&repo, new_store("C", "pasta", &[], 0.0, 0.0, 2)).await.unwrap();

        let all = repo.slugs_with_prefix("PIZZA", None).await.unwrap();
        assert_eq!(all.len(), 2);
        let others = repo.slugs_with_prefix("pizza", Some(first.id)).await.unwrap();
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].as_str(), "pizza-2");
    }

    #[tokio::test]
    async fn list_page_filters_by_tag_newest_first() {
        let repo = InMemoryStore::new();
        StoreWriteRepository::insert(&repo, new_store("Old", "old", &["Wifi"], 0.0, 0.0, 0)).await.unwrap();
        StoreWriteRepository::insert(&repo, new_store("Mid", "mid", &[], 0.0, 0.0, 1)).await.unwrap();
        StoreWriteRepository::insert(&repo, new_store("New", "new", &["Wifi"], 0.0, 0.0, 2)).await.unwrap();

        let (items, total) = repo.list_page(Some("Wifi"), 1, 10).await.unwrap();
        assert_eq!(total, 2);
        let names: Vec<_> = items.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["New", "Old"]);

        let (second, total) = repo.list_page(None, 2, 2).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].name.as_str(), "Old");
    }

    #[tokio::test]
    async fn near_orders_by_distance_within_radius() {
        let repo = InMemoryStore::new();
        StoreWriteRepository::insert(&repo, new_store("Far", "far", &[], 10.0, 10.0, 0)).await.unwrap();
        StoreWriteRepository::insert(&repo, new_store("Close", "close", &[], 0.001, 0.0, 1)).await.unwrap();
        StoreWriteRepository::insert(&repo, new_store("Here", "here", &[], 0.0, 0.0, 2)).await.unwrap();

        let origin = GeoPoint::new(0.0, 0.0).unwrap();
        let nearby = repo.near(origin, 10_000.0, 10).await.unwrap();
        let names: Vec<_> = nearby.iter().map(|n| n.store.name.as_str()).collect();
        assert_eq!(names, ["Here", "Close"]);
    }

    #[tokio::test]
    async fn search_prefers_name_matches() {
        let repo = InMemoryStore::new();
        StoreWriteRepository::insert(&repo, new_store("Bean There", "bean-there", &[], 0.0, 0.0, 0)).await.unwrap();
        StoreWriteRepository::insert(&repo, new_store("Coffee Hut", "coffee-hut", &[], 0.0, 0.0, 1)).await.unwrap();

        let hits = repo.search("coffee", 5).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].name.as_str(), "Coffee Hut");
    }

    #[tokio::test]
    async fn heart_toggles() {
        let repo = InMemoryStore::new();
        let store = StoreWriteRepository::insert(&repo, new_store("A", "a", &[], 0.0, 0.0, 0)).await.unwrap();
        let user = UserId::new(9).unwrap();

        assert!(repo.toggle(user, store.id).await.unwrap());
        assert_eq!(repo.list_for_user(user).await.unwrap(), vec![store.id]);
        assert!(!repo.toggle(user, store.id).await.unwrap());
        assert!(repo.list_for_user(user).await.unwrap().is_empty());
    }
}
