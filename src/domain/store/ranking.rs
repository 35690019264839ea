// src/domain/store/ranking.rs
//! Tag frequency and top-rated rankings.
//!
//! PostgreSQL computes these in SQL; the functions here carry the same
//! semantics for the in-memory backend.
use std::collections::HashMap;

use crate::domain::review::Review;
use crate::domain::store::entity::Store;
use crate::domain::store::value_objects::{StoreId, StoreTags};

pub const TOP_STORES_LIMIT: usize = 10;
pub const MIN_REVIEWS_FOR_RANKING: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    pub tag: String,
    pub count: u64,
}

/// Sort by count descending, tag ascending among equal counts.
pub fn sort_tag_counts(counts: &mut [TagCount]) {
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
}

pub fn tally_tags<'a, I>(tag_sets: I) -> Vec<TagCount>
where
    I: IntoIterator<Item = &'a StoreTags>,
{
    let mut counts: HashMap<&'a str, u64> = HashMap::new();
    for tags in tag_sets {
        for tag in tags.as_slice() {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }

    let mut out: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();
    sort_tag_counts(&mut out);
    out
}

/// A store with its joined reviews and their mean rating.
#[derive(Debug, Clone)]
pub struct TopStore {
    pub store: Store,
    pub reviews: Vec<Review>,
    pub average_rating: f64,
}

impl TopStore {
    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }
}

#[allow(clippy::cast_precision_loss)]
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: f64 = reviews.iter().map(|r| f64::from(r.rating.value())).sum();
    Some(sum / reviews.len() as f64)
}

/// Join, filter to stores with enough reviews, sort by mean and truncate.
pub fn rank_top_stores(stores: Vec<Store>, reviews: Vec<Review>, limit: usize) -> Vec<TopStore> {
    let mut by_store: HashMap<StoreId, Vec<Review>> = HashMap::new();
    for review in reviews {
        by_store.entry(review.store_id).or_default().push(review);
    }

    let mut ranked: Vec<TopStore> = stores
        .into_iter()
        .filter_map(|store| {
            let reviews = by_store.remove(&store.id).unwrap_or_default();
            if reviews.len() < MIN_REVIEWS_FOR_RANKING {
                return None;
            }
            let average_rating = average_rating(&reviews)?;
            Some(TopStore {
                store,
                reviews,
                average_rating,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.average_rating
            .total_cmp(&a.average_rating)
            .then_with(|| a.store.id.cmp(&b.store.id))
    });
    ranked.truncate(limit);
    ranked
}
