// src/domain/store/services.rs
use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use regex::{Regex, RegexBuilder};

use crate::application::ports::util::SlugGenerator;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::store::entity::{NewStore, Store, StoreChanges, StoreDraft, StoreUpdate};
use crate::domain::store::repository::StoreReadRepository;
use crate::domain::store::value_objects::{StoreId, StoreName, StoreSlug};

/// Matches `base` itself or `base` followed by `-` and an optional counter,
/// ignoring case.
pub struct SlugPattern {
    regex: Regex,
}

impl SlugPattern {
    pub fn new(base: &StoreSlug) -> DomainResult<Self> {
        let pattern = format!("^({})((-[0-9]*)?)$", regex::escape(base.as_str()));
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|err| DomainError::Validation(format!("invalid slug pattern: {err}")))?;
        Ok(Self { regex })
    }

    pub fn matches(&self, slug: &str) -> bool {
        self.regex.is_match(slug)
    }
}

/// Pick the slug for `base` given the slugs already stored.
///
/// Returns `base` when nothing matches the pattern, otherwise `base-{n+1}`
/// where `n` is the number of matches. A candidate already present in
/// `existing` (a store named "Pizza 2", or a gap left by a rename) moves the
/// counter on to the next free number.
pub fn assign_slug<'a, I>(base: &StoreSlug, existing: I) -> DomainResult<StoreSlug>
where
    I: IntoIterator<Item = &'a str>,
{
    let pattern = SlugPattern::new(base)?;
    let taken: HashSet<String> = existing
        .into_iter()
        .filter(|slug| pattern.matches(slug))
        .map(str::to_lowercase)
        .collect();

    if taken.is_empty() {
        return Ok(base.clone());
    }

    let mut counter = taken.len() + 1;
    loop {
        let candidate = format!("{base}-{counter}");
        if !taken.contains(&candidate) {
            return StoreSlug::new(candidate);
        }
        counter += 1;
    }
}

/// Domain service producing slugs for stores.
///
/// The check and the later write are not atomic. Two stores created with the
/// same name at the same time compute the same slug; storage rejects the
/// second one with a conflict.
pub struct StoreSlugService {
    read_repo: Arc<dyn StoreReadRepository>,
    generator: Arc<dyn SlugGenerator>,
}

impl StoreSlugService {
    pub fn new(read_repo: Arc<dyn StoreReadRepository>, generator: Arc<dyn SlugGenerator>) -> Self {
        Self {
            read_repo,
            generator,
        }
    }

    pub fn base_slug(&self, name: &StoreName, now: DateTime<Utc>) -> DomainResult<StoreSlug> {
        let base = self.generator.slugify(name.as_str());
        if base.is_empty() {
            StoreSlug::new(format!("store-{}", now.timestamp()))
        } else {
            StoreSlug::new(base)
        }
    }

    pub async fn unique_slug(
        &self,
        name: &StoreName,
        ignore_id: Option<StoreId>,
        now: DateTime<Utc>,
    ) -> DomainResult<StoreSlug> {
        let base = self.base_slug(name, now)?;
        let existing = self
            .read_repo
            .slugs_with_prefix(base.as_str(), ignore_id)
            .await?;
        let slug = assign_slug(&base, existing.iter().map(StoreSlug::as_str))?;
        tracing::debug!(base = %base, slug = %slug, candidates = existing.len(), "assigned store slug");
        Ok(slug)
    }

    /// Explicit write-path step: give a draft its slug.
    pub async fn prepare_for_insert(&self, draft: StoreDraft) -> DomainResult<NewStore> {
        let slug = self.unique_slug(&draft.name, None, draft.created_at).await?;
        Ok(draft.with_slug(slug))
    }

    /// Explicit write-path step for updates. The slug is derived again only
    /// when the name actually changes.
    pub async fn prepare_for_update(
        &self,
        current: &Store,
        mut changes: StoreChanges,
        now: DateTime<Utc>,
    ) -> DomainResult<StoreUpdate> {
        let name = changes.name.take();
        let mut update = StoreUpdate::new(current.id, now).with_changes(changes);

        if let Some(name) = name.filter(|name| current.name_differs(name)) {
            let slug = self.unique_slug(&name, Some(current.id), now).await?;
            update = update.with_name(name).with_slug(slug);
        }

        Ok(update)
    }
}
