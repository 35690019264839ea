// src/infrastructure/repositories/postgres_store.rs
use super::error::{escape_like, map_sqlx};
use super::postgres_review::fetch_reviews_for;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::review::Review;
use crate::domain::store::{
    GeoPoint, Location, NearbyStore, NewStore, Store, StoreId, StoreName, StoreReadRepository,
    StoreSlug, StoreTags, StoreUpdate, StoreWriteRepository, TagCount, TopStore,
    ranking::MIN_REVIEWS_FOR_RANKING, value_objects::EARTH_RADIUS_METERS,
};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;

macro_rules! store_columns {
    () => {
        "id, name, slug, description, tags, location_type, longitude, latitude, address, photo, author_id, created_at, updated_at"
    };
}

#[derive(Clone)]
pub struct PostgresStoreWriteRepository {
    pool: PgPool,
}

impl PostgresStoreWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresStoreReadRepository {
    pool: PgPool,
}

impl PostgresStoreReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct StoreRow {
    id: i64,
    name: String,
    slug: String,
    description: Option<String>,
    tags: Vec<String>,
    location_type: String,
    longitude: f64,
    latitude: f64,
    address: String,
    photo: Option<String>,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<StoreRow> for Store {
    type Error = DomainError;

    fn try_from(row: StoreRow) -> Result<Self, Self::Error> {
        let point = GeoPoint::new(row.longitude, row.latitude)?;
        Ok(Self {
            id: StoreId::new(row.id)?,
            name: StoreName::new(row.name)?,
            slug: StoreSlug::new(row.slug)?,
            description: row.description,
            tags: StoreTags::new(row.tags),
            location: Location::new(Some(row.location_type), point, row.address)?,
            photo: row.photo,
            author_id: UserId::new(row.author_id)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct RankedRow {
    #[sqlx(flatten)]
    store: StoreRow,
    average_rating: f64,
}

#[derive(Debug, FromRow)]
struct NearbyRow {
    #[sqlx(flatten)]
    store: StoreRow,
    distance_meters: f64,
}

#[derive(Debug, FromRow)]
struct TagCountRow {
    tag: String,
    count: i64,
}

fn into_stores(rows: Vec<StoreRow>) -> DomainResult<Vec<Store>> {
    rows.into_iter().map(Store::try_from).collect()
}

#[async_trait]
impl StoreWriteRepository for PostgresStoreWriteRepository {
    async fn insert(&self, store: NewStore) -> DomainResult<Store> {
        let NewStore {
            name,
            slug,
            description,
            tags,
            location,
            photo,
            author_id,
            created_at,
            updated_at,
        } = store;

        let row = sqlx::query_as::<_, StoreRow>(concat!(
            "INSERT INTO stores (name, slug, description, tags, location_type, longitude, latitude, address, photo, author_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING ",
            store_columns!()
        ))
        .bind(name.as_str())
        .bind(slug.as_str())
        .bind(description)
        .bind(tags.into_inner())
        .bind(location.kind)
        .bind(location.point.lng())
        .bind(location.point.lat())
        .bind(location.address)
        .bind(photo)
        .bind(i64::from(author_id))
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Store::try_from(row)
    }

    async fn update(&self, update: StoreUpdate) -> DomainResult<Store> {
        let StoreUpdate {
            id,
            name,
            slug,
            description,
            tags,
            location,
            photo,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE stores SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(name) = name {
            builder.push(", name = ");
            builder.push_bind(name.into_inner());
        }

        if let Some(slug) = slug {
            builder.push(", slug = ");
            builder.push_bind(slug.into_inner());
        }

        if let Some(description) = description {
            builder.push(", description = ");
            builder.push_bind(description);
        }

        if let Some(tags) = tags {
            builder.push(", tags = ");
            builder.push_bind(tags.into_inner());
        }

        if let Some(location) = location {
            builder.push(", location_type = ");
            builder.push_bind(location.kind);
            builder.push(", longitude = ");
            builder.push_bind(location.point.lng());
            builder.push(", latitude = ");
            builder.push_bind(location.point.lat());
            builder.push(", address = ");
            builder.push_bind(location.address);
        }

        if let Some(photo) = photo {
            builder.push(", photo = ");
            builder.push_bind(photo);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(concat!(" RETURNING ", store_columns!()));

        let row = builder
            .build_query_as::<StoreRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("store not found".into()))?;

        Store::try_from(row)
    }
}

enum SearchMode<'q> {
    FullText(&'q str),
    Pattern(&'q str),
}

impl PostgresStoreReadRepository {
    async fn search_with(&self, mode: SearchMode<'_>, limit: u32) -> DomainResult<Vec<Store>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(concat!("SELECT ", store_columns!(), " FROM stores WHERE "));
        match mode {
            SearchMode::FullText(query) => {
                builder.push("search @@ plainto_tsquery('simple', ");
                builder.push_bind(query);
                builder.push(") ORDER BY ts_rank(search, plainto_tsquery('simple', ");
                builder.push_bind(query);
                builder.push(")) DESC, id DESC");
            }
            SearchMode::Pattern(pattern) => {
                builder.push("(name ILIKE ");
                builder.push_bind(pattern);
                builder.push(" OR description ILIKE ");
                builder.push_bind(pattern);
                builder.push(") ORDER BY created_at DESC, id DESC");
            }
        }
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(limit));

        let rows = builder
            .build_query_as::<StoreRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        into_stores(rows)
    }

    fn push_tag_filter<'a>(builder: &mut QueryBuilder<'a, Postgres>, tag: Option<&'a str>) {
        if let Some(tag) = tag {
            builder.push(" WHERE ");
            builder.push_bind(tag);
            builder.push(" = ANY(tags)");
        }
    }
}

#[async_trait]
impl StoreReadRepository for PostgresStoreReadRepository {
    async fn find_by_id(&self, id: StoreId) -> DomainResult<Option<Store>> {
        let row = sqlx::query_as::<_, StoreRow>(concat!(
            "SELECT ",
            store_columns!(),
            " FROM stores WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Store::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &StoreSlug) -> DomainResult<Option<Store>> {
        let row = sqlx::query_as::<_, StoreRow>(concat!(
            "SELECT ",
            store_columns!(),
            " FROM stores WHERE slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Store::try_from).transpose()
    }

    async fn slugs_with_prefix(
        &self,
        prefix: &str,
        exclude: Option<StoreId>,
    ) -> DomainResult<Vec<StoreSlug>> {
        let pattern = format!("{}%", escape_like(prefix));
        let slugs: Vec<String> = sqlx::query_scalar(
            "SELECT slug FROM stores
             WHERE slug ILIKE $1 ESCAPE '\\' AND ($2::BIGINT IS NULL OR id <> $2)",
        )
        .bind(pattern)
        .bind(exclude.map(i64::from))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        slugs.into_iter().map(StoreSlug::new).collect()
    }

    async fn list_page(
        &self,
        tag: Option<&str>,
        page: u32,
        per_page: u32,
    ) -> DomainResult<(Vec<Store>, u64)> {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let offset = i64::from(page - 1) * i64::from(per_page);

        let mut list_builder: QueryBuilder<Postgres> =
            QueryBuilder::new(concat!("SELECT ", store_columns!(), " FROM stores"));
        Self::push_tag_filter(&mut list_builder, tag);
        list_builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        list_builder.push_bind(i64::from(per_page));
        list_builder.push(" OFFSET ");
        list_builder.push_bind(offset);

        let rows = list_builder
            .build_query_as::<StoreRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut count_builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(1) FROM stores");
        Self::push_tag_filter(&mut count_builder, tag);

        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok((into_stores(rows)?, u64::try_from(total).unwrap_or_default()))
    }

    async fn tag_counts(&self) -> DomainResult<Vec<TagCount>> {
        let rows = sqlx::query_as::<_, TagCountRow>(
            "SELECT tag, COUNT(*) AS count
             FROM stores, unnest(tags) AS tag
             GROUP BY tag
             ORDER BY count DESC, tag ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(rows
            .into_iter()
            .map(|row| TagCount {
                tag: row.tag,
                count: u64::try_from(row.count).unwrap_or_default(),
            })
            .collect())
    }

    async fn top_rated(&self, limit: usize) -> DomainResult<Vec<TopStore>> {
        let min_reviews = i64::try_from(MIN_REVIEWS_FOR_RANKING).unwrap_or(i64::MAX);
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows = sqlx::query_as::<_, RankedRow>(concat!(
            "SELECT ",
            store_columns!(),
            ", ranked.average_rating
             FROM (
                 SELECT store_id, AVG(rating)::DOUBLE PRECISION AS average_rating
                 FROM reviews
                 GROUP BY store_id
                 HAVING COUNT(*) >= $1
             ) ranked
             JOIN stores ON stores.id = ranked.store_id
             ORDER BY ranked.average_rating DESC, stores.id ASC
             LIMIT $2"
        ))
        .bind(min_reviews)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let ids = rows
            .iter()
            .map(|row| StoreId::new(row.store.id))
            .collect::<DomainResult<Vec<_>>>()?;
        let mut by_store: HashMap<StoreId, Vec<Review>> = HashMap::new();
        for review in fetch_reviews_for(&self.pool, &ids).await? {
            by_store.entry(review.store_id).or_default().push(review);
        }

        rows.into_iter()
            .map(|row| {
                let store = Store::try_from(row.store)?;
                let reviews = by_store.remove(&store.id).unwrap_or_default();
                Ok(TopStore {
                    store,
                    reviews,
                    average_rating: row.average_rating,
                })
            })
            .collect()
    }

    async fn search(&self, query: &str, limit: u32) -> DomainResult<Vec<Store>> {
        let stores = self.search_with(SearchMode::FullText(query), limit).await?;
        if !stores.is_empty() {
            return Ok(stores);
        }

        // Typeahead input is often a partial word the text index cannot match.
        let pattern = format!("%{}%", escape_like(query));
        self.search_with(SearchMode::Pattern(&pattern), limit).await
    }

    async fn near(
        &self,
        point: GeoPoint,
        max_distance_meters: f64,
        limit: u32,
    ) -> DomainResult<Vec<NearbyStore>> {
        let rows = sqlx::query_as::<_, NearbyRow>(concat!(
            "SELECT * FROM (
                 SELECT ",
            store_columns!(),
            ", 2 * $1 * ASIN(LEAST(1.0, SQRT(
                     POWER(SIN(RADIANS(latitude - $3) / 2), 2)
                     + COS(RADIANS($3)) * COS(RADIANS(latitude))
                     * POWER(SIN(RADIANS(longitude - $2) / 2), 2)
                 ))) AS distance_meters
                 FROM stores
             ) nearby
             WHERE distance_meters <= $4
             ORDER BY distance_meters ASC, id ASC
             LIMIT $5"
        ))
        .bind(EARTH_RADIUS_METERS)
        .bind(point.lng())
        .bind(point.lat())
        .bind(max_distance_meters)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter()
            .map(|row| {
                Ok(NearbyStore {
                    store: Store::try_from(row.store)?,
                    distance_meters: row.distance_meters,
                })
            })
            .collect()
    }
}
