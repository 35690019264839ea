// src/infrastructure/repositories/postgres_heart.rs
use super::error::map_sqlx;
use crate::domain::errors::DomainResult;
use crate::domain::store::{HeartRepository, StoreId};
use crate::domain::user::UserId;
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PostgresHeartRepository {
    pool: PgPool,
}

impl PostgresHeartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HeartRepository for PostgresHeartRepository {
    async fn toggle(&self, user: UserId, store: StoreId) -> DomainResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let removed = sqlx::query("DELETE FROM hearts WHERE user_id = $1 AND store_id = $2")
            .bind(i64::from(user))
            .bind(i64::from(store))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?
            .rows_affected();

        if removed == 0 {
            sqlx::query(
                "INSERT INTO hearts (user_id, store_id) VALUES ($1, $2)
                 ON CONFLICT (user_id, store_id) DO NOTHING",
            )
            .bind(i64::from(user))
            .bind(i64::from(store))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(removed == 0)
    }

    async fn list_for_user(&self, user: UserId) -> DomainResult<Vec<StoreId>> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT store_id FROM hearts WHERE user_id = $1 ORDER BY created_at ASC, store_id ASC",
        )
        .bind(i64::from(user))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        ids.into_iter().map(StoreId::new).collect()
    }
}
