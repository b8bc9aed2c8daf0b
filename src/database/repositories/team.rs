use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::{
    models::Team,
    store::{StoreResult, TeamStore},
};

#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamStore for TeamRepository {
    async fn list_teams(&self) -> StoreResult<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT
                id,
                name,
                created_at
            FROM
                teams
            ORDER BY
                id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(teams)
    }

    async fn get_team(&self, id: i64) -> StoreResult<Option<Team>> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT
                id,
                name,
                created_at
            FROM
                teams
            WHERE
                id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    async fn create_team(&self, name: &str) -> StoreResult<Team> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO
                teams (name)
            VALUES
                ($1)
            RETURNING
                id,
                name,
                created_at
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(team)
    }

    async fn update_team(&self, id: i64, name: &str) -> StoreResult<Option<Team>> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            UPDATE
                teams
            SET
                name = $1
            WHERE
                id = $2
            RETURNING
                id,
                name,
                created_at
            "#,
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    async fn delete_team(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
