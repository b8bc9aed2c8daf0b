use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::{
    models::{Person, PersonInput},
    store::{PersonStore, StoreResult},
};

#[derive(Clone)]
pub struct PersonRepository {
    pool: PgPool,
}

impl PersonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersonStore for PersonRepository {
    async fn list_people(&self, team_id: i64) -> StoreResult<Vec<Person>> {
        let people = sqlx::query_as::<_, Person>(
            r#"
            SELECT
                id,
                first_name,
                last_name,
                email,
                team_id,
                created_at
            FROM
                people
            WHERE
                team_id = $1
            ORDER BY
                id
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(people)
    }

    async fn get_person(&self, id: i64, team_id: i64) -> StoreResult<Option<Person>> {
        let person = sqlx::query_as::<_, Person>(
            r#"
            SELECT
                id,
                first_name,
                last_name,
                email,
                team_id,
                created_at
            FROM
                people
            WHERE
                id = $1
                AND team_id = $2
            "#,
        )
        .bind(id)
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(person)
    }

    async fn create_person(&self, team_id: i64, input: &PersonInput) -> StoreResult<Person> {
        let person = sqlx::query_as::<_, Person>(
            r#"
            INSERT INTO
                people (first_name, last_name, email, team_id)
            VALUES
                ($1, $2, $3, $4)
            RETURNING
                id,
                first_name,
                last_name,
                email,
                team_id,
                created_at
            "#,
        )
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(team_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(person)
    }

    async fn update_person(
        &self,
        id: i64,
        team_id: i64,
        input: &PersonInput,
    ) -> StoreResult<Option<Person>> {
        let person = sqlx::query_as::<_, Person>(
            r#"
            UPDATE
                people
            SET
                first_name = $1,
                last_name = $2,
                email = $3
            WHERE
                id = $4
                AND team_id = $5
            RETURNING
                id,
                first_name,
                last_name,
                email,
                team_id,
                created_at
            "#,
        )
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(id)
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(person)
    }

    async fn delete_person(&self, id: i64, team_id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM people WHERE id = $1 AND team_id = $2")
            .bind(id)
            .bind(team_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
