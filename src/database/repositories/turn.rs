use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::database::{
    models::{DateFilter, NewTurn, Page, Turn},
    store::{StoreResult, TurnStore},
};

#[derive(Clone)]
pub struct TurnRepository {
    pool: PgPool,
}

impl TurnRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TurnStore for TurnRepository {
    async fn get_turn(&self, id: i64, team_id: i64) -> StoreResult<Option<Turn>> {
        let turn = sqlx::query_as::<_, Turn>(
            r#"
            SELECT
                id,
                team_id,
                person_id,
                date,
                created_at
            FROM
                turns
            WHERE
                id = $1
                AND team_id = $2
            "#,
        )
        .bind(id)
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(turn)
    }

    async fn get_turn_by_date(&self, team_id: i64, date: NaiveDate) -> StoreResult<Option<Turn>> {
        let turn = sqlx::query_as::<_, Turn>(
            r#"
            SELECT
                id,
                team_id,
                person_id,
                date,
                created_at
            FROM
                turns
            WHERE
                team_id = $1
                AND date = $2
            "#,
        )
        .bind(team_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(turn)
    }

    // A plain INSERT: a concurrent insert for the same (team_id, date) surfaces as
    // a unique violation that the scheduler turns into a reassignment.
    async fn create_turn(&self, input: &NewTurn) -> StoreResult<Turn> {
        let turn = sqlx::query_as::<_, Turn>(
            r#"
            INSERT INTO
                turns (team_id, person_id, date)
            VALUES
                ($1, $2, $3)
            RETURNING
                id,
                team_id,
                person_id,
                date,
                created_at
            "#,
        )
        .bind(input.team_id)
        .bind(input.person_id)
        .bind(input.date)
        .fetch_one(&self.pool)
        .await?;

        Ok(turn)
    }

    async fn update_turn_person(
        &self,
        id: i64,
        team_id: i64,
        person_id: i64,
    ) -> StoreResult<Option<Turn>> {
        let turn = sqlx::query_as::<_, Turn>(
            r#"
            UPDATE
                turns
            SET
                person_id = $1
            WHERE
                id = $2
                AND team_id = $3
            RETURNING
                id,
                team_id,
                person_id,
                date,
                created_at
            "#,
        )
        .bind(person_id)
        .bind(id)
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(turn)
    }

    async fn list_turns(
        &self,
        team_id: i64,
        filter: DateFilter,
        page: Page,
    ) -> StoreResult<Vec<Turn>> {
        let turns = match filter {
            DateFilter::Between { from, to } => {
                sqlx::query_as::<_, Turn>(
                    r#"
                    SELECT id, team_id, person_id, date, created_at
                    FROM turns
                    WHERE team_id = $1 AND date >= $2 AND date <= $3
                    ORDER BY date, id
                    LIMIT $4 OFFSET $5
                    "#,
                )
                .bind(team_id)
                .bind(from)
                .bind(to)
                .bind(page.limit)
                .bind(page.offset)
                .fetch_all(&self.pool)
                .await?
            }
            DateFilter::From(from) => {
                sqlx::query_as::<_, Turn>(
                    r#"
                    SELECT id, team_id, person_id, date, created_at
                    FROM turns
                    WHERE team_id = $1 AND date >= $2
                    ORDER BY date, id
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(team_id)
                .bind(from)
                .bind(page.limit)
                .bind(page.offset)
                .fetch_all(&self.pool)
                .await?
            }
            DateFilter::To(to) => {
                sqlx::query_as::<_, Turn>(
                    r#"
                    SELECT id, team_id, person_id, date, created_at
                    FROM turns
                    WHERE team_id = $1 AND date <= $2
                    ORDER BY date, id
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(team_id)
                .bind(to)
                .bind(page.limit)
                .bind(page.offset)
                .fetch_all(&self.pool)
                .await?
            }
            DateFilter::All => {
                sqlx::query_as::<_, Turn>(
                    r#"
                    SELECT id, team_id, person_id, date, created_at
                    FROM turns
                    WHERE team_id = $1
                    ORDER BY date, id
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(team_id)
                .bind(page.limit)
                .bind(page.offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(turns)
    }
}
