use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::database::models::{
    DateFilter, NewTurn, Page, Person, PersonInput, Team, Turn,
};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_error) = &error {
            if db_error.is_unique_violation() {
                return StoreError::UniqueViolation(db_error.message().to_string());
            }
            if db_error.is_foreign_key_violation() {
                return StoreError::ForeignKeyViolation(db_error.message().to_string());
            }
        }

        StoreError::Database(error)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait TeamStore: Send + Sync {
    async fn list_teams(&self) -> StoreResult<Vec<Team>>;

    async fn get_team(&self, id: i64) -> StoreResult<Option<Team>>;

    async fn create_team(&self, name: &str) -> StoreResult<Team>;

    async fn update_team(&self, id: i64, name: &str) -> StoreResult<Option<Team>>;

    /// Removes the team along with its people and turns.
    async fn delete_team(&self, id: i64) -> StoreResult<bool>;
}

#[async_trait]
pub trait PersonStore: Send + Sync {
    async fn list_people(&self, team_id: i64) -> StoreResult<Vec<Person>>;

    /// Looks a person up within a team; a person of another team is `None`.
    async fn get_person(&self, id: i64, team_id: i64) -> StoreResult<Option<Person>>;

    async fn create_person(&self, team_id: i64, input: &PersonInput) -> StoreResult<Person>;

    async fn update_person(
        &self,
        id: i64,
        team_id: i64,
        input: &PersonInput,
    ) -> StoreResult<Option<Person>>;

    /// Removes the person along with the turns assigned to them.
    async fn delete_person(&self, id: i64, team_id: i64) -> StoreResult<bool>;
}

/// Persistence of turns. Implementations must reject a second turn for the same
/// `(team_id, date)` with [`StoreError::UniqueViolation`].
#[async_trait]
pub trait TurnStore: Send + Sync {
    async fn get_turn(&self, id: i64, team_id: i64) -> StoreResult<Option<Turn>>;

    async fn get_turn_by_date(&self, team_id: i64, date: NaiveDate) -> StoreResult<Option<Turn>>;

    async fn create_turn(&self, input: &NewTurn) -> StoreResult<Turn>;

    async fn update_turn_person(
        &self,
        id: i64,
        team_id: i64,
        person_id: i64,
    ) -> StoreResult<Option<Turn>>;

    /// Turns of one team matching `filter`, ordered by date then id.
    async fn list_turns(
        &self,
        team_id: i64,
        filter: DateFilter,
        page: Page,
    ) -> StoreResult<Vec<Turn>>;
}
