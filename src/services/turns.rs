use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Deserialize;

use crate::database::{
    PersonStore, StoreError, Stores, TeamStore, TurnStore,
    models::{DEFAULT_PAGE_LIMIT, DateFilter, NewTurn, Page, Turn},
};
use crate::error::ServiceError;
use crate::schedule::{Clock, next_working_day};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw list parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TurnListParams {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A validated list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnQuery {
    pub filter: DateFilter,
    pub page: Page,
}

impl TurnQuery {
    pub fn parse(params: &TurnListParams) -> Result<Self, ServiceError> {
        let from = parse_date_bound("date_from", params.date_from.as_deref())?;
        let to = parse_date_bound("date_to", params.date_to.as_deref())?;

        let limit = params.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if limit < 0 {
            return Err(ServiceError::InvalidInput(format!(
                "limit must not be negative, got {}",
                limit
            )));
        }
        let offset = params.offset.unwrap_or(0);
        if offset < 0 {
            return Err(ServiceError::InvalidInput(format!(
                "offset must not be negative, got {}",
                offset
            )));
        }

        Ok(TurnQuery {
            filter: DateFilter::from_bounds(from, to),
            page: Page { limit, offset },
        })
    }
}

// An empty value counts as "not given".
fn parse_date_bound(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, ServiceError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(Some)
            .map_err(|_| ServiceError::InvalidDateFormat {
                field,
                value: raw.to_string(),
            }),
    }
}

/// Assigns and lists the duty turns of a team.
#[derive(Clone)]
pub struct TurnService {
    teams: Arc<dyn TeamStore>,
    people: Arc<dyn PersonStore>,
    turns: Arc<dyn TurnStore>,
    clock: Arc<dyn Clock>,
    timezone: Tz,
    request_timeout: Duration,
}

impl TurnService {
    pub fn new(stores: &Stores, clock: Arc<dyn Clock>, timezone: Tz, request_timeout: Duration) -> Self {
        Self {
            teams: stores.teams.clone(),
            people: stores.people.clone(),
            turns: stores.turns.clone(),
            clock,
            timezone,
            request_timeout,
        }
    }

    /// Date the next assignment request would target.
    pub fn next_turn_date(&self) -> NaiveDate {
        next_working_day(self.clock.now(), self.timezone)
    }

    /// Puts `person_id` on duty for the team's next duty date, creating the turn
    /// or reassigning the existing one.
    pub async fn assign_next_turn(&self, team_id: i64, person_id: i64) -> Result<Turn, ServiceError> {
        self.with_deadline(self.upsert_next_turn(team_id, person_id))
            .await
    }

    pub async fn list_turns(
        &self,
        team_id: i64,
        params: &TurnListParams,
    ) -> Result<Vec<Turn>, ServiceError> {
        let query = TurnQuery::parse(params)?;

        self.with_deadline(async {
            self.require_team(team_id).await?;
            let turns = self
                .turns
                .list_turns(team_id, query.filter, query.page)
                .await?;
            Ok::<_, ServiceError>(turns)
        })
        .await
    }

    pub async fn get_turn(&self, team_id: i64, turn_id: i64) -> Result<Option<Turn>, ServiceError> {
        self.with_deadline(async {
            self.require_team(team_id).await?;
            Ok::<_, ServiceError>(self.turns.get_turn(turn_id, team_id).await?)
        })
        .await
    }

    async fn with_deadline<T, F>(&self, operation: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, ServiceError>>,
    {
        tokio::time::timeout(self.request_timeout, operation)
            .await
            .map_err(|_| ServiceError::Timeout(self.request_timeout))?
    }

    async fn require_team(&self, team_id: i64) -> Result<(), ServiceError> {
        match self.teams.get_team(team_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::TeamNotFound(team_id)),
        }
    }

    async fn upsert_next_turn(&self, team_id: i64, person_id: i64) -> Result<Turn, ServiceError> {
        self.require_team(team_id).await?;
        let person = self
            .people
            .get_person(person_id, team_id)
            .await?
            .ok_or(ServiceError::PersonNotFound { person_id, team_id })?;

        let date = self.next_turn_date();

        match self.turns.get_turn_by_date(team_id, date).await? {
            Some(existing) => self.reassign(existing, person.id).await,
            None => self.create_or_reassign(team_id, person.id, date).await,
        }
    }

    async fn create_or_reassign(
        &self,
        team_id: i64,
        person_id: i64,
        date: NaiveDate,
    ) -> Result<Turn, ServiceError> {
        let new_turn = NewTurn {
            team_id,
            person_id,
            date,
        };

        match self.turns.create_turn(&new_turn).await {
            Ok(turn) => {
                log::info!(
                    "Created turn {} for team {} on {} (person {})",
                    turn.id,
                    team_id,
                    date,
                    person_id
                );
                Ok(turn)
            }
            // Another request inserted the turn between our lookup and insert.
            Err(StoreError::UniqueViolation(detail)) => {
                log::warn!(
                    "Turn for team {} on {} was created concurrently ({}); reassigning instead",
                    team_id,
                    date,
                    detail
                );
                let existing = self
                    .turns
                    .get_turn_by_date(team_id, date)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::Inconsistent(format!(
                            "turn for team {} on {} conflicted on insert but is not visible",
                            team_id, date
                        ))
                    })?;
                self.reassign(existing, person_id).await
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn reassign(&self, turn: Turn, person_id: i64) -> Result<Turn, ServiceError> {
        let updated = self
            .turns
            .update_turn_person(turn.id, turn.team_id, person_id)
            .await?
            .ok_or_else(|| {
                ServiceError::Inconsistent(format!(
                    "turn {} of team {} disappeared during reassignment",
                    turn.id, turn.team_id
                ))
            })?;

        log::info!(
            "Reassigned turn {} of team {} on {} from person {} to {}",
            updated.id,
            updated.team_id,
            updated.date,
            turn.person_id,
            updated.person_id
        );

        Ok(updated)
    }
}
