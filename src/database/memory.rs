//! In-process backend used for local runs (`DATABASE_URL=memory://`) and tests.
//!
//! Mirrors the constraints of the Postgres schema: one turn per `(team_id, date)`,
//! turns must reference a person of the same team, and deletes cascade.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use crate::database::{
    models::{DateFilter, NewTurn, Page, Person, PersonInput, Team, Turn},
    store::{PersonStore, StoreError, StoreResult, TeamStore, TurnStore},
};

#[derive(Debug, Default)]
struct Tables {
    teams: BTreeMap<i64, Team>,
    people: BTreeMap<i64, Person>,
    turns: BTreeMap<i64, Turn>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    // Same rule as the (person_id, team_id) foreign key on turns.
    fn require_member(&self, person_id: i64, team_id: i64) -> StoreResult<()> {
        let is_member = self
            .people
            .get(&person_id)
            .is_some_and(|person| person.team_id == team_id);
        if !is_member {
            return Err(StoreError::ForeignKeyViolation(format!(
                "person {} is not a member of team {}",
                person_id, team_id
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    /// Number of turns stored for a team, regardless of date.
    pub fn turn_count(&self, team_id: i64) -> StoreResult<usize> {
        let tables = self.read()?;
        Ok(tables
            .turns
            .values()
            .filter(|turn| turn.team_id == team_id)
            .count())
    }
}

#[async_trait]
impl TeamStore for MemoryStore {
    async fn list_teams(&self) -> StoreResult<Vec<Team>> {
        Ok(self.read()?.teams.values().cloned().collect())
    }

    async fn get_team(&self, id: i64) -> StoreResult<Option<Team>> {
        Ok(self.read()?.teams.get(&id).cloned())
    }

    async fn create_team(&self, name: &str) -> StoreResult<Team> {
        let mut tables = self.write()?;
        let team = Team {
            id: tables.next_id(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        tables.teams.insert(team.id, team.clone());
        Ok(team)
    }

    async fn update_team(&self, id: i64, name: &str) -> StoreResult<Option<Team>> {
        let mut tables = self.write()?;
        Ok(tables.teams.get_mut(&id).map(|team| {
            team.name = name.to_string();
            team.clone()
        }))
    }

    async fn delete_team(&self, id: i64) -> StoreResult<bool> {
        let mut tables = self.write()?;
        if tables.teams.remove(&id).is_none() {
            return Ok(false);
        }
        tables.people.retain(|_, person| person.team_id != id);
        tables.turns.retain(|_, turn| turn.team_id != id);
        Ok(true)
    }
}

#[async_trait]
impl PersonStore for MemoryStore {
    async fn list_people(&self, team_id: i64) -> StoreResult<Vec<Person>> {
        Ok(self
            .read()?
            .people
            .values()
            .filter(|person| person.team_id == team_id)
            .cloned()
            .collect())
    }

    async fn get_person(&self, id: i64, team_id: i64) -> StoreResult<Option<Person>> {
        Ok(self
            .read()?
            .people
            .get(&id)
            .filter(|person| person.team_id == team_id)
            .cloned())
    }

    async fn create_person(&self, team_id: i64, input: &PersonInput) -> StoreResult<Person> {
        let mut tables = self.write()?;
        if !tables.teams.contains_key(&team_id) {
            return Err(StoreError::ForeignKeyViolation(format!(
                "team {} does not exist",
                team_id
            )));
        }

        let person = Person {
            id: tables.next_id(),
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            email: input.email.clone(),
            team_id,
            created_at: Utc::now(),
        };
        tables.people.insert(person.id, person.clone());
        Ok(person)
    }

    async fn update_person(
        &self,
        id: i64,
        team_id: i64,
        input: &PersonInput,
    ) -> StoreResult<Option<Person>> {
        let mut tables = self.write()?;
        Ok(tables
            .people
            .get_mut(&id)
            .filter(|person| person.team_id == team_id)
            .map(|person| {
                person.first_name = input.first_name.clone();
                person.last_name = input.last_name.clone();
                person.email = input.email.clone();
                person.clone()
            }))
    }

    async fn delete_person(&self, id: i64, team_id: i64) -> StoreResult<bool> {
        let mut tables = self.write()?;
        let belongs = tables
            .people
            .get(&id)
            .is_some_and(|person| person.team_id == team_id);
        if !belongs {
            return Ok(false);
        }
        tables.people.remove(&id);
        tables.turns.retain(|_, turn| turn.person_id != id);
        Ok(true)
    }
}

#[async_trait]
impl TurnStore for MemoryStore {
    async fn get_turn(&self, id: i64, team_id: i64) -> StoreResult<Option<Turn>> {
        Ok(self
            .read()?
            .turns
            .get(&id)
            .filter(|turn| turn.team_id == team_id)
            .cloned())
    }

    async fn get_turn_by_date(&self, team_id: i64, date: NaiveDate) -> StoreResult<Option<Turn>> {
        Ok(self
            .read()?
            .turns
            .values()
            .find(|turn| turn.team_id == team_id && turn.date == date)
            .cloned())
    }

    async fn create_turn(&self, input: &NewTurn) -> StoreResult<Turn> {
        let mut tables = self.write()?;
        tables.require_member(input.person_id, input.team_id)?;
        let taken = tables
            .turns
            .values()
            .any(|turn| turn.team_id == input.team_id && turn.date == input.date);
        if taken {
            return Err(StoreError::UniqueViolation(format!(
                "turns_team_id_date_key: ({}, {})",
                input.team_id, input.date
            )));
        }

        let turn = Turn {
            id: tables.next_id(),
            team_id: input.team_id,
            person_id: input.person_id,
            date: input.date,
            created_at: Utc::now(),
        };
        tables.turns.insert(turn.id, turn.clone());
        Ok(turn)
    }

    async fn update_turn_person(
        &self,
        id: i64,
        team_id: i64,
        person_id: i64,
    ) -> StoreResult<Option<Turn>> {
        let mut tables = self.write()?;
        tables.require_member(person_id, team_id)?;
        Ok(tables
            .turns
            .get_mut(&id)
            .filter(|turn| turn.team_id == team_id)
            .map(|turn| {
                turn.person_id = person_id;
                turn.clone()
            }))
    }

    async fn list_turns(
        &self,
        team_id: i64,
        filter: DateFilter,
        page: Page,
    ) -> StoreResult<Vec<Turn>> {
        let tables = self.read()?;
        let mut turns: Vec<Turn> = tables
            .turns
            .values()
            .filter(|turn| turn.team_id == team_id && filter.contains(turn.date))
            .cloned()
            .collect();
        turns.sort_by_key(|turn| (turn.date, turn.id));

        Ok(turns
            .into_iter()
            .skip(page.offset.max(0) as usize)
            .take(page.limit.max(0) as usize)
            .collect())
    }
}
