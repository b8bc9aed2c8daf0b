use std::sync::Arc;

use crate::database::{
    PersonStore, Stores, TeamStore,
    models::{Person, PersonInput, PersonPatch, Team, TeamDetail, TeamInput},
};
use crate::error::ServiceError;

fn required(field: &str, value: &str) -> Result<String, ServiceError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ServiceError::InvalidInput(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

fn validate_person(input: PersonInput) -> Result<PersonInput, ServiceError> {
    let email = required("email", &input.email)?;
    if !email.contains('@') {
        return Err(ServiceError::InvalidInput(format!(
            "email is not valid: {}",
            email
        )));
    }

    Ok(PersonInput {
        first_name: required("first_name", &input.first_name)?,
        last_name: required("last_name", &input.last_name)?,
        email,
    })
}

#[derive(Clone)]
pub struct TeamDirectory {
    teams: Arc<dyn TeamStore>,
    people: Arc<dyn PersonStore>,
}

impl TeamDirectory {
    pub fn new(stores: &Stores) -> Self {
        Self {
            teams: stores.teams.clone(),
            people: stores.people.clone(),
        }
    }

    pub async fn list_teams(&self) -> Result<Vec<Team>, ServiceError> {
        Ok(self.teams.list_teams().await?)
    }

    /// The team with its people.
    pub async fn get_team(&self, team_id: i64) -> Result<TeamDetail, ServiceError> {
        let team = self
            .teams
            .get_team(team_id)
            .await?
            .ok_or(ServiceError::TeamNotFound(team_id))?;
        let people = self.people.list_people(team_id).await?;

        Ok(TeamDetail { team, people })
    }

    pub async fn create_team(&self, input: TeamInput) -> Result<Team, ServiceError> {
        let name = required("name", &input.name)?;
        let team = self.teams.create_team(&name).await?;
        log::info!("Created team {} ({})", team.id, team.name);
        Ok(team)
    }

    pub async fn rename_team(&self, team_id: i64, input: TeamInput) -> Result<Team, ServiceError> {
        let name = required("name", &input.name)?;
        self.teams
            .update_team(team_id, &name)
            .await?
            .ok_or(ServiceError::TeamNotFound(team_id))
    }

    pub async fn delete_team(&self, team_id: i64) -> Result<(), ServiceError> {
        if !self.teams.delete_team(team_id).await? {
            return Err(ServiceError::TeamNotFound(team_id));
        }
        log::info!("Deleted team {}", team_id);
        Ok(())
    }
}

#[derive(Clone)]
pub struct PeopleDirectory {
    teams: Arc<dyn TeamStore>,
    people: Arc<dyn PersonStore>,
}

impl PeopleDirectory {
    pub fn new(stores: &Stores) -> Self {
        Self {
            teams: stores.teams.clone(),
            people: stores.people.clone(),
        }
    }

    async fn require_team(&self, team_id: i64) -> Result<(), ServiceError> {
        match self.teams.get_team(team_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::TeamNotFound(team_id)),
        }
    }

    pub async fn list_people(&self, team_id: i64) -> Result<Vec<Person>, ServiceError> {
        self.require_team(team_id).await?;
        Ok(self.people.list_people(team_id).await?)
    }

    pub async fn get_person(&self, team_id: i64, person_id: i64) -> Result<Person, ServiceError> {
        self.require_team(team_id).await?;
        self.people
            .get_person(person_id, team_id)
            .await?
            .ok_or(ServiceError::PersonNotFound { person_id, team_id })
    }

    pub async fn add_person(&self, team_id: i64, input: PersonInput) -> Result<Person, ServiceError> {
        self.require_team(team_id).await?;
        let input = validate_person(input)?;
        let person = self.people.create_person(team_id, &input).await?;
        log::info!("Added person {} to team {}", person.id, team_id);
        Ok(person)
    }

    pub async fn update_person(
        &self,
        team_id: i64,
        person_id: i64,
        patch: PersonPatch,
    ) -> Result<Person, ServiceError> {
        let current = self.get_person(team_id, person_id).await?;
        let input = validate_person(patch.apply_to(&current))?;

        self.people
            .update_person(person_id, team_id, &input)
            .await?
            .ok_or(ServiceError::PersonNotFound { person_id, team_id })
    }

    pub async fn delete_person(&self, team_id: i64, person_id: i64) -> Result<(), ServiceError> {
        self.require_team(team_id).await?;
        if !self.people.delete_person(person_id, team_id).await? {
            return Err(ServiceError::PersonNotFound { person_id, team_id });
        }
        log::info!("Removed person {} from team {}", person_id, team_id);
        Ok(())
    }
}
