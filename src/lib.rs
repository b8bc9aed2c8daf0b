pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod schedule;
pub mod services;

use std::sync::Arc;

pub use config::Config;
pub use database::Stores;
pub use error::{AppError, ServiceError};
pub use services::{PeopleDirectory, TeamDirectory, TurnService};

use schedule::Clock;

pub struct AppState {
    pub teams: TeamDirectory,
    pub people: PeopleDirectory,
    pub turns: TurnService,
}

impl AppState {
    /// Fails when the configured timezone is not a known IANA zone.
    pub fn new(stores: Stores, clock: Arc<dyn Clock>, config: &Config) -> Result<Self, ServiceError> {
        let timezone = config.timezone()?;

        Ok(AppState {
            teams: TeamDirectory::new(&stores),
            people: PeopleDirectory::new(&stores),
            turns: TurnService::new(&stores, clock, timezone, config.request_timeout()),
        })
    }
}
