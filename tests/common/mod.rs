#![allow(dead_code)]

use std::sync::{Arc, Once};

use actix_web::web;
use chrono::{DateTime, TimeZone, Utc};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};

use rota::database::models::{Person, PersonInput, Team};
use rota::database::{MemoryStore, PersonStore, Stores, TeamStore};
use rota::schedule::FixedClock;
use rota::{AppState, Config};

static INIT: Once = Once::new();

pub fn setup_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Monday 2024-06-03, mid-morning UTC.
pub fn monday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 10, 0, 0).unwrap()
}

pub struct TestContext {
    pub store: MemoryStore,
    pub stores: Stores,
    pub config: Config,
    pub state: web::Data<AppState>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::at(monday())
    }

    pub fn at(now: DateTime<Utc>) -> Self {
        Self::with_stores(MemoryStore::new(), now, |stores| stores)
    }

    /// Lets a test wrap the memory backend, e.g. to inject storage behaviour.
    pub fn with_stores(
        store: MemoryStore,
        now: DateTime<Utc>,
        wrap: impl FnOnce(Stores) -> Stores,
    ) -> Self {
        setup_test_env();
        let config = Config::test_config();
        let stores = wrap(Stores::memory(store.clone()));
        let state = AppState::new(stores.clone(), Arc::new(FixedClock(now)), &config)
            .expect("test config has a valid timezone");

        TestContext {
            store,
            stores,
            config,
            state: web::Data::new(state),
        }
    }

    pub async fn seed_team(&self, name: &str) -> Team {
        self.stores.teams.create_team(name).await.unwrap()
    }

    pub async fn seed_person(&self, team_id: i64) -> Person {
        let input = PersonInput {
            first_name: FirstName().fake(),
            last_name: LastName().fake(),
            email: SafeEmail().fake(),
        };
        self.stores.people.create_person(team_id, &input).await.unwrap()
    }
}

macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($ctx.state.clone())
                .wrap(rota::middleware::RequestId)
                .configure(rota::routes::configure),
        )
        .await
    };
}
