use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Person {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub team_id: i64,
    pub created_at: DateTime<Utc>, // TIMESTAMPTZ
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Partial update; absent or blank fields keep the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl PersonPatch {
    pub fn apply_to(self, person: &Person) -> PersonInput {
        fn pick(value: Option<String>, current: &str) -> String {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| current.to_string())
        }

        PersonInput {
            first_name: pick(self.first_name, &person.first_name),
            last_name: pick(self.last_name, &person.last_name),
            email: pick(self.email, &person.email),
        }
    }
}
