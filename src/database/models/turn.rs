use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// A person on duty for a team on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Turn {
    pub id: i64,
    pub team_id: i64,
    pub person_id: i64,
    pub date: NaiveDate,           // DATE, local to the configured timezone
    pub created_at: DateTime<Utc>, // TIMESTAMPTZ
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewTurn {
    pub team_id: i64,
    pub person_id: i64,
    pub date: NaiveDate,
}

/// Inclusive date bounds applied when listing a team's turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    Between { from: NaiveDate, to: NaiveDate },
    From(NaiveDate),
    To(NaiveDate),
    All,
}

impl DateFilter {
    pub fn from_bounds(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        match (from, to) {
            (Some(from), Some(to)) => DateFilter::Between { from, to },
            (Some(from), None) => DateFilter::From(from),
            (None, Some(to)) => DateFilter::To(to),
            (None, None) => DateFilter::All,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            DateFilter::Between { from, to } => from <= date && date <= to,
            DateFilter::From(from) => from <= date,
            DateFilter::To(to) => date <= to,
            DateFilter::All => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Page {
    fn default() -> Self {
        Page {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}
