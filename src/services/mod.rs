pub mod directory;
pub mod turns;

pub use directory::{PeopleDirectory, TeamDirectory};
pub use turns::{TurnListParams, TurnQuery, TurnService};
