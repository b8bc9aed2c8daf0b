pub mod person;
pub mod team;
pub mod turn;

// Re-export all repositories for easy importing
pub use person::PersonRepository;
pub use team::TeamRepository;
pub use turn::TurnRepository;
