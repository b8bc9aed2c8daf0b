pub mod person;
pub mod team;
pub mod turn;

// Re-export all models for easy importing
pub use person::*;
pub use team::*;
pub use turn::*;
