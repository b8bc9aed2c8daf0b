pub mod people;
pub mod shared;
pub mod teams;
pub mod turns;
