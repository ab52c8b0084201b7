pub mod player;
pub mod registration;
pub mod tournament;
