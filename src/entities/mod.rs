//! Entity module - Contains the SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod player;

pub use player::{Column as PlayerColumn, Entity as Player, Model as PlayerModel};
