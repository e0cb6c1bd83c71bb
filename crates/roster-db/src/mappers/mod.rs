//! Model <-> entity mappers

pub mod external_character;
pub mod member;

pub use external_character::external_character_from_model;
pub use member::{member_from_model, message_from_model};
