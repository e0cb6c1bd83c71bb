//! Database models (FromRow structs)

pub mod external_character;
pub mod member;

pub use external_character::ExternalCharacterModel;
pub use member::{MemberMessageModel, MemberModel};
