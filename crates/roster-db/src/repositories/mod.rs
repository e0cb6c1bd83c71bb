//! Repository implementations

pub mod error;
pub mod external_character;
pub mod member;

pub use external_character::PgExternalCharacterRepository;
pub use member::PgMemberRepository;
