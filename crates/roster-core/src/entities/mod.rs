//! Domain entities

pub mod external_character;
pub mod guild;
pub mod member;

pub use external_character::{ExternalCharacter, NAME_MAX_LEN};
pub use guild::Guild;
pub use member::{GuildMember, MemberMessage, MemberStatus, MESSAGE_MAX_LEN};
