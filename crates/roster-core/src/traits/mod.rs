//! Ports - traits implemented by the infrastructure crates

pub mod repositories;
pub mod source;

pub use repositories::{
    ExternalCharacterRepository, MemberRepository, MemberUpsert, RepoResult,
};
pub use source::{RemoteCharacter, RemoteGuild, RemoteMember, RosterSource, SourceError, SourceResult};
