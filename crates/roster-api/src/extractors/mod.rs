//! Request extractors

pub mod api_key;
pub mod validated;

pub use api_key::RequireApiKey;
pub use validated::ValidatedJson;
