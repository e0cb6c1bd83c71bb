//! Request handlers

pub mod external;
pub mod guild;
pub mod health;
