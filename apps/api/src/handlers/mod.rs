//! HTTP request handlers.

pub mod health;
pub mod positions;
pub mod users;
