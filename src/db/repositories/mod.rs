//! Database repositories
//!
//! Repository pattern implementations for database access.
//! Each repository handles the queries for a specific entity.

pub mod news;
pub mod player;
pub mod session;

pub use news::{NewsRepository, SqlxNewsRepository};
pub use player::{PlayerRepository, SqlxPlayerRepository};
pub use session::{SessionRepository, SqlxSessionRepository};
