//! Data models
//!
//! This module contains the data structures used throughout the portal:
//! - Database entities (Player, News, Session)
//! - Projections and normalized views (PlayerListRow, CharacterSummary)
//! - Submitted form data

mod form;
mod news;
mod player;
mod session;

pub use form::{FormData, FormValue};
pub use news::{CreateNewsInput, News, NewsWithAuthor};
pub use player::{
    CharacterSummary, Player, PlayerListRow, PlayerPronoun, PlayerSex, PlayerVocation,
};
pub use session::Session;
