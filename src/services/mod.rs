//! Services layer - Business logic
//!
//! Services sit between the HTTP handlers and the repositories:
//! - session resolution for signed-in accounts
//! - character listing and main character lookup
//! - news creation and listing
//! - form validation

pub mod account;
pub mod news;
pub mod player;
pub mod validation;

pub use account::AccountService;
pub use news::{NewsService, NewsServiceError};
pub use player::PlayerService;
pub use validation::{FieldErrors, FieldTypeError, NewsForm};
