//! Account section endpoints

use axum::{extract::State, routing::get, Router};
use serde::Serialize;

use crate::api::middleware::{ApiError, AppState, RequestContext};
use crate::api::responses::PageResult;
use crate::models::CharacterSummary;

pub const ACCOUNT_PAGE_TITLE: &str = "Account Management";

pub fn router() -> Router<AppState> {
    Router::new().route("/account", get(account_layout))
}

/// Data shared by every page of the account section
#[derive(Debug, Serialize)]
pub struct AccountLayout {
    pub title: &'static str,
    pub characters: Vec<CharacterSummary>,
}

async fn account_layout(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<PageResult<AccountLayout>, ApiError> {
    let Some(account_id) = ctx.account_id else {
        return Ok(PageResult::login());
    };

    let characters = state.player_service.list_characters(account_id).await?;

    Ok(PageResult::Data(AccountLayout {
        title: ACCOUNT_PAGE_TITLE,
        characters,
    }))
}
