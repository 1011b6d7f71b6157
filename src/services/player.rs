//! Player service

use crate::db::repositories::PlayerRepository;
use crate::models::{CharacterSummary, Player};
use anyhow::{Context, Result};
use std::sync::Arc;

pub struct PlayerService {
    repo: Arc<dyn PlayerRepository>,
}

impl PlayerService {
    pub fn new(repo: Arc<dyn PlayerRepository>) -> Self {
        Self { repo }
    }

    /// Characters of an account with derived presence and normalized enums
    pub async fn list_characters(&self, account_id: i64) -> Result<Vec<CharacterSummary>> {
        let rows = self
            .repo
            .list_by_account(account_id)
            .await
            .context("Failed to list characters")?;

        Ok(rows.into_iter().map(CharacterSummary::from).collect())
    }

    pub async fn find_main_character(&self, account_id: i64) -> Result<Option<Player>> {
        self.repo.find_main_by_account(account_id).await
    }

    pub async fn create(&self, player: &Player) -> Result<Player> {
        self.repo.create(player).await
    }
}
