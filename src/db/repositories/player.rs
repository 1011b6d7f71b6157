//! Player repository
//!
//! Database operations for characters:
//! - the account character list projection (with presence counts)
//! - main character lookup
//! - character creation (account management and fixtures)

use crate::db::pool::{backend, Backend};
use crate::db::DynDatabasePool;
use crate::models::{Player, PlayerListRow, PlayerPronoun, PlayerSex, PlayerVocation};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// Columns projected for the account character list
const LIST_COLUMNS: &str = r#"
    p.id, p.name, p.level, p.vocation, p.pronoun, p.sex, p.is_main,
    (SELECT COUNT(*) FROM players_online o WHERE o.player_id = p.id) AS presence_count
"#;

const PLAYER_COLUMNS: &str =
    "id, account_id, name, level, vocation, pronoun, sex, is_main, created_at";

/// Player repository trait
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// All characters of an account, in creation order
    async fn list_by_account(&self, account_id: i64) -> Result<Vec<PlayerListRow>>;

    /// The account's main character, if one is flagged.
    ///
    /// Should several be flagged, the oldest wins.
    async fn find_main_by_account(&self, account_id: i64) -> Result<Option<Player>>;

    /// Create a character
    async fn create(&self, player: &Player) -> Result<Player>;
}

/// SQLx-based player repository implementation
pub struct SqlxPlayerRepository {
    pool: DynDatabasePool,
}

impl SqlxPlayerRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn PlayerRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl PlayerRepository for SqlxPlayerRepository {
    async fn list_by_account(&self, account_id: i64) -> Result<Vec<PlayerListRow>> {
        let sql = format!(
            "SELECT {} FROM players p WHERE p.account_id = ? ORDER BY p.id",
            LIST_COLUMNS
        );

        match backend(&self.pool)? {
            Backend::Sqlite(pool) => list_by_account_sqlite(pool, &sql, account_id).await,
            Backend::Mysql(pool) => list_by_account_mysql(pool, &sql, account_id).await,
        }
    }

    async fn find_main_by_account(&self, account_id: i64) -> Result<Option<Player>> {
        let sql = format!(
            "SELECT {} FROM players WHERE account_id = ? AND is_main = ? ORDER BY id LIMIT 1",
            PLAYER_COLUMNS
        );

        match backend(&self.pool)? {
            Backend::Sqlite(pool) => find_main_sqlite(pool, &sql, account_id).await,
            Backend::Mysql(pool) => find_main_mysql(pool, &sql, account_id).await,
        }
    }

    async fn create(&self, player: &Player) -> Result<Player> {
        let id = match backend(&self.pool)? {
            Backend::Sqlite(pool) => create_player_sqlite(pool, player).await?,
            Backend::Mysql(pool) => create_player_mysql(pool, player).await?,
        };

        let mut created = player.clone();
        created.id = id;
        Ok(created)
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn list_by_account_sqlite(
    pool: &SqlitePool,
    sql: &str,
    account_id: i64,
) -> Result<Vec<PlayerListRow>> {
    let rows = sqlx::query(sql)
        .bind(account_id)
        .fetch_all(pool)
        .await
        .context("Failed to list players by account")?;

    Ok(rows.iter().map(row_to_list_row_sqlite).collect())
}

async fn find_main_sqlite(pool: &SqlitePool, sql: &str, account_id: i64) -> Result<Option<Player>> {
    let row = sqlx::query(sql)
        .bind(account_id)
        .bind(true)
        .fetch_optional(pool)
        .await
        .context("Failed to find main player")?;

    Ok(row.as_ref().map(row_to_player_sqlite))
}

async fn create_player_sqlite(pool: &SqlitePool, player: &Player) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO players (account_id, name, level, vocation, pronoun, sex, is_main, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(player.account_id)
    .bind(&player.name)
    .bind(player.level)
    .bind(player.vocation.as_str())
    .bind(player.pronoun.as_str())
    .bind(player.sex.as_str())
    .bind(player.is_main)
    .bind(player.created_at)
    .execute(pool)
    .await
    .context("Failed to create player")?;

    Ok(result.last_insert_rowid())
}

fn row_to_list_row_sqlite(row: &sqlx::sqlite::SqliteRow) -> PlayerListRow {
    PlayerListRow {
        id: row.get("id"),
        name: row.get("name"),
        level: row.get("level"),
        vocation: row.get("vocation"),
        pronoun: row.get("pronoun"),
        sex: row.get("sex"),
        is_main: row.get("is_main"),
        presence_count: row.get("presence_count"),
    }
}

fn row_to_player_sqlite(row: &sqlx::sqlite::SqliteRow) -> Player {
    Player {
        id: row.get("id"),
        account_id: row.get("account_id"),
        name: row.get("name"),
        level: row.get("level"),
        vocation: PlayerVocation::normalize(row.get("vocation")),
        pronoun: PlayerPronoun::normalize(row.get("pronoun")),
        sex: PlayerSex::normalize(row.get("sex")),
        is_main: row.get("is_main"),
        created_at: row.get("created_at"),
    }
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn list_by_account_mysql(
    pool: &MySqlPool,
    sql: &str,
    account_id: i64,
) -> Result<Vec<PlayerListRow>> {
    let rows = sqlx::query(sql)
        .bind(account_id)
        .fetch_all(pool)
        .await
        .context("Failed to list players by account")?;

    Ok(rows.iter().map(row_to_list_row_mysql).collect())
}

async fn find_main_mysql(pool: &MySqlPool, sql: &str, account_id: i64) -> Result<Option<Player>> {
    let row = sqlx::query(sql)
        .bind(account_id)
        .bind(true)
        .fetch_optional(pool)
        .await
        .context("Failed to find main player")?;

    Ok(row.as_ref().map(row_to_player_mysql))
}

async fn create_player_mysql(pool: &MySqlPool, player: &Player) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO players (account_id, name, level, vocation, pronoun, sex, is_main, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(player.account_id)
    .bind(&player.name)
    .bind(player.level)
    .bind(player.vocation.as_str())
    .bind(player.pronoun.as_str())
    .bind(player.sex.as_str())
    .bind(player.is_main)
    .bind(player.created_at)
    .execute(pool)
    .await
    .context("Failed to create player")?;

    Ok(result.last_insert_id() as i64)
}

fn row_to_list_row_mysql(row: &sqlx::mysql::MySqlRow) -> PlayerListRow {
    PlayerListRow {
        id: row.get("id"),
        name: row.get("name"),
        level: row.get("level"),
        vocation: row.get("vocation"),
        pronoun: row.get("pronoun"),
        sex: row.get("sex"),
        is_main: row.get("is_main"),
        presence_count: row.get("presence_count"),
    }
}

fn row_to_player_mysql(row: &sqlx::mysql::MySqlRow) -> Player {
    Player {
        id: row.get("id"),
        account_id: row.get("account_id"),
        name: row.get("name"),
        level: row.get("level"),
        vocation: PlayerVocation::normalize(row.get("vocation")),
        pronoun: PlayerPronoun::normalize(row.get("pronoun")),
        sex: PlayerSex::normalize(row.get("sex")),
        is_main: row.get("is_main"),
        created_at: row.get("created_at"),
    }
}
