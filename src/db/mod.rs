//! Database layer
//!
//! Storage for accounts, sessions, characters and news. Two backends are
//! supported:
//! - SQLite (default, single-file deployment)
//! - MySQL (shared game server databases)
//!
//! The driver is selected by configuration and hidden behind the
//! `DatabasePool` trait; repositories resolve the concrete pool with
//! [`pool::backend`].
//!
//! # Usage
//!
//! ```ignore
//! use ot_portal::config::DatabaseConfig;
//! use ot_portal::db::{create_pool, migrations};
//!
//! let pool = create_pool(&DatabaseConfig::default()).await?;
//! migrations::run_migrations(&pool).await?;
//! pool.ping().await?;
//! ```

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{
    backend, create_pool, create_test_pool, Backend, DatabasePool, DynDatabasePool,
    MysqlDatabase, SqliteDatabase,
};

/// Insert an account row for tests, returning its ID
#[cfg(test)]
pub(crate) async fn create_test_account(pool: &DynDatabasePool, name: &str) -> i64 {
    let sqlite_pool = pool.as_sqlite().expect("test pool is SQLite");
    sqlx::query("INSERT INTO accounts (name, email) VALUES (?, ?)")
        .bind(name)
        .bind(format!("{}@example.com", name))
        .execute(sqlite_pool)
        .await
        .expect("Failed to insert test account")
        .last_insert_rowid()
}

/// Record one online presence for a player in tests
#[cfg(test)]
pub(crate) async fn set_player_online(pool: &DynDatabasePool, player_id: i64) {
    let sqlite_pool = pool.as_sqlite().expect("test pool is SQLite");
    sqlx::query("INSERT INTO players_online (player_id) VALUES (?)")
        .bind(player_id)
        .execute(sqlite_pool)
        .await
        .expect("Failed to insert presence");
}
