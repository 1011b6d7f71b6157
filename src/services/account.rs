//! Account service
//!
//! Session management for signed-in accounts:
//! - resolving a session token to an account
//! - issuing session tokens
//! - purging expired sessions
//!
//! Login itself lives elsewhere; this service only trusts tokens it has
//! stored.

use crate::config::MAX_SESSION_EXPIRATION_DAYS;
use crate::db::repositories::SessionRepository;
use crate::models::Session;
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Default session expiration time in days
pub const DEFAULT_SESSION_EXPIRATION_DAYS: i64 = 7;

pub struct AccountService {
    session_repo: Arc<dyn SessionRepository>,
    session_expiration_days: i64,
}

impl AccountService {
    pub fn new(session_repo: Arc<dyn SessionRepository>) -> Self {
        Self::with_session_expiration(session_repo, DEFAULT_SESSION_EXPIRATION_DAYS)
    }

    /// Create an account service with custom session expiration
    pub fn with_session_expiration(
        session_repo: Arc<dyn SessionRepository>,
        session_expiration_days: i64,
    ) -> Self {
        Self {
            session_repo,
            session_expiration_days,
        }
    }

    /// Resolve a session token to its account ID.
    ///
    /// Returns `None` for unknown tokens and for expired sessions, which are
    /// deleted on sight.
    pub async fn validate_session(&self, token: &str) -> Result<Option<i64>> {
        let session = match self
            .session_repo
            .get_by_id(token)
            .await
            .context("Failed to get session")?
        {
            Some(s) => s,
            None => return Ok(None),
        };

        if session.is_expired() {
            if let Err(e) = self.session_repo.delete(token).await {
                tracing::warn!("Failed to delete expired session: {}", e);
            }
            return Ok(None);
        }

        Ok(Some(session.account_id))
    }

    /// Issue a new session token for an account.
    ///
    /// Lifetimes above [`MAX_SESSION_EXPIRATION_DAYS`] are capped.
    pub async fn create_session(&self, account_id: i64) -> Result<Session> {
        let now = Utc::now();
        let days = self.session_expiration_days.min(MAX_SESSION_EXPIRATION_DAYS);
        let expires_at = Duration::try_days(days)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .context("Session expiration is out of range")?;

        let session = Session {
            id: Uuid::new_v4().to_string(),
            account_id,
            expires_at,
            created_at: now,
        };

        self.session_repo
            .create(&session)
            .await
            .context("Failed to create session")
    }

    /// Delete all expired sessions, returning how many were removed
    pub async fn cleanup_expired_sessions(&self) -> Result<i64> {
        self.session_repo
            .delete_expired()
            .await
            .context("Failed to delete expired sessions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::SqlxSessionRepository;
    use crate::db::{create_test_account, create_test_pool, migrations, DynDatabasePool};

    async fn setup_test_service(expiration_days: i64) -> (DynDatabasePool, AccountService) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let service = AccountService::with_session_expiration(
            SqlxSessionRepository::boxed(pool.clone()),
            expiration_days,
        );
        (pool, service)
    }

    #[tokio::test]
    async fn test_create_and_validate_session() {
        let (pool, service) = setup_test_service(7).await;
        let account_id = create_test_account(&pool, "alpha").await;

        let session = service.create_session(account_id).await.unwrap();

        assert_eq!(session.account_id, account_id);
        assert!(session.expires_at > Utc::now() + Duration::days(6));
        assert_eq!(
            service.validate_session(&session.id).await.unwrap(),
            Some(account_id)
        );
    }

    #[tokio::test]
    async fn test_huge_expiration_is_capped() {
        let (pool, service) = setup_test_service(i64::MAX).await;
        let account_id = create_test_account(&pool, "alpha").await;

        let session = service.create_session(account_id).await.unwrap();

        let limit = Duration::days(MAX_SESSION_EXPIRATION_DAYS);
        assert!(session.expires_at <= Utc::now() + limit);
        assert!(session.expires_at > Utc::now() + limit - Duration::days(1));
        assert_eq!(
            service.validate_session(&session.id).await.unwrap(),
            Some(account_id)
        );
    }

    #[tokio::test]
    async fn test_out_of_range_expiration_is_an_error() {
        let (pool, service) = setup_test_service(i64::MIN).await;
        let account_id = create_test_account(&pool, "alpha").await;

        assert!(service.create_session(account_id).await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_token_is_not_a_session() {
        let (_pool, service) = setup_test_service(7).await;

        assert_eq!(service.validate_session("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected_and_removed() {
        let (pool, service) = setup_test_service(-1).await;
        let account_id = create_test_account(&pool, "alpha").await;
        let repo = SqlxSessionRepository::new(pool.clone());

        let session = service.create_session(account_id).await.unwrap();

        assert_eq!(service.validate_session(&session.id).await.unwrap(), None);
        assert!(repo.get_by_id(&session.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cleanup_expired_sessions() {
        let (pool, expired_service) = setup_test_service(-1).await;
        let account_id = create_test_account(&pool, "alpha").await;
        let live_service =
            AccountService::new(SqlxSessionRepository::boxed(pool.clone()));

        expired_service.create_session(account_id).await.unwrap();
        expired_service.create_session(account_id).await.unwrap();
        let live = live_service.create_session(account_id).await.unwrap();

        assert_eq!(live_service.cleanup_expired_sessions().await.unwrap(), 2);
        assert_eq!(
            live_service.validate_session(&live.id).await.unwrap(),
            Some(account_id)
        );
    }
}
