//! API layer - HTTP handlers and routing
//!
//! Page endpoints of the portal:
//! - Account section (`/account`)
//! - News administration (`/admin/news`, `/admin/news/new`)
//!
//! Every route runs behind the session middleware; handlers redirect
//! anonymous callers to the login page themselves.

pub mod account;
pub mod form;
pub mod middleware;
pub mod news;
pub mod responses;

use axum::{middleware as axum_middleware, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::SessionConfig;
use crate::db::repositories::{SqlxNewsRepository, SqlxPlayerRepository, SqlxSessionRepository};
use crate::db::DynDatabasePool;
use crate::services::{AccountService, NewsService, PlayerService};

pub use middleware::{ApiError, AppState, RequestContext};
pub use responses::{ActionFailure, PageResult};

impl AppState {
    /// Wire the SQLx repositories and services over `pool`
    pub fn new(pool: DynDatabasePool, session: &SessionConfig) -> Self {
        let session_repo = SqlxSessionRepository::boxed(pool.clone());
        let player_repo = SqlxPlayerRepository::boxed(pool.clone());
        let news_repo = SqlxNewsRepository::boxed(pool.clone());

        Self {
            account_service: Arc::new(AccountService::with_session_expiration(
                session_repo,
                session.expiration_days,
            )),
            player_service: Arc::new(PlayerService::new(player_repo)),
            news_service: Arc::new(NewsService::new(news_repo)),
            session_cookie: Arc::from(session.cookie_name.as_str()),
            pool,
        }
    }
}

/// Build the complete router with middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(account::router())
        .merge(news::router())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::load_session,
        ))
        // Request tracing (outermost layer, runs for all requests)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
