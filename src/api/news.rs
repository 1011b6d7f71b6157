//! News administration endpoints
//!
//! - `GET  /admin/news`      news list
//! - `GET  /admin/news/new`  creation form data (the author)
//! - `POST /admin/news/new`  creation action

use axum::{
    extract::{FromRequest, Request, State},
    routing::get,
    Router,
};
use serde::Serialize;

use crate::api::form::SubmittedForm;
use crate::api::middleware::{ApiError, AppState, RequestContext};
use crate::api::responses::{ActionFailure, PageResult, CREATE_NEWS_FAILED, NO_MAIN_CHARACTER};
use crate::models::{CreateNewsInput, NewsWithAuthor};
use crate::services::NewsForm;

pub const NEWS_LIST_PATH: &str = "/admin/news";
pub const NEWS_PAGE_TITLE: &str = "News";

pub fn router() -> Router<AppState> {
    Router::new()
        .route(NEWS_LIST_PATH, get(list_news))
        .route("/admin/news/new", get(load_new_news).post(create_news_action))
}

#[derive(Debug, Serialize)]
pub struct NewsAuthor {
    pub name: String,
}

/// Data for the news creation form
#[derive(Debug, Serialize)]
pub struct NewNewsPage {
    pub author: NewsAuthor,
}

#[derive(Debug, Serialize)]
pub struct NewsListPage {
    pub title: &'static str,
    pub news: Vec<NewsWithAuthor>,
}

async fn list_news(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<PageResult<NewsListPage>, ApiError> {
    if ctx.account_id.is_none() {
        return Ok(PageResult::login());
    }

    let news = state.news_service.list().await?;

    Ok(PageResult::Data(NewsListPage {
        title: NEWS_PAGE_TITLE,
        news,
    }))
}

async fn load_new_news(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<PageResult<NewNewsPage>, ApiError> {
    let Some(account_id) = ctx.account_id else {
        return Ok(PageResult::login());
    };

    let result = match state.player_service.find_main_character(account_id).await? {
        Some(author) => PageResult::Data(NewNewsPage {
            author: NewsAuthor { name: author.name },
        }),
        None => PageResult::bad_request(ActionFailure::invalid_global(NO_MAIN_CHARACTER)),
    };

    Ok(result)
}

/// The body is only read once the caller is known to be signed in.
async fn create_news_action(
    State(state): State<AppState>,
    ctx: RequestContext,
    request: Request,
) -> Result<PageResult<()>, ApiError> {
    let Some(account_id) = ctx.account_id else {
        return Ok(PageResult::login());
    };

    let SubmittedForm(form) = SubmittedForm::from_request(request, &state).await?;

    let news_form = match NewsForm::parse(&form) {
        Ok(news_form) => news_form,
        Err(errors) => return Ok(PageResult::bad_request(ActionFailure::invalid(errors))),
    };

    let Some(author) = state.player_service.find_main_character(account_id).await? else {
        return Ok(PageResult::bad_request(ActionFailure::invalid_global(
            NO_MAIN_CHARACTER,
        )));
    };

    let input = CreateNewsInput {
        title: news_form.title,
        content: news_form.content,
        published: news_form.published,
        author_id: author.id,
    };

    match state.news_service.create(input).await {
        Ok(_) => Ok(PageResult::redirect(NEWS_LIST_PATH)),
        Err(e) => {
            tracing::error!("Failed to create news article: {}", e);
            Ok(PageResult::internal_error(ActionFailure::global(
                CREATE_NEWS_FAILED,
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{
        body_json, get, post_form, post_multipart, CapturedLogs, TestApp,
    };
    use crate::db::repositories::NewsRepository;
    use crate::models::{News, NewsWithAuthor, Player};
    use async_trait::async_trait;
    use axum::http::{header, StatusCode};
    use serde_json::json;
    use std::sync::Arc;

    struct FailingNewsRepository;

    #[async_trait]
    impl NewsRepository for FailingNewsRepository {
        async fn create(&self, _news: &News) -> anyhow::Result<News> {
            anyhow::bail!("disk full")
        }

        async fn list(&self) -> anyhow::Result<Vec<NewsWithAuthor>> {
            anyhow::bail!("connection reset")
        }
    }

    async fn app_with_author() -> (TestApp, String, Player) {
        let app = TestApp::new().await;
        let (account_id, token) = app.sign_in("editor").await;
        let author = app
            .state
            .player_service
            .create(&Player::new(account_id, "Editor".to_string()).as_main())
            .await
            .unwrap();
        (app, token, author)
    }

    #[tokio::test]
    async fn test_anonymous_requests_redirect_to_login() {
        let app = TestApp::new().await;

        for request in [
            get("/admin/news", None),
            get("/admin/news/new", None),
            post_form("/admin/news/new", None, "title=a&content=b"),
        ] {
            let response = app.send(request).await;
            assert_eq!(response.status(), StatusCode::FOUND);
            assert_eq!(response.headers()[header::LOCATION], "/login");
        }
    }

    #[tokio::test]
    async fn test_anonymous_post_body_is_not_read() {
        let app = TestApp::new().await;

        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/admin/news/new")
            .header(header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from("{}"))
            .unwrap();
        let response = app.send(request).await;

        assert_eq!(response.status(), StatusCode::FOUND);
    }

    #[tokio::test]
    async fn test_load_returns_author_name() {
        let (app, token, _author) = app_with_author().await;

        let response = app.send(get("/admin/news/new", Some(&token))).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "author": { "name": "Editor" } }));
    }

    #[tokio::test]
    async fn test_load_without_main_character() {
        let app = TestApp::new().await;
        let (account_id, token) = app.sign_in("editor").await;
        app.state
            .player_service
            .create(&Player::new(account_id, "Alt".to_string()))
            .await
            .unwrap();

        let response = app.send(get("/admin/news/new", Some(&token))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "invalid": true, "errors": { "global": ["No main character found"] } })
        );
    }

    #[tokio::test]
    async fn test_create_redirects_and_persists() {
        let (app, token, author) = app_with_author().await;

        let response = app
            .send(post_form(
                "/admin/news/new",
                Some(&token),
                "title=Server+launch&content=Doors+open&published=on",
            ))
            .await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/admin/news");

        let news = app.state.news_service.list().await.unwrap();
        assert_eq!(news.len(), 1);
        assert_eq!(news[0].news.title, "Server launch");
        assert_eq!(news[0].news.content, "Doors open");
        assert!(news[0].news.published);
        assert_eq!(news[0].news.author_id, author.id);
    }

    #[tokio::test]
    async fn test_unchecked_published_is_false() {
        let (app, token, _author) = app_with_author().await;

        let response = app
            .send(post_form("/admin/news/new", Some(&token), "title=Draft&content=Later"))
            .await;

        assert_eq!(response.status(), StatusCode::FOUND);
        let news = app.state.news_service.list().await.unwrap();
        assert!(!news[0].news.published);
    }

    #[tokio::test]
    async fn test_missing_title_is_rejected() {
        let (app, token, _author) = app_with_author().await;

        let response = app
            .send(post_form("/admin/news/new", Some(&token), "title=&content=Body"))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["invalid"], true);
        assert_eq!(body["errors"]["title"], json!(["title is required"]));
        assert!(body["errors"].get("content").is_none());
        assert!(app.state.news_service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_content_is_rejected() {
        let (app, token, _author) = app_with_author().await;

        let response = app
            .send(post_multipart(
                "/admin/news/new",
                Some(&token),
                &[("title", None, "Hello"), ("content", Some("body.txt"), "text")],
            ))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["errors"]["content"], json!(["content must be a string"]));
    }

    #[tokio::test]
    async fn test_multipart_text_fields_are_accepted() {
        let (app, token, _author) = app_with_author().await;

        let response = app
            .send(post_multipart(
                "/admin/news/new",
                Some(&token),
                &[("title", None, "Hello"), ("content", None, "World"), ("published", None, "on")],
            ))
            .await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert!(app.state.news_service.list().await.unwrap()[0].news.published);
    }

    #[tokio::test]
    async fn test_create_without_main_character() {
        let app = TestApp::new().await;
        let (_account_id, token) = app.sign_in("editor").await;

        let response = app
            .send(post_form("/admin/news/new", Some(&token), "title=Hi&content=There"))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "invalid": true, "errors": { "global": ["No main character found"] } })
        );
        assert!(app.state.news_service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persistence_failure_is_server_error() {
        let app = TestApp::with_news_repository(Arc::new(FailingNewsRepository)).await;
        let (account_id, token) = app.sign_in("editor").await;
        app.state
            .player_service
            .create(&Player::new(account_id, "Editor".to_string()).as_main())
            .await
            .unwrap();

        let response = app
            .send(post_form("/admin/news/new", Some(&token), "title=Hi&content=There"))
            .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "errors": { "global": ["Failed to create news article"] } })
        );
    }

    #[tokio::test]
    async fn test_persistence_failure_is_logged() {
        let app = TestApp::with_news_repository(Arc::new(FailingNewsRepository)).await;
        let (account_id, token) = app.sign_in("editor").await;
        app.state
            .player_service
            .create(&Player::new(account_id, "Editor".to_string()).as_main())
            .await
            .unwrap();

        let logs = CapturedLogs::default();
        let _guard = logs.install();
        app.send(post_form("/admin/news/new", Some(&token), "title=Hi&content=There"))
            .await;

        let output = logs.contents();
        assert!(output.contains("ERROR"), "no error event in: {}", output);
        assert!(output.contains("Failed to create news article"));
    }

    #[tokio::test]
    async fn test_list_failure_is_logged_server_error() {
        let app = TestApp::with_news_repository(Arc::new(FailingNewsRepository)).await;
        let (_account_id, token) = app.sign_in("editor").await;

        let logs = CapturedLogs::default();
        let _guard = logs.install();
        let response = app.send(get("/admin/news", Some(&token))).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"]["code"], "INTERNAL_ERROR");

        let output = logs.contents();
        assert!(output.contains("Failed to list news"), "missing log in: {}", output);
        assert!(output.contains("connection reset"));
    }

    #[tokio::test]
    async fn test_list_news_newest_first() {
        let (app, token, _author) = app_with_author().await;

        for title in ["First", "Second"] {
            let body = format!("title={}&content=Body", title);
            app.send(post_form("/admin/news/new", Some(&token), &body)).await;
        }

        let response = app.send(get("/admin/news", Some(&token))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["title"], "News");
        assert_eq!(body["news"][0]["title"], "Second");
        assert_eq!(body["news"][1]["title"], "First");
        assert_eq!(body["news"][0]["author_name"], "Editor");
    }
}
