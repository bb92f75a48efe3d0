use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_book::create_book;
use super::handlers::get_book::get_book;
use crate::domain::book::ports::BookServicePort;

#[derive(Clone)]
pub struct AppState {
    pub book_service: Arc<dyn BookServicePort>,
}

pub fn create_router(book_service: Arc<dyn BookServicePort>) -> Router {
    let state = AppState { book_service };

    let routes = Router::new()
        .route("/api/v1/books/add", post(create_book))
        .route("/api/v1/books/:id", get(get_book));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::http::header;
    use axum::http::StatusCode;
    use chrono::Utc;
    use mockall::mock;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::book::errors::BookError;
    use crate::domain::book::models::Book;
    use crate::domain::book::models::BookId;
    use crate::domain::book::models::CreateBookCommand;

    mock! {
        pub TestBookService {}

        #[async_trait]
        impl BookServicePort for TestBookService {
            async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError>;
            async fn get_book(&self, id: &BookId) -> Result<Book, BookError>;
        }
    }

    fn stored_book(id: i64) -> Book {
        Book {
            id: BookId(id),
            title: "Rich Dad, Poor Dad".to_string(),
            author: "Robert T Kiyosaki".to_string(),
            description: "Financial management".to_string(),
            price: 100_000,
            stock: 50,
            created_at: Utc::now(),
            modified_at: Utc::now(),
            deleted_at: None,
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_book_returns_created() {
        let mut service = MockTestBookService::new();
        service
            .expect_create_book()
            .withf(|command| command.title == "Rich Dad, Poor Dad" && command.price == 100_000)
            .times(1)
            .returning(|_| Ok(stored_book(1)));

        let app = create_router(Arc::new(service));
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/books/add")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"title":"Rich Dad, Poor Dad","author":"Robert T Kiyosaki","description":"Financial management","price":100000,"stock":50}"#,
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["status_code"], 201);
        assert_eq!(body["data"]["id"], 1);
        assert_eq!(body["data"]["title"], "Rich Dad, Poor Dad");
        assert_eq!(body["data"]["stock"], 50);
    }

    #[tokio::test]
    async fn test_create_book_with_empty_title_is_unprocessable() {
        let mut service = MockTestBookService::new();
        service.expect_create_book().times(0);

        let app = create_router(Arc::new(service));
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/books/add")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"title":"  ","author":"Robert T Kiyosaki","price":100000,"stock":50}"#,
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["data"]["message"], "Title must not be empty");
    }

    #[tokio::test]
    async fn test_get_book_success() {
        let mut service = MockTestBookService::new();
        service
            .expect_get_book()
            .withf(|id| *id == BookId(7))
            .times(1)
            .returning(|_| Ok(stored_book(7)));

        let app = create_router(Arc::new(service));
        let request = Request::builder()
            .method("GET")
            .uri("/api/v1/books/7")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["data"]["id"], 7);
        assert_eq!(body["data"]["author"], "Robert T Kiyosaki");
    }

    #[tokio::test]
    async fn test_get_book_not_found() {
        let mut service = MockTestBookService::new();
        service
            .expect_get_book()
            .times(1)
            .returning(|id| Err(BookError::NotFound(id.to_string())));

        let app = create_router(Arc::new(service));
        let request = Request::builder()
            .method("GET")
            .uri("/api/v1/books/999")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["data"]["message"], "Book not found: 999");
    }

    #[tokio::test]
    async fn test_get_book_with_malformed_id_is_unprocessable() {
        let mut service = MockTestBookService::new();
        // Parsing fails before the service is reached
        service.expect_get_book().times(0);

        let app = create_router(Arc::new(service));
        let request = Request::builder()
            .method("GET")
            .uri("/api/v1/books/not-a-number")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
