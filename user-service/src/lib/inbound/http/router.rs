use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::get_profile::get_profile;
use super::handlers::login::login;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        user_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/api/v1/users/register", post(register))
        .route("/api/v1/users/login", post(login));

    let protected_routes = Router::new()
        .route("/api/v1/users/profile", get(get_profile))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

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
        .merge(public_routes)
        .merge(protected_routes)
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
    use crate::domain::user::errors::UserError;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::RegisterUserCommand;
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::Username;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";
    const AUDIENCE: &str = "bookstore";

    mock! {
        pub TestUserService {}

        #[async_trait]
        impl UserServicePort for TestUserService {
            async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;
            async fn login(&self, username: &Username, password: &str) -> Result<String, UserError>;
            async fn get_profile(&self, id: &UserId) -> Result<User, UserError>;
        }
    }

    fn stored_user(id: i64) -> User {
        User {
            id: UserId(id),
            name: "John Doe".to_string(),
            username: Username::new("jdoe".to_string()).unwrap(),
            email: EmailAddress::new("j@x.com".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            created_at: Utc::now(),
            modified_at: Utc::now(),
            deleted_at: None,
        }
    }

    fn router_with(service: MockTestUserService) -> Router {
        let authenticator = Arc::new(Authenticator::new(SECRET, AUDIENCE, 24));
        create_router(Arc::new(service), authenticator)
    }

    fn profile_request(authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("GET")
            .uri("/api/v1/users/profile");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_message(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        body["data"]["message"].as_str().unwrap_or_default().to_string()
    }

    #[tokio::test]
    async fn test_profile_without_header_is_unauthorized() {
        let mut service = MockTestUserService::new();
        // The gate must short-circuit before the service is reached
        service.expect_get_profile().times(0);

        let app = router_with(service);
        let response = app.oneshot(profile_request(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_message(response).await, "no credentials");
    }

    #[tokio::test]
    async fn test_profile_with_malformed_scheme_is_unauthorized() {
        let mut service = MockTestUserService::new();
        service.expect_get_profile().times(0);

        let app = router_with(service);
        let response = app
            .oneshot(profile_request(Some("Token abc.def.ghi")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_message(response).await, "invalid authorization format");
    }

    #[tokio::test]
    async fn test_profile_with_expired_token_is_unauthorized() {
        let mut service = MockTestUserService::new();
        service.expect_get_profile().times(0);

        let handler = auth::JwtHandler::new(SECRET, AUDIENCE);
        let mut claims = auth::Claims::for_user(42, "jdoe", "j@x.com", AUDIENCE, 24);
        claims.exp = Utc::now().timestamp() - 3600;
        let token = handler.encode(&claims).unwrap();

        let app = router_with(service);
        let response = app
            .oneshot(profile_request(Some(&format!("Bearer {}", token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_message(response).await, "invalid or expired token");
    }

    #[tokio::test]
    async fn test_profile_with_wrong_secret_is_unauthorized() {
        let mut service = MockTestUserService::new();
        service.expect_get_profile().times(0);

        let other = Authenticator::new(b"another_secret_32_bytes_long_key!!", AUDIENCE, 24);
        let token = other.issue_token(42, "jdoe", "j@x.com").unwrap();

        let app = router_with(service);
        let response = app
            .oneshot(profile_request(Some(&format!("Bearer {}", token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_message(response).await, "invalid signature");
    }

    #[tokio::test]
    async fn test_profile_with_valid_token_binds_identity() {
        let mut service = MockTestUserService::new();
        // The handler must receive the exact user ID encoded in the token
        service
            .expect_get_profile()
            .withf(|id| *id == UserId(42))
            .times(1)
            .returning(|_| Ok(stored_user(42)));

        let authenticator = Arc::new(Authenticator::new(SECRET, AUDIENCE, 24));
        let token = authenticator.issue_token(42, "jdoe", "j@x.com").unwrap();

        let app = create_router(Arc::new(service), authenticator);
        let response = app
            .oneshot(profile_request(Some(&format!("Bearer {}", token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["id"], 42);
        assert_eq!(body["data"]["username"], "jdoe");
        assert!(body["data"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_login_failure_is_generic_bad_request() {
        let mut service = MockTestUserService::new();
        service
            .expect_login()
            .times(1)
            .returning(|_, _| Err(UserError::InvalidCredentials));

        let app = router_with(service);
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/users/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"username":"jdoe","password":"wrong"}"#,
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_message(response).await, "invalid password or username");
    }

    #[tokio::test]
    async fn test_register_returns_created_without_password() {
        let mut service = MockTestUserService::new();
        service
            .expect_register()
            .withf(|command| command.username.as_str() == "jdoe")
            .times(1)
            .returning(|_| Ok(stored_user(1)));

        let app = router_with(service);
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/users/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"name":"John Doe","username":"jdoe","email":"j@x.com","password":"secret1"}"#,
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["id"], 1);
        assert_eq!(body["data"]["username"], "jdoe");
        assert!(body["data"].get("password").is_none());
        assert!(body["data"].get("password_hash").is_none());
    }
}
