/*
 * Responsibility
 * - Load Config → build dependencies → assemble the Router
 * - Apply middleware (CORS / request tracing / bearer auth)
 * - Start serving via axum::serve()
 */
use anyhow::Result;
use axum::Router;
use tracing_subscriber::EnvFilter;

use crate::{api, config::Config, middleware, services, state::AppState};

pub async fn run() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    let auth = services::auth::build_auth_service(&config)?;
    let state = AppState::new(auth);

    let app = build_router(state);
    let app = middleware::cors::apply(app, &config);
    let app = middleware::http::apply(app);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::services::auth::testing::{TestAuthority, TestClaims};

    const HELLO_SCOPE: &str = "https://localhost:5001/access_as_user";

    fn test_router(authority: &TestAuthority) -> Router {
        build_router(AppState::new(Arc::new(authority.service().clone())))
    }

    fn get(uri: &str, bearer: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_string(resp: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn health_is_public() {
        let authority = TestAuthority::new();
        let resp = test_router(&authority)
            .oneshot(get("/api/v1/health", None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn hello_without_token_is_401_with_empty_body() {
        let authority = TestAuthority::new();
        let resp = test_router(&authority)
            .oneshot(get("/api/v1/hello", None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_string(resp).await, "");
    }

    #[tokio::test]
    async fn hello_with_garbage_token_is_401() {
        let authority = TestAuthority::new();
        let resp = test_router(&authority)
            .oneshot(get("/api/v1/hello", Some("not-a-jwt")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn hello_with_accepted_scope_succeeds() {
        let authority = TestAuthority::new();
        let token = authority.issue(
            TestClaims::valid(Uuid::new_v4()).with_scope(&format!("openid {HELLO_SCOPE}")),
        );

        let resp = test_router(&authority)
            .oneshot(get("/api/v1/hello", Some(&token)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "Hello World!");
    }

    #[tokio::test]
    async fn hello_with_wrong_scope_is_403_with_contract_body() {
        let authority = TestAuthority::new();
        let token = authority.issue(TestClaims::valid(Uuid::new_v4()).with_scope("read"));

        let resp = test_router(&authority)
            .oneshot(get("/api/v1/hello", Some(&token)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_string(resp).await,
            format!(
                "Auth error: The 'scope' claim does not contain scopes '{HELLO_SCOPE}' or was not found."
            )
        );
    }

    #[tokio::test]
    async fn hello_without_scope_claim_is_403() {
        let authority = TestAuthority::new();
        let token = authority.issue(TestClaims::valid(Uuid::new_v4()));

        let resp = test_router(&authority)
            .oneshot(get("/api/v1/hello", Some(&token)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert!(body_string(resp).await.contains(HELLO_SCOPE));
    }

    #[tokio::test]
    async fn hello_with_expired_token_is_401() {
        let authority = TestAuthority::new();
        let token =
            authority.issue(TestClaims::expired(Uuid::new_v4()).with_scope(HELLO_SCOPE));

        let resp = test_router(&authority)
            .oneshot(get("/api/v1/hello", Some(&token)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
