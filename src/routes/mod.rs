pub mod admin;
pub mod auth;
pub mod catalog;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(catalog::routes())
        .merge(auth::routes())
        .merge(admin::routes(state.clone()))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use crate::config::Config;
    use crate::database::test_pool;
    use crate::models::product::NewProduct;
    use crate::store;

    async fn test_app() -> (Router, AppState) {
        let pool = test_pool().await;
        store::admins::ensure_default_admin(&pool, "admin", "admin123").await.unwrap();
        let state = AppState::new(pool, Config::for_tests());
        (create_router(state.clone()), state)
    }

    async fn seed(state: &AppState, barcode: &str, name: &str, price: f64, discount_price: Option<f64>) {
        store::products::create(
            &state.db_pool,
            &NewProduct {
                barcode: barcode.to_string(),
                name: name.to_string(),
                price,
                discount_price,
            },
        )
        .await
        .unwrap();
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn login_request(username: &str, password: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("username={username}&password={password}")))
            .unwrap()
    }

    fn with_session(method: &str, uri: &str, cookie: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, cookie);
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    /// Logs in as the default admin and returns the `name=value` cookie pair.
    async fn login_cookie(app: &Router) -> String {
        let response = app.clone().oneshot(login_request("admin", "admin123")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/admin");
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = test_app().await;
        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_listing_filters() {
        let (app, state) = test_app().await;
        seed(&state, "A", "Milk 1L", 50.0, None).await;
        seed(&state, "B", "Bread", 40.0, None).await;
        seed(&state, "C", "Juice", 100.0, Some(80.0)).await;
        seed(&state, "E", "Soda", 50.0, Some(60.0)).await;

        let all = body_json(app.clone().oneshot(get("/")).await.unwrap()).await;
        assert_eq!(all["products"].as_array().unwrap().len(), 4);
        assert_eq!(all["search"], "");

        let milk = body_json(app.clone().oneshot(get("/?search=%20milk%20")).await.unwrap()).await;
        let products = milk["products"].as_array().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0]["barcode"], "A");
        assert_eq!(milk["search"], "milk");

        let sale = body_json(app.oneshot(get("/?akcija=1")).await.unwrap()).await;
        let products = sale["products"].as_array().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0]["barcode"], "C");
        assert_eq!(products[0]["on_sale"], true);
        assert_eq!(sale["akcija"], "1");
    }

    #[tokio::test]
    async fn test_admin_requires_session() {
        let (app, _) = test_app().await;
        for uri in ["/admin", "/admin/products", "/admin/products/1"] {
            let response = app.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
            assert_eq!(response.headers()[header::LOCATION], "/login");
        }

        let forged = with_session("GET", "/admin", "admin_session=not-a-token", None);
        let response = app.oneshot(forged).await.unwrap();
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn test_expired_session_redirects() {
        let (app, state) = test_app().await;
        let token = crate::auth::jwt::sign_token(1, "admin", &state.config.jwt_secret, -2).unwrap();
        let request = with_session("GET", "/admin", &format!("admin_session={token}"), None);
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let (app, _) = test_app().await;
        let response = app.clone().oneshot(login_request("admin", "wrong")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(body_json(response).await["error"], "Invalid credentials");

        let response = app.oneshot(login_request("nobody", "admin123")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_grants_admin_access() {
        let (app, _) = test_app().await;
        let cookie = login_cookie(&app).await;

        let response = app.oneshot(with_session("GET", "/admin", &cookie, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["admin"], "admin");
    }

    #[tokio::test]
    async fn test_secure_cookie_when_configured() {
        let pool = test_pool().await;
        store::admins::ensure_default_admin(&pool, "admin", "admin123").await.unwrap();
        let config = Config {
            secure_cookies: true,
            ..Config::for_tests()
        };
        let app = create_router(AppState::new(pool, config));

        let response = app.oneshot(login_request("admin", "admin123")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.ends_with("; Secure"));
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (app, _) = test_app().await;
        let response = app.oneshot(get("/logout")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.starts_with("admin_session=;"));
        assert!(set_cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_admin_product_crud() {
        let (app, _) = test_app().await;
        let cookie = login_cookie(&app).await;

        let created = app
            .clone()
            .oneshot(with_session(
                "POST",
                "/admin/products",
                &cookie,
                Some(json!({"barcode": "100", "name": "Cheese", "price": 300.0, "discount_price": null})),
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let id = body_json(created).await["id"].as_i64().unwrap();

        let duplicate = app
            .clone()
            .oneshot(with_session(
                "POST",
                "/admin/products",
                &cookie,
                Some(json!({"barcode": "100", "name": "Other", "price": 1.0})),
            ))
            .await
            .unwrap();
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);

        let invalid = app
            .clone()
            .oneshot(with_session(
                "POST",
                "/admin/products",
                &cookie,
                Some(json!({"barcode": "101", "name": "Free", "price": 0.0})),
            ))
            .await
            .unwrap();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let updated = app
            .clone()
            .oneshot(with_session(
                "PUT",
                &format!("/admin/products/{id}"),
                &cookie,
                Some(json!({"barcode": "100", "name": "Cheese", "price": 300.0, "discount_price": 250.0})),
            ))
            .await
            .unwrap();
        assert_eq!(updated.status(), StatusCode::OK);
        let body = body_json(updated).await;
        assert_eq!(body["discount_price"], 250.0);
        assert_eq!(body["on_sale"], true);

        let fetched = app
            .clone()
            .oneshot(with_session("GET", &format!("/admin/products/{id}"), &cookie, None))
            .await
            .unwrap();
        assert_eq!(body_json(fetched).await["discount_price"], 250.0);

        let deleted = app
            .clone()
            .oneshot(with_session("DELETE", &format!("/admin/products/{id}"), &cookie, None))
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let missing = app
            .oneshot(with_session("DELETE", &format!("/admin/products/{id}"), &cookie, None))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
