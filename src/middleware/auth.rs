use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use chrono::{DateTime, Utc};
use crate::auth::jwt::verify_token;
use crate::auth::session::token_from_headers;
use crate::state::AppState;

/// Signed-in admin, attached to every request that passes `require_admin`.
#[derive(Clone, Debug)]
pub struct AdminContext {
    pub admin_id: i64,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

/// Lets the request through only with a valid, unexpired session token.
/// Anything else is sent to the login page without further detail.
pub async fn require_admin(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(token) = token_from_headers(req.headers()) else {
        return to_login();
    };

    let claims = match verify_token(&token, &state.config.jwt_secret) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!(error = ?e, "Rejected admin session");
            return to_login();
        }
    };

    // Attach context
    req.extensions_mut().insert(AdminContext {
        admin_id: claims.sub,
        username: claims.username,
        expires_at: DateTime::from_timestamp(claims.exp as i64, 0).unwrap_or_else(Utc::now),
    });

    next.run(req).await
}

fn to_login() -> Response {
    Redirect::to("/login").into_response()
}
