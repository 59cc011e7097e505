use axum::{extract::State, Form};
use axum::http::header::SET_COOKIE;
use axum::response::{Html, IntoResponse, Redirect};
use bcrypt::verify;
use tracing::{info, instrument, warn};
use crate::auth::jwt::sign_token;
use crate::auth::session::{clear_session_cookie, session_cookie};
use crate::dtos::auth::LoginForm;
use crate::error::AppError;
use crate::state::AppState;
use crate::store;

const LOGIN_PAGE: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Admin login</title></head>
<body>
<form method="post" action="/login">
  <label>Username <input name="username" required></label>
  <label>Password <input name="password" type="password" required></label>
  <button type="submit">Log in</button>
</form>
</body>
</html>
"#;

// GET /login
pub async fn login_page() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

// POST /login - verify credentials and start an admin session
#[instrument(skip(state, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, AppError> {
    if form.username.trim().is_empty() || form.password.is_empty() {
        return Err(AppError::unauthorized("Invalid credentials"));
    }

    let admin = store::admins::find_by_username(&state.db_pool, form.username.trim()).await?;
    let Some(admin) = admin else {
        warn!("Login attempt for unknown admin");
        return Err(AppError::unauthorized("Invalid credentials"));
    };

    let ok = verify(&form.password, &admin.password_hash)
        .map_err(|e| AppError::internal(format!("Password verify error: {e}")))?;
    if !ok {
        warn!("Login attempt with wrong password");
        return Err(AppError::unauthorized("Invalid credentials"));
    }

    let ttl = state.config.session_ttl_hours;
    let token = sign_token(admin.id, &admin.username, &state.config.jwt_secret, ttl)?;
    info!("Admin logged in");

    let cookie = session_cookie(&token, ttl, state.config.secure_cookies);
    Ok(([(SET_COOKIE, cookie)], Redirect::to("/admin")))
}

// GET /logout
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    ([(SET_COOKIE, clear_session_cookie(state.config.secure_cookies))], Redirect::to("/"))
}
