use axum::{routing::get, Router};
use crate::handlers::catalog::index;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}
