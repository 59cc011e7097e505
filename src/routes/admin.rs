use axum::{middleware, routing::get, Router};
use crate::handlers::admin::{
    create_product, dashboard, delete_product, get_product, list_products, update_product,
};
use crate::middleware::auth::require_admin;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin", get(dashboard))
        .route("/admin/products", get(list_products).post(create_product))
        .route("/admin/products/{id}", get(get_product).put(update_product).delete(delete_product))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}
