use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use stockroom_core::health::healthz;
use stockroom_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    account::{
        check_admin, create_account, delete_account, get_account, get_me, list_accounts,
        update_account, update_me,
    },
    health::readyz,
    movement::{list_movements, record_movement},
    product::{
        create_product, delete_product, get_product, list_categories, list_locations,
        list_products, update_product,
    },
    session::{login, logout},
};
use crate::middleware::require_session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Session
        .route("/session", post(login).delete(logout))
        // Reference data
        .route("/locations", get(list_locations));

    let protected = Router::new()
        // Own account
        .route("/users/me", get(get_me).put(update_me))
        .route("/users/me/admin", get(check_admin))
        // Account administration
        .route("/users", get(list_accounts).post(create_account))
        .route(
            "/users/{id}",
            get(get_account).put(update_account).delete(delete_account),
        )
        // Products
        .route("/products", get(list_products).post(create_product))
        .route("/products/categories", get(list_categories))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        // Movements
        .route("/movements", get(list_movements).post(record_movement))
        .route_layer(middleware::from_fn_with_state(
            state.sessions.clone(),
            require_session,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .with_state(state)
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
}
