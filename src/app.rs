use axum::{
    middleware,
    routing::{any, delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{protected, public, system};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Full route table with global middleware applied.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(auth_public_routes())
        // Protected
        .merge(protected_routes(state.clone()))
        // Global middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/v1/register", post(auth::register_post))
        .route("/v1/login", post(auth::login_post))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use protected::{notes, user};

    Router::new()
        // One resource; `NoteAction` picks the operation and rejects other methods
        .route("/v1/note", any(notes::note_action))
        .route("/v1/allnotes", get(notes::all_notes_get))
        .route("/v1/deleteuser", delete(user::delete_user))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}
