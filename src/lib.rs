pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod store;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, patch, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let protected = account_routes().route_layer(axum::middleware::from_fn_with_state(
        state.clone(),
        jwt_auth_middleware,
    ));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        .merge(protected)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    use handlers::public;

    Router::new()
        .route("/register", post(public::auth::register))
        .route("/login", post(public::auth::login))
        .route("/destinations", get(public::destinations::list))
}

fn account_routes() -> Router<AppState> {
    use handlers::protected::{account, comments, destinations, follows, likes, posts, trips};

    Router::new()
        // Account
        .route(
            "/account",
            get(account::get_account)
                .patch(account::patch_account)
                .delete(account::delete_account),
        )
        .route("/account/users", get(account::get_account_users))
        // Follows
        .route(
            "/account/users/:id/follows",
            post(follows::create).delete(follows::delete),
        )
        .route("/account/follows", get(follows::list_follows))
        .route("/account/following", get(follows::list_following))
        .route("/account/followedBy", get(follows::list_followed_by))
        // Trips
        .route("/account/trips", get(trips::list).post(trips::create))
        .route(
            "/account/trips/:id",
            put(trips::update).delete(trips::delete),
        )
        // Posts
        .route("/account/posts", get(posts::list).post(posts::create))
        .route(
            "/account/posts/:id",
            patch(posts::update).delete(posts::delete),
        )
        // Comments
        .route("/account/posts/:id/comments", post(comments::create))
        .route("/account/comments", get(comments::list_mine))
        .route(
            "/account/posts/:id/comments/:comment_id",
            patch(comments::update).delete(comments::delete),
        )
        // Likes
        .route("/account/posts/:id/likes", post(likes::toggle))
        .route("/account/likes", get(likes::list_mine))
        .route(
            "/account/posts/:id/likes/:like_id",
            delete(likes::delete),
        )
        // Destinations (admin-intent, see DESIGN.md)
        .route("/account/destinations", post(destinations::create))
        .route(
            "/account/destinations/:id",
            patch(destinations::update).delete(destinations::delete),
        )
        .route(
            "/account/destinations/:id/posts",
            get(destinations::list_posts),
        )
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Wayfare API",
            "version": version,
            "description": "Social travel-sharing REST API",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/register, /login (public - token acquisition)",
                "destinations": "/destinations (public)",
                "account": "/account (protected - profile, follows, trips, posts, comments, likes)",
                "admin": "/account/destinations (protected, admin-intent)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match database::health_check(&state.db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
