use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    AppState,
    middleware::{json_content_type, log_errors},
    routes,
};

// 用户相关的路由
pub fn user_routes() -> Router<AppState> {
    Router::new().route(
        "/users",
        get(routes::user::list_users).post(routes::user::create_user),
    )
}

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    user_routes()
        .layer(axum::middleware::from_fn(log_errors))
        .layer(axum::middleware::from_fn(json_content_type))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
