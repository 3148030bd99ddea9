use std::time::Instant;

use axum::Router;
use blog_db::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub started_at: Instant,
    pub password_pepper: String,
}

pub fn build_router(state: AppState) -> Router {
    crate::http::routes::router().with_state(state)
}
