use axum::Router;

use crate::app::AppState;

pub(crate) mod health;

pub fn router() -> Router<AppState> {
    Router::new().merge(health::router())
}
