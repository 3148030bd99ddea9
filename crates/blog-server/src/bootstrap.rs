use std::net::SocketAddr;
use std::time::Instant;

use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::app::{self, AppState};
use crate::domains::seed::stores::{PgRoleStore, PgSchemaManager, PgUserStore};
use crate::domains::seed::DatabaseSeeder;
use crate::runtime;
use crate::settings;
use blog_db::{connect_postgres_with_max, PgPool};

pub fn log_startup(settings: &settings::Settings) {
    if settings.password_pepper.is_empty() {
        tracing::warn!(
            event = "password_pepper_empty",
            "BLOG_PASSWORD_PEPPER not set; password hashes carry no pepper"
        );
    }
    tracing::info!(
        event = "server_startup",
        addr = %settings.addr,
        db_pool_max = settings.db_pool_max,
        "Server configuration loaded"
    );
}

pub async fn connect_db(settings: &settings::Settings) -> Result<PgPool, sqlx_core::Error> {
    connect_postgres_with_max(&settings.db_url, settings.db_pool_max).await
}

pub fn build_state(settings: &settings::Settings, db: PgPool) -> AppState {
    AppState {
        db,
        started_at: Instant::now(),
        password_pepper: settings.password_pepper.clone(),
    }
}

pub fn pg_seeder(state: &AppState) -> DatabaseSeeder<PgSchemaManager, PgRoleStore, PgUserStore> {
    DatabaseSeeder::new(
        PgSchemaManager::new(state.db.clone()),
        PgRoleStore::new(state.db.clone()),
        PgUserStore::new(state.db.clone(), state.password_pepper.clone()),
    )
}

pub fn start_background_tasks(state: &AppState) {
    // One-shot seed. The task is detached: a shutdown request does not
    // interrupt it once started.
    let seeder = pg_seeder(state);
    tokio::spawn(async move {
        seeder.run().await;
    });
}

pub fn build_app(state: AppState) -> Router {
    let request_id_header = axum::http::HeaderName::from_static("x-request-id");
    app::build_router(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("unknown");
                let matched = request
                    .extensions()
                    .get::<axum::extract::MatchedPath>()
                    .map(axum::extract::MatchedPath::as_str)
                    .unwrap_or("unmatched");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %matched,
                    request_id = %request_id
                )
            }),
        )
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(CatchPanicLayer::custom(|err| {
            tracing::error!(event = "panic_recovered", error = ?err, "handler panicked");
            match axum::response::Response::builder()
                .status(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
                .body(axum::body::Body::empty())
            {
                Ok(response) => response,
                Err(err) => {
                    tracing::error!(event = "panic_response_failed", error = %err);
                    axum::response::Response::new(axum::body::Body::empty())
                }
            }
        }))
}

pub async fn serve(settings: &settings::Settings, app: Router) {
    let addr: SocketAddr = settings.addr;
    tracing::info!(%addr, "listening");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(event = "server_bind_failed", error = %err);
            return;
        }
    };
    if let Err(err) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(runtime::shutdown_signal())
    .await
    {
        tracing::error!(event = "server_failed", error = %err);
    }
}
