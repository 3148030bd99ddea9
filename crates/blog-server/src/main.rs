#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]
#![deny(clippy::unwrap_used)]

use blog_server::{bootstrap, cli, runtime, settings};

#[tokio::main]
async fn main() {
    let run_mode = cli::parse_args();
    let settings = settings::Settings::from_env();
    runtime::init_tracing();
    bootstrap::log_startup(&settings);

    let db = match bootstrap::connect_db(&settings).await {
        Ok(db) => db,
        Err(err) => {
            tracing::error!(event = "db_connect_failed", error = %err);
            std::process::exit(1);
        }
    };

    match run_mode {
        cli::RunMode::Migrate => {
            if let Err(err) = blog_db::migrate(&db).await {
                tracing::error!(error = %err, "migration failed");
                std::process::exit(1);
            }
            tracing::info!("migrations applied");
        }
        cli::RunMode::Seed => {
            let state = bootstrap::build_state(&settings, db);
            match bootstrap::pg_seeder(&state).run().await {
                blog_server::seed::SeedOutcome::Completed(report) => {
                    match serde_json::to_string_pretty(&report) {
                        Ok(json) => println!("{json}"),
                        Err(err) => tracing::error!(event = "seed_output_failed", error = %err),
                    }
                }
                blog_server::seed::SeedOutcome::Failed(reason) => {
                    eprintln!("seed failed: {reason}");
                    std::process::exit(1);
                }
            }
        }
        cli::RunMode::Server => {
            let state = bootstrap::build_state(&settings, db);
            bootstrap::start_background_tasks(&state);
            let app = bootstrap::build_app(state);
            bootstrap::serve(&settings, app).await;
        }
    }
}
