use std::{env, error::Error, net::SocketAddr, num::NonZeroU64, sync::Arc, time::Duration};

#[macro_use]
extern crate lazy_static;

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::header::CONTENT_TYPE,
    http::Method,
    routing::{get, post},
    BoxError, Router,
};
use clap::{Parser, Subcommand};
use sqlx::PgPool;
use tower::{buffer::BufferLayer, limit::RateLimitLayer, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

use crate::{
    app::{
        env::{Envy, DEFAULT_PORT, DEFAULT_RATE_LIMIT_PER_SECOND},
        errors::DefaultApiError,
        util::db,
    },
    transactions::{
        repository::{PgTransactionsRepository, TransactionsRepository},
        service::TransactionsService,
        task::TransactionsTask,
    },
    users::repository::PgUsersRepository,
};

mod app;
mod transactions;
mod users;

static MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub transactions: Arc<TransactionsService>,
}

#[derive(Parser)]
#[command(name = "ledger-api", about = "Transactions HTTP API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Apply database migrations
    Migrate,
    /// Insert sample users and transactions
    Seed,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // environment
    let app_env = env::var("APP_ENV").unwrap_or("development".to_string());
    let _ = dotenvy::from_filename(format!(".env.{}", app_env));
    let envy = envy::from_env::<Envy>()?;
    tracing::info!(app_env = %envy.app_env, "environment loaded");

    let pool = db::connect(&envy).await?;

    tracing::info!("connected to db");

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(envy, pool).await?,
        Command::Migrate => {
            db::migrate(&pool).await?;
            tracing::info!("migrations applied");
        }
        Command::Seed => {
            seeder(&pool).create_sample_transactions().await?;
        }
    }

    Ok(())
}

fn seeder(pool: &PgPool) -> TransactionsTask {
    TransactionsTask::new(
        Arc::new(PgTransactionsRepository::new(pool.clone())),
        Arc::new(PgUsersRepository::new(pool.clone())),
    )
}

async fn serve(envy: Envy, pool: PgPool) -> Result<(), Box<dyn Error>> {
    if envy.seed_on_start.unwrap_or(false) {
        // fixtures need the schema in place
        db::migrate(&pool).await?;
        seeder(&pool).spawn();
    }

    let repository: Arc<dyn TransactionsRepository> =
        Arc::new(PgTransactionsRepository::new(pool));
    let state = AppState {
        transactions: Arc::new(TransactionsService::new(repository)),
    };

    let rate_limit = envy
        .rate_limit_per_second
        .map(NonZeroU64::get)
        .unwrap_or(DEFAULT_RATE_LIMIT_PER_SECOND);
    let app = router(state, rate_limit);

    let port = envy.port.unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

fn router(state: AppState, rate_limit_per_second: u64) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST]);

    Router::new()
        .route("/", get(app::controller::get_root))
        // transactions
        .route(
            "/transaction",
            post(transactions::controller::create_transaction),
        )
        .route(
            "/transaction/:id",
            get(transactions::controller::get_transaction_by_id),
        )
        .route(
            "/transactions",
            get(transactions::controller::get_transactions),
        )
        // layers
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|err: BoxError| async move {
                    tracing::error!("unhandled middleware error: {}", err);
                    DefaultApiError::InternalServerError.value()
                }))
                .layer(BufferLayer::new(1024))
                .layer(RateLimitLayer::new(
                    rate_limit_per_second,
                    Duration::from_secs(1),
                )),
        )
        .with_state(state)
}
