use axum::{routing::get, Router};
use std::env;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use learnhub::analytics::{FixedRating, RatingSource, DEFAULT_INSTRUCTOR_RATING};
use learnhub::auth::{TokenInfoVerifier, TokenVerifier};
use learnhub::config::Config;
use learnhub::judge::{HttpJudge, JudgeClient, NoJudge};
use learnhub::store::{PgStore, Store};
use learnhub::{api, db, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "learnhub=info,axum=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool = db::connect(&config.database_url).await?;
    // crate-relative path for sqlx migrations
    sqlx::migrate!("./migrations").run(&pool).await?;

    let store: Arc<dyn Store> = Arc::new(PgStore::new(pool));
    let verifier: Arc<dyn TokenVerifier> = Arc::new(TokenInfoVerifier::new(
        config.tokeninfo_url.clone(),
        config.token_audience.clone(),
    ));
    let judge: Arc<dyn JudgeClient> = match &config.judge_url {
        Some(url) => Arc::new(HttpJudge::new(url.clone())),
        None => Arc::new(NoJudge),
    };
    let rating: Arc<dyn RatingSource> = Arc::new(FixedRating(DEFAULT_INSTRUCTOR_RATING));
    let state = Arc::new(AppState::new(store, verifier, judge, rating));

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(api::router(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        );

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
