use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use moodflix_api::{
    config::Config,
    routes::{create_router, AppState},
    services::{Catalog, CategoryTable, Recommender},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("moodflix_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Catalogs are loaded once; a failure here aborts startup
    let primary = Catalog::load(&config.movies_path)
        .with_context(|| format!("loading movie catalog {}", config.movies_path))?;
    let top_rated = Catalog::load(&config.top_rated_path)
        .with_context(|| format!("loading top-rated catalog {}", config.top_rated_path))?;
    let categories = match &config.categories_path {
        Some(path) => CategoryTable::load(path),
        None => CategoryTable::builtin(),
    }
    .context("loading category table")?;

    let recommender =
        Recommender::new(primary, top_rated, categories).with_candidate_cap(config.candidate_cap);

    tracing::info!(
        movies = recommender.primary().len(),
        top_rated = recommender.top_rated().len(),
        candidate_cap = config.candidate_cap,
        seeded = config.rng_seed.is_some(),
        "Recommender ready"
    );

    let state = Arc::new(AppState::new(
        recommender,
        config.recommendation_count,
        config.rng_seed,
    ));
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!(addr = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
