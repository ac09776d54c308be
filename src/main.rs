//! CalmCompanion — Binary Entrypoint
//! Boots the Axum HTTP server: settings, tip index, shared state, metrics.

use calm_companion::{api, config::Settings, metrics::Metrics};
use shuttle_axum::ShuttleAxum;
use tracing::{info, warn};

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    calm_companion::init_tracing();

    let settings = Settings::load()?;
    info!(app = %settings.app_name, tips = %settings.tips_path.display(), "starting");

    let state = api::AppState::from_settings(settings);
    let mut router = api::create_router(state.clone());

    match Metrics::install(state.tips.len()) {
        Ok(m) => router = router.merge(m.router()),
        Err(e) => warn!(error = %e, "prometheus recorder not installed; /metrics disabled"),
    }

    Ok(router.into())
}
