// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod analytics;
pub mod api;
pub mod config;
pub mod cues;
pub mod engine;
pub mod metrics;
pub mod reply;
pub mod risk;
pub mod rolling;
pub mod sentiment;
pub mod session;
pub mod tips;
pub mod triggers;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::risk::{score_turn, RiskAssessment};
pub use crate::rolling::{summarize_window, WindowSummary};
pub use crate::sentiment::{analyze, SentimentLabel, SentimentResult};
pub use crate::tips::{TipIndex, TipMatch};
pub use crate::triggers::{classify, Trigger, TriggerSet};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is unset; one directive per log target.
pub const DEFAULT_LOG_FILTER: &str = "risk=info,tips=info,api=info,analytics=info,warn";

/// Install the tracing subscriber. Compact by default, JSON when
/// `CALM_LOG_JSON=1`. Safe to call more than once.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = std::env::var("CALM_LOG_JSON").ok().as_deref() == Some("1");

    let registry = tracing_subscriber::registry().with(filter);
    let _ = if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().compact()).try_init()
    };
}
