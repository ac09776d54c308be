use anyhow::Result;
use axum::{routing::get, Router};
use ::metrics::gauge;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder and publish static gauges.
    pub fn install(tip_sections: usize) -> Result<Self> {
        let handle = PrometheusBuilder::new().install_recorder()?;
        gauge!("calm_tip_sections").set(tip_sections as f64);
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
