use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use nestling_core::recommend::{CatalogItem, CATALOG};
use serde::Serialize;

#[derive(Clone, Debug)]
pub struct HealthState {
    pub version: &'static str,
}

impl Default for HealthState {
    fn default() -> Self {
        Self { version: env!("CARGO_PKG_VERSION") }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: HealthCheck,
    pub catalog: HealthCheck,
    pub checked_at: String,
}

pub fn router(state: HealthState) -> Router {
    Router::new().route("/health", get(health)).with_state(state)
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let catalog = catalog_check(&CATALOG);
    let ready = catalog.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        version: state.version,
        service: HealthCheck {
            status: "ready",
            detail: "nestling-server runtime initialized".to_string(),
        },
        catalog,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

fn catalog_check(catalog: &[CatalogItem]) -> HealthCheck {
    if catalog.is_empty() {
        HealthCheck { status: "degraded", detail: "activity catalog is empty".to_string() }
    } else {
        HealthCheck {
            status: "ready",
            detail: format!("{} catalog activities loaded", catalog.len()),
        }
    }
}
