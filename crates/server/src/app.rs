use axum::Router;
use nestling_core::config::AppConfig;
use tower_http::catch_panic::CatchPanicLayer;

use crate::api;
use crate::health::{self, HealthState};
use crate::predictions;
use crate::recommendations::{self, RecommendationSettings};

pub fn router(config: &AppConfig) -> Router {
    guarded(
        Router::new()
            .merge(health::router(HealthState::default()))
            .merge(predictions::router())
            .merge(recommendations::router(RecommendationSettings::from(config))),
    )
}

fn guarded(router: Router) -> Router {
    router.layer(CatchPanicLayer::custom(api::panic_response))
}
