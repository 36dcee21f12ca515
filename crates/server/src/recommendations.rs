//! Education activity recommendations and peer play-group suggestions.

use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use chrono::{NaiveDate, Utc};
use nestling_core::config::AppConfig;
use nestling_core::errors::DomainError;
use nestling_core::grouping::{self, ChildRecord, GroupingParams, PeerMatch, PlayGroup};
use nestling_core::recommend::{
    activity_details, ActivityDetails, Ranker, Recommendation, RecommendationRequest,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::{correlation_id, ApiError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecommendationSettings {
    pub max_results: usize,
    pub grouping: GroupingParams,
}

impl From<&AppConfig> for RecommendationSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_results: config.recommendations.max_results,
            grouping: config.grouping.params(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RankedActivity {
    #[serde(flatten)]
    pub recommendation: Recommendation<'static>,
    pub details: ActivityDetails,
}

#[derive(Debug, Serialize)]
pub struct EducationResponse {
    pub success: bool,
    /// `None` when no birth date was supplied.
    pub age: Option<u32>,
    pub recommendations: Vec<RankedActivity>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRequest {
    pub target: Option<ChildRecord>,
    #[serde(default)]
    pub roster: Vec<ChildRecord>,
    pub k: Option<usize>,
    #[serde(alias = "min_group_size")]
    pub min_group_size: Option<usize>,
    #[serde(alias = "max_group_size")]
    pub max_group_size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct GroupResponse {
    pub success: bool,
    pub peers: Vec<PeerMatch>,
    pub groups: Vec<PlayGroup>,
}

pub fn router(settings: RecommendationSettings) -> Router {
    Router::new()
        .route("/api/recommendations/education", post(education))
        .route("/api/recommendations/groups", post(groups))
        .with_state(settings)
}

pub async fn education(
    State(settings): State<RecommendationSettings>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Result<Json<EducationResponse>, ApiError> {
    let correlation_id = correlation_id();
    let Json(request) =
        payload.map_err(|rejection| ApiError::rejected(rejection, &correlation_id))?;

    let response = rank_activities(&request, settings.max_results, Utc::now().date_naive());
    info!(
        event_name = "recommendation.education.ranked",
        correlation_id = %correlation_id,
        age = ?response.age,
        returned = response.recommendations.len(),
        "education activities ranked"
    );

    Ok(Json(response))
}

fn rank_activities(
    request: &RecommendationRequest,
    max_results: usize,
    today: NaiveDate,
) -> EducationResponse {
    let ranked = Ranker::default().with_limit(max_results).rank(request, today);
    let age = ranked.age();
    let recommendations = ranked
        .map(|recommendation| RankedActivity {
            details: activity_details(recommendation.item.key),
            recommendation,
        })
        .collect();

    EducationResponse { success: true, age, recommendations }
}

pub async fn groups(
    State(settings): State<RecommendationSettings>,
    payload: Result<Json<GroupRequest>, JsonRejection>,
) -> Result<Json<GroupResponse>, ApiError> {
    let correlation_id = correlation_id();
    let Json(request) =
        payload.map_err(|rejection| ApiError::rejected(rejection, &correlation_id))?;

    let Some(target) = request.target else {
        return Err(ApiError::domain(DomainError::missing(&["target"]), &correlation_id));
    };
    let params = GroupingParams {
        k: request.k.unwrap_or(settings.grouping.k),
        min_group_size: request.min_group_size.unwrap_or(settings.grouping.min_group_size),
        max_group_size: request.max_group_size.unwrap_or(settings.grouping.max_group_size),
    };

    let (peers, groups) = grouping::group_for(&target, &request.roster, params)
        .map_err(|err| ApiError::domain(err, &correlation_id))?;
    info!(
        event_name = "recommendation.groups.formed",
        correlation_id = %correlation_id,
        target_id = %target.id,
        roster_size = request.roster.len(),
        peers = peers.len(),
        groups = groups.len(),
        "peer groups formed"
    );

    Ok(Json(GroupResponse { success: true, peers, groups }))
}
