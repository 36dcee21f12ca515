//! Purchase-intent and demand-level prediction endpoints.

use axum::{
    extract::rejection::JsonRejection,
    routing::{get, post},
    Json, Router,
};
use nestling_core::demand::{self, DemandInput, DemandLevel, DemandRequest};
use nestling_core::jitter::ThreadJitter;
use nestling_core::purchase::{self, PurchaseInput, PurchaseRequest, PurchaseVerdict};
use nestling_core::scoring::ModelCard;
use nestling_core::Explanation;
use serde::Serialize;
use tracing::info;

use crate::api::{correlation_id, ApiError};

#[derive(Debug, Serialize)]
pub struct PurchasePrediction {
    pub success: bool,
    pub prediction: PurchaseVerdict,
    pub probability: f64,
    pub confidence: f64,
    pub explanation: Explanation,
    pub factors: PurchaseInput,
}

#[derive(Debug, Serialize)]
pub struct DemandPrediction {
    pub success: bool,
    pub prediction: DemandLevel,
    pub demand_category: DemandLevel,
    pub score: f64,
    pub confidence: f64,
    pub explanation: Explanation,
    pub factors: DemandInput,
}

#[derive(Debug, Serialize)]
pub struct ModelStats {
    pub success: bool,
    #[serde(flatten)]
    pub card: ModelCard,
}

pub fn router() -> Router {
    Router::new()
        .route("/api/purchase-prediction/predict", post(predict_purchase))
        .route("/api/purchase-prediction/stats", get(purchase_stats))
        .route("/api/demand-prediction/predict", post(predict_demand))
        .route("/api/demand-prediction/stats", get(demand_stats))
}

pub async fn predict_purchase(
    payload: Result<Json<PurchaseRequest>, JsonRejection>,
) -> Result<Json<PurchasePrediction>, ApiError> {
    let correlation_id = correlation_id();
    let Json(request) =
        payload.map_err(|rejection| ApiError::rejected(rejection, &correlation_id))?;
    let input =
        PurchaseInput::try_from(request).map_err(|err| ApiError::domain(err, &correlation_id))?;

    let result = purchase::predict_purchase(&input, &mut ThreadJitter);
    info!(
        event_name = "prediction.purchase.scored",
        correlation_id = %correlation_id,
        category = %input.category,
        verdict = %result.label,
        probability = result.score,
        "purchase intent scored"
    );

    Ok(Json(PurchasePrediction {
        success: true,
        prediction: result.label,
        probability: result.score,
        confidence: result.confidence,
        explanation: result.explanation,
        factors: input,
    }))
}

pub async fn predict_demand(
    payload: Result<Json<DemandRequest>, JsonRejection>,
) -> Result<Json<DemandPrediction>, ApiError> {
    let correlation_id = correlation_id();
    let Json(request) =
        payload.map_err(|rejection| ApiError::rejected(rejection, &correlation_id))?;
    let input =
        DemandInput::try_from(request).map_err(|err| ApiError::domain(err, &correlation_id))?;

    let result = demand::predict_demand(&input, &mut ThreadJitter);
    info!(
        event_name = "prediction.demand.scored",
        correlation_id = %correlation_id,
        product_type = %input.product_type,
        level = %result.label,
        score = result.score,
        "demand level scored"
    );

    Ok(Json(DemandPrediction {
        success: true,
        prediction: result.label,
        demand_category: result.label,
        score: result.score,
        confidence: result.confidence,
        explanation: result.explanation,
        factors: input,
    }))
}

pub async fn purchase_stats() -> Json<ModelStats> {
    Json(ModelStats { success: true, card: purchase::model_card() })
}

pub async fn demand_stats() -> Json<ModelStats> {
    Json(ModelStats { success: true, card: demand::model_card() })
}

#[cfg(test)]
mod tests {
    use axum::Json;
    use nestling_core::demand::{DemandLevel, DemandRequest};
    use nestling_core::purchase::{PurchaseRequest, PurchaseVerdict};
    use nestling_core::scoring::Numeric;

    use super::{demand_stats, predict_demand, predict_purchase, purchase_stats};

    #[tokio::test]
    async fn purchase_prediction_echoes_factors() {
        let request = PurchaseRequest {
            category: Some("Diaper".to_string()),
            price: Some(Numeric::from(150.0)),
            discount: Some(Numeric::Text("20".to_string())),
            customer_type: Some("Parent".to_string()),
        };

        let Json(response) =
            predict_purchase(Ok(Json(request))).await.expect("valid request should score");

        assert!(response.success);
        assert_eq!(response.prediction, PurchaseVerdict::Yes);
        assert!((response.probability - 1.35).abs() < 1e-9);
        assert!((0.75..=0.90).contains(&response.confidence));
        assert_eq!(response.factors.discount, 20.0);
    }

    #[tokio::test]
    async fn purchase_prediction_rejects_missing_fields() {
        let request = PurchaseRequest { category: Some("Toy".to_string()), ..Default::default() };

        let error = predict_purchase(Ok(Json(request))).await.expect_err("missing price");

        assert_eq!(error.0.public_message(), "Missing required fields: price, discount");
    }

    #[tokio::test]
    async fn demand_prediction_reports_category_twice() {
        let request = DemandRequest {
            product_type: Some("Diaper".to_string()),
            previous_sales: Some(Numeric::from(50.0)),
            delivery_time: Some(Numeric::from(1.0)),
            price: Some(Numeric::from(200.0)),
        };

        let Json(response) =
            predict_demand(Ok(Json(request))).await.expect("valid request should score");

        assert_eq!(response.prediction, DemandLevel::High);
        assert_eq!(response.demand_category, DemandLevel::High);
        assert_eq!(response.score, 10.0);
    }

    #[tokio::test]
    async fn stats_publish_model_cards() {
        let Json(purchase) = purchase_stats().await;
        let Json(demand) = demand_stats().await;

        assert!(purchase.success);
        assert!(purchase.card.model.contains("SVM"));
        assert!(purchase.card.kernel.is_some());
        assert!(demand.card.model.contains("BPNN"));
        assert!(demand.card.kernel.is_none());
    }
}
