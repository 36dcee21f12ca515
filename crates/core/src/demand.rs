//! Demand-level scorer.
//!
//! Buckets expected demand for a product into Low/Medium/High from last
//! month's sales, delivery time in days, price and product type. Each factor
//! contributes a tiered number of points; the total is thresholded.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::explanation::{assemble, Explanation, FragmentRule, Layout};
use crate::jitter::{ConfidenceBand, JitterSource};
use crate::scoring::{missing_fields, present_text, ModelCard, Numeric, ScoreResult};
use crate::taxonomy::ProductCategory;

pub const CONFIDENCE: ConfidenceBand = ConfidenceBand::new(0.75, 0.20);
pub const HIGH_THRESHOLD: f64 = 7.0;
pub const MEDIUM_THRESHOLD: f64 = 4.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum DemandLevel {
    Low,
    Medium,
    High,
}

impl DemandLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_THRESHOLD {
            Self::High
        } else if score >= MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for DemandLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DemandRequest {
    #[serde(alias = "productType")]
    pub product_type: Option<String>,
    #[serde(alias = "previousSales")]
    pub previous_sales: Option<Numeric>,
    #[serde(alias = "deliveryTime")]
    pub delivery_time: Option<Numeric>,
    pub price: Option<Numeric>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DemandInput {
    pub product_type: ProductCategory,
    /// Units sold last month.
    pub previous_sales: f64,
    /// Days.
    pub delivery_time: f64,
    pub price: f64,
}

impl TryFrom<DemandRequest> for DemandInput {
    type Error = DomainError;

    fn try_from(request: DemandRequest) -> Result<Self, Self::Error> {
        let product_type = present_text(&request.product_type);

        match (product_type, &request.previous_sales, &request.delivery_time, &request.price) {
            (Some(product_type), Some(sales), Some(delivery), Some(price)) => Ok(Self {
                product_type: ProductCategory::parse(product_type),
                previous_sales: sales.to_f64("previous_sales")?,
                delivery_time: delivery.to_f64("delivery_time")?,
                price: price.to_f64("price")?,
            }),
            (product_type, sales, delivery, price) => Err(missing_fields(&[
                ("product_type", product_type.is_some()),
                ("previous_sales", sales.is_some()),
                ("delivery_time", delivery.is_some()),
                ("price", price.is_some()),
            ])),
        }
    }
}

pub fn sales_points(previous_sales: f64) -> f64 {
    if previous_sales >= 50.0 {
        4.0
    } else if previous_sales >= 35.0 {
        3.0
    } else if previous_sales >= 20.0 {
        2.0
    } else if previous_sales >= 10.0 {
        1.0
    } else {
        0.0
    }
}

pub fn delivery_points(delivery_days: f64) -> f64 {
    if delivery_days <= 1.0 {
        3.0
    } else if delivery_days <= 2.0 {
        2.5
    } else if delivery_days <= 3.0 {
        2.0
    } else if delivery_days <= 4.0 {
        1.0
    } else {
        0.5
    }
}

pub fn price_points(price: f64) -> f64 {
    if price <= 200.0 {
        2.0
    } else if price <= 400.0 {
        1.5
    } else if price <= 600.0 {
        1.0
    } else if price <= 800.0 {
        0.5
    } else {
        0.0
    }
}

pub fn demand_score(input: &DemandInput) -> f64 {
    sales_points(input.previous_sales)
        + delivery_points(input.delivery_time)
        + price_points(input.price)
        + input.product_type.demand_tier().score()
}

pub fn predict_demand(
    input: &DemandInput,
    jitter: &mut dyn JitterSource,
) -> ScoreResult<DemandLevel> {
    let score = demand_score(input);
    let label = DemandLevel::from_score(score);

    ScoreResult {
        label,
        score,
        confidence: CONFIDENCE.sample(jitter),
        explanation: explain(input, label),
    }
}

type Rule = FragmentRule<DemandInput>;

// Wording uses its own breakpoints, not the scoring tiers.
fn sales_rules() -> [Rule; 4] {
    [
        Rule::new(
            |i| i.previous_sales >= 50.0,
            |i| format!("Strong sales history ({} units last month)", i.previous_sales),
        ),
        Rule::new(
            |i| i.previous_sales >= 30.0,
            |i| format!("Moderate sales history ({} units)", i.previous_sales),
        ),
        Rule::new(
            |i| i.previous_sales >= 15.0,
            |i| format!("Limited sales history ({} units)", i.previous_sales),
        ),
        Rule::otherwise(|i| format!("Low sales history ({} units)", i.previous_sales)),
    ]
}

fn delivery_rules() -> [Rule; 3] {
    [
        Rule::new(
            |i| i.delivery_time <= 2.0,
            |i| format!("fast delivery ({} days)", i.delivery_time),
        ),
        Rule::new(
            |i| i.delivery_time <= 3.0,
            |i| format!("reasonable delivery time ({} days)", i.delivery_time),
        ),
        Rule::otherwise(|i| format!("longer delivery time ({} days)", i.delivery_time)),
    ]
}

fn price_rules() -> [Rule; 3] {
    [
        Rule::new(|i| i.price <= 300.0, |i| format!("affordable price at ₹{}", i.price)),
        Rule::new(|i| i.price <= 600.0, |i| format!("moderate price at ₹{}", i.price)),
        Rule::otherwise(|i| format!("higher price at ₹{}", i.price)),
    ]
}

fn category_rules() -> [Rule; 1] {
    [Rule::otherwise(|i| i.product_type.demand_tier().wording().to_string())]
}

fn explain(input: &DemandInput, level: DemandLevel) -> Explanation {
    let (sales, delivery, price, category) =
        (sales_rules(), delivery_rules(), price_rules(), category_rules());
    let groups: [&[Rule]; 4] = [&sales, &delivery, &price, &category];

    Explanation::new(
        format!("{level} demand expected"),
        assemble(&groups, input),
        Layout::FactorList,
    )
}

pub fn model_card() -> ModelCard {
    ModelCard {
        model: "Backpropagation Neural Network (BPNN)",
        description: "Predicts demand category for daycare products based on sales history, delivery time, and price",
        inputs: &[
            "product_type (Diaper, Toy, Feeding, etc.)",
            "previous_sales (numeric)",
            "delivery_time (days)",
            "price (in ₹)",
        ],
        outputs: &["demand_category (Low/Medium/High)", "confidence (0-1)", "explanation"],
        accuracy: "85%",
        kernel: None,
        architecture: Some("MLP with 2 hidden layers (100, 50 neurons)"),
    }
}
