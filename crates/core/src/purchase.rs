//! Purchase-intent scorer.
//!
//! Estimates whether a shopper will buy a product from its category, price,
//! discount and the shopper's customer type. The estimate is a hand-tuned
//! additive heuristic starting from an even 0.5; it is not clamped, so values
//! above 1.0 are possible and only their comparison against 0.5 matters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::explanation::{assemble, Explanation, FragmentRule, Layout};
use crate::jitter::{ConfidenceBand, JitterSource};
use crate::scoring::{missing_fields, present_text, ModelCard, Numeric, ScoreResult};
use crate::taxonomy::{CustomerType, ProductCategory};

pub const BASE_PROBABILITY: f64 = 0.5;
pub const CONFIDENCE: ConfidenceBand = ConfidenceBand::new(0.75, 0.15);

/// Discount percentage from which the closing note calls the discount effective.
const EFFECTIVE_DISCOUNT: f64 = 15.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PurchaseVerdict {
    Yes,
    No,
}

impl PurchaseVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl fmt::Display for PurchaseVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body as submitted by the storefront.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PurchaseRequest {
    pub category: Option<String>,
    pub price: Option<Numeric>,
    pub discount: Option<Numeric>,
    #[serde(rename = "customerType", alias = "customer_type")]
    pub customer_type: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PurchaseInput {
    pub category: ProductCategory,
    pub price: f64,
    /// Percentage, 0-100.
    pub discount: f64,
    pub customer_type: CustomerType,
}

impl TryFrom<PurchaseRequest> for PurchaseInput {
    type Error = DomainError;

    fn try_from(request: PurchaseRequest) -> Result<Self, Self::Error> {
        let customer_type =
            present_text(&request.customer_type).map(CustomerType::parse).unwrap_or_default();

        match (present_text(&request.category), &request.price, &request.discount) {
            (Some(category), Some(price), Some(discount)) => Ok(Self {
                category: ProductCategory::parse(category),
                price: price.to_f64("price")?,
                discount: discount.to_f64("discount")?,
                customer_type,
            }),
            (category, price, discount) => Err(missing_fields(&[
                ("category", category.is_some()),
                ("price", price.is_some()),
                ("discount", discount.is_some()),
            ])),
        }
    }
}

pub fn discount_bonus(discount: f64) -> f64 {
    if discount >= 20.0 {
        0.35
    } else if discount >= 15.0 {
        0.25
    } else if discount >= 10.0 {
        0.15
    } else if discount >= 5.0 {
        0.05
    } else {
        0.0
    }
}

pub fn price_adjustment(price: f64) -> f64 {
    if price <= 200.0 {
        0.2
    } else if price <= 500.0 {
        0.1
    } else if price <= 1000.0 {
        0.0
    } else {
        -0.15
    }
}

pub fn purchase_probability(input: &PurchaseInput) -> f64 {
    BASE_PROBABILITY
        + discount_bonus(input.discount)
        + price_adjustment(input.price)
        + input.category.purchase_bonus()
        + input.customer_type.purchase_bonus()
}

pub fn verdict_for(probability: f64) -> PurchaseVerdict {
    // TODO: decide whether probability should be clamped to [0, 1]; storefront
    // dashboards currently display the raw value.
    if probability > BASE_PROBABILITY {
        PurchaseVerdict::Yes
    } else {
        PurchaseVerdict::No
    }
}

pub fn predict_purchase(
    input: &PurchaseInput,
    jitter: &mut dyn JitterSource,
) -> ScoreResult<PurchaseVerdict> {
    let probability = purchase_probability(input);
    let label = verdict_for(probability);

    ScoreResult {
        label,
        score: probability,
        confidence: CONFIDENCE.sample(jitter),
        explanation: explain(input, label),
    }
}

struct Context {
    input: PurchaseInput,
    verdict: PurchaseVerdict,
}

type Rule = FragmentRule<Context>;

fn discount_rules() -> [Rule; 5] {
    [
        Rule::new(
            |c| c.input.discount >= 20.0,
            |c| {
                format!(
                    "Excellent discount of {}% creates strong purchase incentive.",
                    c.input.discount
                )
            },
        ),
        Rule::new(
            |c| c.input.discount >= 15.0,
            |c| format!("High discount of {}% makes this an attractive purchase.", c.input.discount),
        ),
        Rule::new(
            |c| c.input.discount >= 10.0,
            |c| format!("Moderate discount of {}% provides reasonable value.", c.input.discount),
        ),
        Rule::new(
            |c| c.input.discount >= 5.0,
            |c| format!("Small discount of {}% offers minimal savings.", c.input.discount),
        ),
        Rule::otherwise(|_| "No discount may reduce purchase appeal.".to_string()),
    ]
}

fn price_rules() -> [Rule; 4] {
    [
        Rule::new(
            |c| c.input.price <= 200.0,
            |c| format!("Affordable price at ₹{} is within easy reach.", c.input.price),
        ),
        Rule::new(
            |c| c.input.price <= 500.0,
            |c| format!("Reasonable price at ₹{} is acceptable.", c.input.price),
        ),
        Rule::new(
            |c| c.input.price <= 1000.0,
            |c| format!("Moderate price at ₹{} may require consideration.", c.input.price),
        ),
        Rule::otherwise(|c| {
            format!("Higher price point at ₹{} may deter purchases.", c.input.price)
        }),
    ]
}

fn profile_rules() -> [Rule; 1] {
    [Rule::new(
        |c| c.input.category.purchase_wording().is_some(),
        |c| c.input.category.purchase_wording().unwrap_or_default().to_string(),
    )]
}

fn customer_rules() -> [Rule; 1] {
    [Rule::new(
        |c| c.input.customer_type.purchase_wording().is_some(),
        |c| c.input.customer_type.purchase_wording().unwrap_or_default().to_string(),
    )]
}

fn advice_rules() -> [Rule; 2] {
    [
        Rule::new(
            |c| c.verdict == PurchaseVerdict::No && c.input.discount < EFFECTIVE_DISCOUNT,
            |_| "Consider increasing discount to improve purchase likelihood.".to_string(),
        ),
        Rule::new(
            |c| c.verdict == PurchaseVerdict::Yes && c.input.discount >= EFFECTIVE_DISCOUNT,
            |_| "Current discount is effective for driving purchases.".to_string(),
        ),
    ]
}

fn explain(input: &PurchaseInput, verdict: PurchaseVerdict) -> Explanation {
    let headline = match verdict {
        PurchaseVerdict::Yes => "Customer will purchase this product.",
        PurchaseVerdict::No => "Customer likely won't purchase this product.",
    };

    let context = Context { input: input.clone(), verdict };
    let (discount, price, profile, customer, advice) =
        (discount_rules(), price_rules(), profile_rules(), customer_rules(), advice_rules());
    let groups: [&[Rule]; 5] = [&discount, &price, &profile, &customer, &advice];
    let fragments = assemble(&groups, &context);

    Explanation::new(headline, fragments, Layout::Sentences)
}

pub fn model_card() -> ModelCard {
    ModelCard {
        model: "Support Vector Machine (SVM)",
        description: "Predicts whether a customer will purchase a product based on category, price, discount, and customer type",
        inputs: &[
            "category (Toy, Diaper, Skincare)",
            "price (numeric)",
            "discount (percentage, 0-100)",
            "customer_type (Parent, Teacher, Staff)",
        ],
        outputs: &["prediction (Yes/No)", "confidence (0-1)", "explanation"],
        accuracy: "85%",
        kernel: Some("RBF (Radial Basis Function)"),
        architecture: None,
    }
}
