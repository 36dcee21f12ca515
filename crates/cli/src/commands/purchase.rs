use clap::Args;
use nestling_core::purchase::{predict_purchase, PurchaseInput, PurchaseRequest};
use nestling_core::scoring::Numeric;

use super::{jitter_for, CommandResult, EXIT_INVALID_INPUT};

#[derive(Debug, Clone, Default, Args)]
pub struct PurchaseArgs {
    #[arg(long, help = "Product category, e.g. Diaper, Toy, Skincare")]
    pub category: Option<String>,
    #[arg(long, allow_negative_numbers = true, help = "Price in rupees")]
    pub price: Option<f64>,
    #[arg(long, allow_negative_numbers = true, help = "Discount percentage (0-100)")]
    pub discount: Option<f64>,
    #[arg(long, help = "Customer type: Parent or Customer (default Customer)")]
    pub customer_type: Option<String>,
}

impl From<PurchaseArgs> for PurchaseRequest {
    fn from(args: PurchaseArgs) -> Self {
        Self {
            category: args.category,
            price: args.price.map(Numeric::from),
            discount: args.discount.map(Numeric::from),
            customer_type: args.customer_type,
        }
    }
}

pub fn run(args: PurchaseArgs, seed: Option<u64>) -> CommandResult {
    let input = match PurchaseInput::try_from(PurchaseRequest::from(args)) {
        Ok(input) => input,
        Err(error) => {
            return CommandResult::failure(
                "purchase",
                "invalid_input",
                error.to_string(),
                EXIT_INVALID_INPUT,
            );
        }
    };

    let mut jitter = jitter_for(seed);
    let result = predict_purchase(&input, jitter.as_mut());
    let message = format!("purchase verdict: {} (probability {:.2})", result.label, result.score);
    CommandResult::success_with("purchase", message, result)
}
