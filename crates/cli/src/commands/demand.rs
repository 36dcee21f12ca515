use clap::Args;
use nestling_core::demand::{predict_demand, DemandInput, DemandRequest};
use nestling_core::scoring::Numeric;

use super::{jitter_for, CommandResult, EXIT_INVALID_INPUT};

#[derive(Debug, Clone, Default, Args)]
pub struct DemandArgs {
    #[arg(long, help = "Product type, e.g. Diaper, Bath, Stroller")]
    pub product_type: Option<String>,
    #[arg(long, allow_negative_numbers = true, help = "Units sold last month")]
    pub previous_sales: Option<f64>,
    #[arg(long, allow_negative_numbers = true, help = "Delivery time in days")]
    pub delivery_time: Option<f64>,
    #[arg(long, allow_negative_numbers = true, help = "Price in rupees")]
    pub price: Option<f64>,
}

impl From<DemandArgs> for DemandRequest {
    fn from(args: DemandArgs) -> Self {
        Self {
            product_type: args.product_type,
            previous_sales: args.previous_sales.map(Numeric::from),
            delivery_time: args.delivery_time.map(Numeric::from),
            price: args.price.map(Numeric::from),
        }
    }
}

pub fn run(args: DemandArgs, seed: Option<u64>) -> CommandResult {
    let input = match DemandInput::try_from(DemandRequest::from(args)) {
        Ok(input) => input,
        Err(error) => {
            return CommandResult::failure(
                "demand",
                "invalid_input",
                error.to_string(),
                EXIT_INVALID_INPUT,
            );
        }
    };

    let mut jitter = jitter_for(seed);
    let result = predict_demand(&input, jitter.as_mut());
    let message = format!("demand level: {} (score {:.1})", result.label, result.score);
    CommandResult::success_with("demand", message, result)
}
