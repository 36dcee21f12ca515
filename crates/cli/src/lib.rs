pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use commands::demand::DemandArgs;
use commands::purchase::PurchaseArgs;
use commands::recommend::RecommendArgs;

#[derive(Debug, Parser)]
#[command(
    name = "nestling",
    about = "Nestling operator CLI",
    long_about = "Score purchase intent and demand, rank learning activities, and inspect runtime configuration.",
    after_help = "Examples:\n  nestling purchase --category Diaper --price 150 --discount 20 --customer-type Parent\n  nestling demand --product-type Toy --previous-sales 40 --delivery-time 3 --price 450 --seed 7\n  nestling recommend --dob 2020-06-01 --interest phonics\n  nestling doctor --json"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Seed the confidence jitter for reproducible output")]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Predict whether a shopper will buy a product")]
    Purchase(PurchaseArgs),
    #[command(about = "Predict the demand level for a product")]
    Demand(DemandArgs),
    #[command(about = "Rank age-appropriate learning activities for a child")]
    Recommend(RecommendArgs),
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, catalog integrity, and scorer reference probes")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Purchase(args) => commands::purchase::run(args, cli.seed),
        Command::Demand(args) => commands::demand::run(args, cli.seed),
        Command::Recommend(args) => commands::recommend::run(args),
        Command::Config => commands::config::run(),
        Command::Doctor { json } => commands::doctor::run(json),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
