use clap::{Parser, Subcommand};
use colored::Colorize;

mod commands;
mod input;
mod output;

#[derive(Parser)]
#[command(
    name = "crisk",
    version,
    about = "Credit-risk decision simulation and business-case analytics",
    long_about = None
)]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = output::Format::Json)]
    output: output::Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a loan applicant and produce an approval decision
    Assess(commands::scoring::ProfileArgs),

    /// Compare an applicant against the reference risk profiles
    Benchmark(commands::scoring::ProfileArgs),

    /// Project the return on investment of a scoring-model rollout
    Roi(commands::roi::ScenarioArgs),

    /// Sweep the ROI projection across default-reduction multipliers
    RoiSensitivity(commands::roi::SensitivityArgs),

    /// Month-by-month savings accrual and break-even point
    RoiTimeline(commands::roi::ScenarioArgs),

    /// Classification metrics from raw confusion-matrix counts
    ModelMetrics(commands::model_metrics::MetricsArgs),

    /// Reconstruct a confusion matrix from published evaluation rates
    DeriveMatrix(commands::model_metrics::DeriveArgs),

    /// Compare a candidate scoring model against a baseline
    CompareModels(commands::model_metrics::CompareArgs),

    /// Translate an AUC uplift into estimated portfolio savings
    BusinessImpact(commands::model_metrics::ImpactArgs),

    /// Print a published model card
    ModelCard(commands::model_metrics::CardArgs),

    /// Print version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Assess(args) => commands::scoring::run_assess(args),
        Commands::Benchmark(args) => commands::scoring::run_benchmark(args),
        Commands::Roi(args) => commands::roi::run_projection(args),
        Commands::RoiSensitivity(args) => commands::roi::run_sensitivity(args),
        Commands::RoiTimeline(args) => commands::roi::run_timeline(args),
        Commands::ModelMetrics(args) => commands::model_metrics::run_metrics(args),
        Commands::DeriveMatrix(args) => commands::model_metrics::run_derive(args),
        Commands::CompareModels(args) => commands::model_metrics::run_compare(args),
        Commands::BusinessImpact(args) => commands::model_metrics::run_impact(args),
        Commands::ModelCard(args) => commands::model_metrics::run_card(args),
        Commands::Version => {
            println!("crisk {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => output::print(&value, cli.output),
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}
