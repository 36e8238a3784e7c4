mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "deckquote",
    version,
    about = "Price deck and patio construction estimates"
)]
struct Cli {
    /// Show per-line pricing reasons and debug logs
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by the pricing commands.
#[derive(Args)]
struct PriceArgs {
    /// Custom JSON rate table
    #[arg(short, long = "rates", value_name = "FILE", conflicts_with = "preset")]
    rates: Option<PathBuf>,

    /// Predefined rate table (default: standard)
    #[arg(short, long = "preset", value_name = "NAME")]
    preset: Option<String>,

    /// Output format: table (default) or json
    #[arg(short, long, default_value = "table")]
    output: String,

    /// Write the quote to a JSON file
    #[arg(short = 'O', long = "out", value_name = "FILE")]
    out: Option<PathBuf>,

    /// Customer first name; saves the quote when writing with --out
    #[arg(long, value_name = "NAME")]
    customer: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a project described in a JSON file
    Price {
        /// Path to project JSON
        input_file: PathBuf,

        #[command(flatten)]
        args: PriceArgs,
    },
    /// Price a project from estimator form fields (key=value)
    Form {
        /// Form fields, e.g. length=20 width=12 height=3 material=cedar
        #[arg(required = true)]
        fields: Vec<String>,

        #[command(flatten)]
        args: PriceArgs,
    },
    /// Inspect and validate rate tables
    Rates {
        #[command(subcommand)]
        action: RatesAction,
    },
    /// List the quick deck finish levels
    Finishes,
    /// Work with saved quotes
    Quote {
        #[command(subcommand)]
        action: QuoteAction,
    },
}

#[derive(Subcommand)]
enum RatesAction {
    /// List predefined rate tables
    List,
    /// Show every rate in a table
    Explain {
        /// Preset name (e.g., "standard")
        preset: String,
    },
    /// Print the rate table JSON schema with an example
    Schema,
    /// Validate a custom rate table
    Validate {
        /// Path to JSON rate table
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum QuoteAction {
    /// Mark a saved quote as accepted by the customer
    Accept {
        /// Path to quote JSON written by --out
        file: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Price { input_file, args } => commands::price::run(
            &input_file,
            args.rates,
            args.preset,
            &args.output,
            args.out,
            args.customer,
            cli.verbose,
        ),
        Commands::Form { fields, args } => commands::form::run(
            &fields,
            args.rates,
            args.preset,
            &args.output,
            args.out,
            args.customer,
            cli.verbose,
        ),
        Commands::Rates { action } => match action {
            RatesAction::List => commands::rates::list(),
            RatesAction::Explain { preset } => commands::rates::explain(&preset),
            RatesAction::Schema => commands::rates::schema(),
            RatesAction::Validate { file } => commands::rates::validate(&file),
        },
        Commands::Finishes => commands::finishes::run(),
        Commands::Quote { action } => match action {
            QuoteAction::Accept { file } => commands::quote::accept(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
