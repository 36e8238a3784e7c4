use deckquote_core::model::ProjectSpec;
use deckquote_core::present::{describe_deck, format_cost};
use deckquote_core::pricing::EstimateOutcome;
use deckquote_core::rates::schema::RateTable;

pub fn print(project: &ProjectSpec, outcome: &EstimateOutcome, rates: &RateTable, verbose: bool) {
    let estimate = match outcome {
        EstimateOutcome::Priced(estimate) => estimate,
        // Reported as an error by the caller
        EstimateOutcome::Rejected { .. } => return,
    };

    println!("=== Estimate ({} v{}) ===\n", rates.name, rates.version);
    if let Some(ref desc) = project.description {
        println!("  {}\n", desc);
    }
    println!("  {}\n", describe_deck(project, estimate, rates));

    let max_name = estimate
        .lines
        .iter()
        .map(|l| l.kind.to_string().len())
        .max()
        .unwrap_or(10)
        .max("Sales tax".len());

    for line in &estimate.lines {
        println!(
            "  {:<width$}  {:>14}",
            line.kind.to_string(),
            format_cost(line.cost),
            width = max_name
        );
        if verbose {
            println!("    {}", line.reason);
        }
    }

    println!("  {}", "-".repeat(max_name + 16));
    println!(
        "  {:<width$}  {:>14}",
        "Subtotal",
        format_cost(estimate.subtotal),
        width = max_name
    );
    println!(
        "  {:<width$}  {:>14}",
        "Sales tax",
        format_cost(estimate.sales_tax),
        width = max_name
    );
    println!(
        "  {:<width$}  {:>14}",
        "Total",
        format_cost(estimate.total),
        width = max_name
    );
    println!();

    if estimate.steps > rust_decimal::Decimal::ZERO {
        println!("  Stairs: {} steps", estimate.steps.normalize());
    }
    if !estimate.rail_infill.is_empty() {
        println!(
            "  Rails: {} ft with {} infill",
            estimate.rail_feet.normalize(),
            rates.label(&estimate.rail_infill)
        );
    }
}
