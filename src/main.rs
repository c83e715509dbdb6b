use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::Path;

use receipt_processor::{Receipt, Rule, ScoringEngine, VERSION};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("score") => run_score(args.get(2), false),
        Some("explain") => run_score(args.get(2), true),
        Some("--version") | Some("-V") => {
            println!("receipt-processor {}", VERSION);
            Ok(())
        }
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("🧾 Receipt Processor {}", VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Usage:");
    println!("  receipt-processor score <receipt.json>    Print the points for a receipt");
    println!("  receipt-processor explain <receipt.json>  Print points per rule");
    println!("\nRun the HTTP API with: cargo run --bin receipt-server");
}

fn load_receipt(path: &Path) -> Result<Receipt> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read receipt file: {:?}", path))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Invalid receipt format in {:?}", path))
}

fn run_score(path: Option<&String>, explain: bool) -> Result<()> {
    let Some(path) = path else {
        bail!("Missing receipt file. Usage: receipt-processor score <receipt.json>");
    };

    let receipt = load_receipt(Path::new(path))?;
    let engine = ScoringEngine::new();

    if !explain {
        println!("{}", engine.compute(&receipt));
        return Ok(());
    }

    let breakdown = engine.breakdown(&receipt);
    println!("🧾 {} ({} items, total {})", receipt.retailer, receipt.items.len(), receipt.total);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if breakdown.unscoreable_total {
        println!("⚠️  Total {:?} is not a number: receipt scores 0", receipt.total);
    } else {
        for rule in Rule::ALL {
            println!("  {:<24} {:>5}", rule.label(), breakdown.points_for(rule));
        }
    }

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  {:<24} {:>5}", "Total points", breakdown.points());

    Ok(())
}
