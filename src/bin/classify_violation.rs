//! Violation classification CLI
//!
//! Classifies a description against the catalog database and prints the
//! reply the webhook would send.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use eco_violation_bot::catalog;
use eco_violation_bot::classifier::ViolationClassifier;
use eco_violation_bot::config::DEFAULT_DATABASE_URL;
use eco_violation_bot::database::Database;
use eco_violation_bot::webhooks::reply;

#[derive(Clone, Copy, ValueEnum)]
enum ReplyKind {
    /// Violation type, description and law article
    Classify,
    /// Punishment for the violation
    Punishment,
    /// Responsible authority and appeal guidance
    Authority,
}

#[derive(Parser)]
#[command(name = "classify-violation")]
#[command(about = "Classify an environmental violation description")]
#[command(version = "0.1.0")]
struct Cli {
    /// Description of the violation
    #[arg(required = true)]
    description: Vec<String>,

    /// Database URL
    #[arg(long, default_value = DEFAULT_DATABASE_URL)]
    database_url: String,

    /// YAML catalog to seed instead of the built-in one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Which reply to print
    #[arg(short, long, value_enum, default_value = "classify")]
    reply: ReplyKind,

    /// Print the match as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let description = cli.description.join(" ");

    let db = Database::new(&cli.database_url).await?;
    db.run_migrations().await?;
    db.seed_violations(&catalog::resolve_catalog(cli.catalog.as_deref())?)
        .await?;

    let classifier = ViolationClassifier::new(db);
    let result = classifier.classify(&description).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match result {
        Some(found) => {
            let text = match cli.reply {
                ReplyKind::Classify => reply::classification(&found.violation),
                ReplyKind::Punishment => reply::punishment(&found.violation),
                ReplyKind::Authority => reply::authority(&found.violation),
            };
            println!("{}", text);
            println!();
            println!(
                "Score: {} (matched: {})",
                found.score,
                found.matched_keywords.join(", ")
            );
        }
        None => println!("{}", reply::unclassified(&description)),
    }

    Ok(())
}
