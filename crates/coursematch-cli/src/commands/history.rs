use clap::Subcommand;
use coursematch_core::Database;

use super::session::{print_json, CliResult};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List recent classifications, newest first
    List {
        #[arg(long, default_value = "10")]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
    /// Show one stored classification
    Show {
        id: i64,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: HistoryAction) -> CliResult {
    let db = Database::open()?;
    match action {
        HistoryAction::List { limit, json } => {
            let records = db.list_classifications(limit)?;
            if json {
                return print_json(&records);
            }
            if records.is_empty() {
                println!("No classifications yet.");
            }
            for record in &records {
                let names: Vec<&str> = record.recommendations.iter().map(|r| r.name.as_str()).collect();
                println!(
                    "#{:<4} {}  {:<4}  {}",
                    record.id,
                    record.created_at.format("%Y-%m-%d %H:%M"),
                    record.personality_type,
                    names.join(", ")
                );
            }
            Ok(())
        }
        HistoryAction::Show { id, json } => {
            let record = db
                .get_classification(id)?
                .ok_or_else(|| format!("no classification with id {id}"))?;
            if json {
                return print_json(&record);
            }
            println!("Classification #{} ({})", record.id, record.created_at.to_rfc3339());
            println!("Personality type: {}", record.personality_type);
            println!("Subjects: {}", record.profile.subjects().collect::<Vec<_>>().join(", "));
            for rec in &record.recommendations {
                println!("- {}", rec.name);
                if !rec.career_paths.is_empty() {
                    println!("  Career paths: {}", rec.career_paths.join(", "));
                }
            }
            Ok(())
        }
    }
}
