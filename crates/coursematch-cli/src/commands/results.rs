use clap::Subcommand;
use coursematch_core::{Config, WizardStep};
use serde_json::json;

use super::render;
use super::session::{print_json, read_wizard, with_wizard, CliResult};

#[derive(Subcommand)]
pub enum ResultsAction {
    /// Show the recommendations
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Start over with an empty profile
    Restart,
}

pub fn run(action: ResultsAction) -> CliResult {
    match action {
        ResultsAction::Show { json } => {
            let wizard = read_wizard()?;
            if wizard.step() != WizardStep::Results {
                return Err(format!(
                    "No results yet (currently on the {} step)",
                    wizard.step()
                )
                .into());
            }
            if json {
                let profile = wizard.profile();
                print_json(&json!({
                    "personality_type": profile.personality_type().map(|t| t.to_string()),
                    "personality_scores": profile.axis_scores(),
                    "recommendations": wizard.recommendations(),
                }))
            } else {
                let config = Config::load_or_default();
                render::step_header(&wizard);
                render::results(&wizard, config.display.show_debug);
                Ok(())
            }
        }
        ResultsAction::Restart => with_wizard(|_db, wizard| {
            wizard.restart()?;
            println!("Started over.");
            render::step_header(wizard);
            Ok(())
        }),
    }
}
