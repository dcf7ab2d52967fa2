use coursematch_core::{Config, WizardStep};

use super::render;
use super::session::{self, print_json, read_wizard, with_wizard, CliResult};

pub fn run(json: bool) -> CliResult {
    let wizard = read_wizard()?;
    if json {
        return print_json(&wizard.snapshot());
    }

    render::step_header(&wizard);
    let profile = wizard.profile();
    println!(
        "Profile: {} subjects, {} hobbies, {} interests",
        profile.subject_count(),
        profile.hobbies().count(),
        profile.interests().count()
    );
    match wizard.step() {
        WizardStep::AcademicInfo => println!("Next: add subjects, then `coursematch academic next`"),
        WizardStep::PersonalityTest => println!(
            "Answered {} of {} questions",
            wizard.answered_count(),
            wizard.questions().len()
        ),
        WizardStep::Results => println!("{} recommendations", wizard.recommendations().len()),
    }
    if let Some(error) = wizard.error() {
        println!("Error: {error}");
    }
    if wizard.show_debug() {
        render::debug_panel(profile);
    }
    Ok(())
}

/// Advisory only; an unreachable service is reported, not an error.
pub fn health(json: bool) -> CliResult {
    let config = Config::load()?;
    let gateway = session::gateway(&config)?;
    let status = session::runtime()?.block_on(gateway.health());
    if json {
        print_json(&status)
    } else {
        println!("{}", status.message());
        Ok(())
    }
}

pub fn toggle_debug() -> CliResult {
    with_wizard(|_db, wizard| {
        let on = wizard.toggle_debug();
        println!("Debug panel {}", if on { "on" } else { "off" });
        Ok(())
    })
}
