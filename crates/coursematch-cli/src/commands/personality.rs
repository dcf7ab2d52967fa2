use clap::Subcommand;
use coursematch_core::{AnswerChoice, AnswerOutcome};

use super::render;
use super::session::{self, with_wizard, CliResult};

#[derive(Subcommand)]
pub enum PersonalityAction {
    /// Show the current question
    Question,
    /// Answer the current question
    Answer {
        /// 2, 1, -1, -2 or strongly-agree, agree, disagree, strongly-disagree
        #[arg(allow_hyphen_values = true)]
        choice: AnswerChoice,
    },
    /// Go back one question, keeping answers
    Previous,
    /// Return to the academic step; personality answers are discarded
    Back,
    /// Re-submit the completed questionnaire after a failed classification
    Retry,
    /// Clear the last classification error
    DismissError,
}

pub fn run(action: PersonalityAction) -> CliResult {
    with_wizard(|db, wizard| match action {
        PersonalityAction::Question => {
            render::step_header(wizard);
            if let Some(error) = wizard.error() {
                eprintln!("Last attempt failed: {error}");
            }
            if wizard.current_question().is_none() {
                return Err(format!("No question to show on the {} step", wizard.step()).into());
            }
            render::question(wizard);
            Ok(())
        }
        PersonalityAction::Answer { choice } => match wizard.answer(choice)? {
            AnswerOutcome::NextQuestion { .. } => {
                render::question(wizard);
                Ok(())
            }
            AnswerOutcome::Submitted { personality, pending } => {
                println!("Your personality type: {}", personality.personality_type);
                session::classify(db, wizard, pending)
            }
        },
        PersonalityAction::Previous => {
            wizard.previous_question()?;
            render::question(wizard);
            Ok(())
        }
        PersonalityAction::Back => {
            wizard.back()?;
            println!("Back to academic info; personality answers cleared.");
            render::step_header(wizard);
            render::profile(wizard.profile());
            Ok(())
        }
        PersonalityAction::Retry => {
            let pending = wizard.retry()?;
            session::classify(db, wizard, pending)
        }
        PersonalityAction::DismissError => {
            wizard.dismiss_error();
            println!("ok");
            Ok(())
        }
    })
}
