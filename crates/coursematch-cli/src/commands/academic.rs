use clap::Subcommand;
use coursematch_core::{Grade, COMMON_SUBJECTS};

use super::render;
use super::session::{print_json, with_wizard, CliResult};

#[derive(Subcommand)]
pub enum AcademicAction {
    /// List common subjects and grade labels
    Catalog,
    /// Show the academic profile
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Add a subject (default grade B)
    AddSubject {
        name: String,
        /// Grade label, e.g. "A-" or "B+"
        #[arg(long, allow_hyphen_values = true)]
        grade: Option<Grade>,
    },
    /// Remove a subject with its grade and favorite mark
    RemoveSubject { name: String },
    /// Set the grade of an added subject
    Grade {
        subject: String,
        #[arg(allow_hyphen_values = true)]
        grade: Grade,
    },
    /// Mark or unmark a subject as favorite
    Favorite { subject: String },
    AddHobby { hobby: String },
    RemoveHobby { hobby: String },
    AddInterest { interest: String },
    RemoveInterest { interest: String },
    /// Continue to the personality test
    Next,
}

fn report(changed: bool, done: String, skipped: String) {
    if changed {
        println!("{done}");
    } else {
        eprintln!("{skipped}");
    }
}

pub fn run(action: AcademicAction) -> CliResult {
    with_wizard(|_db, wizard| {
        match action {
            AcademicAction::Catalog => {
                println!("Common subjects:");
                for subject in COMMON_SUBJECTS {
                    let mark = if wizard.profile().has_subject(subject) { "+" } else { " " };
                    println!("  {mark} {subject}");
                }
                let grades: Vec<&str> = Grade::ALL.iter().map(|g| g.label()).collect();
                println!("Grades: {}", grades.join(" "));
            }
            AcademicAction::Show { json } => {
                if json {
                    print_json(wizard.profile())?;
                } else {
                    render::step_header(wizard);
                    render::profile(wizard.profile());
                }
            }
            AcademicAction::AddSubject { name, grade } => {
                let grade = grade.unwrap_or_default();
                let name = name.trim();
                let changed = wizard.edit_profile()?.add_subject_with_grade(name, grade);
                report(
                    changed,
                    format!("Added subject: {name} ({grade})"),
                    format!("Subject not added (empty or already present): {name}"),
                );
            }
            AcademicAction::RemoveSubject { name } => {
                let name = name.trim();
                let changed = wizard.edit_profile()?.remove_subject(name);
                report(
                    changed,
                    format!("Removed subject: {name}"),
                    format!("No such subject: {name}"),
                );
            }
            AcademicAction::Grade { subject, grade } => {
                let subject = subject.trim();
                let changed = wizard.edit_profile()?.set_grade(subject, grade);
                report(
                    changed,
                    format!("{subject}: {grade}"),
                    format!("Grade unchanged; add the subject first: {subject}"),
                );
            }
            AcademicAction::Favorite { subject } => {
                let subject = subject.trim();
                let profile = wizard.edit_profile()?;
                let changed = profile.toggle_favorite(subject);
                let state = if profile.is_favorite(subject) { "favorite" } else { "not favorite" };
                report(
                    changed,
                    format!("{subject}: {state}"),
                    format!("No such subject: {subject}"),
                );
            }
            AcademicAction::AddHobby { hobby } => {
                let hobby = hobby.trim();
                let changed = wizard.edit_profile()?.add_hobby(hobby);
                report(
                    changed,
                    format!("Added hobby: {hobby}"),
                    format!("Hobby not added (empty or already present): {hobby}"),
                );
            }
            AcademicAction::RemoveHobby { hobby } => {
                let hobby = hobby.trim();
                let changed = wizard.edit_profile()?.remove_hobby(hobby);
                report(changed, format!("Removed hobby: {hobby}"), format!("No such hobby: {hobby}"));
            }
            AcademicAction::AddInterest { interest } => {
                let interest = interest.trim();
                let changed = wizard.edit_profile()?.add_interest(interest);
                report(
                    changed,
                    format!("Added interest: {interest}"),
                    format!("Interest not added (empty or already present): {interest}"),
                );
            }
            AcademicAction::RemoveInterest { interest } => {
                let interest = interest.trim();
                let changed = wizard.edit_profile()?.remove_interest(interest);
                report(
                    changed,
                    format!("Removed interest: {interest}"),
                    format!("No such interest: {interest}"),
                );
            }
            AcademicAction::Next => {
                wizard.submit_academic()?;
                render::step_header(wizard);
                render::question(wizard);
            }
        }
        Ok(())
    })
}
