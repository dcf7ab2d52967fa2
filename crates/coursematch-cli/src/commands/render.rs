//! Plain-text output for the wizard screens.

use coursematch_core::personality::Dimension;
use coursematch_core::{ClassifyRequest, Profile, Recommendation, Wizard, WizardStep};

pub fn profile(profile: &Profile) {
    if profile.subject_count() == 0 {
        println!("Subjects: (none yet)");
    } else {
        println!("Subjects:");
        for (subject, grade) in profile.grades() {
            let star = if profile.is_favorite(subject) { " *" } else { "" };
            println!("  {subject:<24} {grade}{star}");
        }
    }
    println!("Hobbies:   {}", list_or_dash(profile.hobbies()));
    println!("Interests: {}", list_or_dash(profile.interests()));
    if let Some(personality) = profile.personality() {
        println!("Personality type: {}", personality.personality_type);
    }
}

fn list_or_dash<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let items: Vec<&str> = items.collect();
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

pub fn step_header(wizard: &Wizard) {
    println!("Step {} of 3: {}", wizard.step().number(), wizard.step());
}

pub fn question(wizard: &Wizard) {
    let Some(question) = wizard.current_question() else {
        return;
    };
    println!(
        "Question {} of {} ({:.0}%)",
        wizard.question_index() + 1,
        wizard.questions().len(),
        wizard.progress_pct()
    );
    println!("  {}", question.text);
    if let Some(previous) = wizard.answer_for(&question.id) {
        println!("  (current answer: {previous})");
    }
    println!("Answer with: 2 = Strongly Agree, 1 = Agree, -1 = Disagree, -2 = Strongly Disagree");
}

pub fn results(wizard: &Wizard, force_debug: bool) {
    if wizard.step() != WizardStep::Results {
        return;
    }
    let profile = wizard.profile();
    if let Some(personality) = profile.personality() {
        println!("Personality type: {}", personality.personality_type);
        let axes: Vec<String> = Dimension::ALL
            .iter()
            .map(|d| {
                let (first, second) = (d.first(), d.second());
                format!(
                    "{first}={} {second}={}",
                    personality.scores.get(first),
                    personality.scores.get(second)
                )
            })
            .collect();
        println!("Scores: {}", axes.join("  "));
    }

    let recommendations = wizard.recommendations();
    if recommendations.is_empty() {
        println!("No course recommendations were returned for this profile.");
    } else {
        println!("Recommended courses:");
        for (i, rec) in recommendations.iter().enumerate() {
            recommendation(i + 1, rec);
        }
    }

    if wizard.show_debug() || force_debug {
        debug_panel(profile);
    }
}

fn recommendation(rank: usize, rec: &Recommendation) {
    println!();
    println!("{rank}. {}", rec.name);
    if !rec.description.is_empty() {
        println!("   {}", rec.description);
    }
    if !rec.fit_reason.is_empty() {
        println!("   Why it fits: {}", rec.fit_reason);
    }
    if !rec.career_paths.is_empty() {
        println!("   Career paths: {}", rec.career_paths.join(", "));
    }
}

/// The request body the profile is sent as.
pub fn debug_panel(profile: &Profile) {
    println!();
    println!("--- debug: request payload ---");
    match serde_json::to_string_pretty(&ClassifyRequest::from_profile(profile)) {
        Ok(json) => println!("{json}"),
        Err(e) => println!("(unavailable: {e})"),
    }
}
