//! Profile accumulator.
//!
//! Collects the academic step's data (subjects, grades, favourites, hobbies,
//! interests) and the personality step's result into one profile. Fields are
//! private so the invariants always hold:
//!
//! - every subject has exactly one grade, assigned when it is added;
//! - favourite subjects are a subset of subjects;
//! - removing a subject removes its grade and favourite flag in the same call.
//!
//! Every mutator returns `true` when the profile changed. Free text is
//! trimmed, and empty or duplicate entries are ignored.

mod catalog;

pub use catalog::{Grade, COMMON_SUBJECTS};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::personality::{AxisScores, PersonalityResult, PersonalityType};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    subjects: IndexSet<String>,
    grades: IndexMap<String, Grade>,
    favorite_subjects: IndexSet<String>,
    hobbies: IndexSet<String>,
    interests: IndexSet<String>,
    #[serde(default)]
    personality: Option<PersonalityResult>,
}

/// Trim user input; `None` when nothing is left.
fn clean(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn insert_clean(set: &mut IndexSet<String>, input: &str) -> bool {
    match clean(input) {
        Some(value) => set.insert(value.to_string()),
        None => false,
    }
}

fn remove_clean(set: &mut IndexSet<String>, input: &str) -> bool {
    match clean(input) {
        Some(value) => set.shift_remove(value),
        None => false,
    }
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.subjects.iter().map(String::as_str)
    }

    pub fn has_subject(&self, name: &str) -> bool {
        clean(name).is_some_and(|n| self.subjects.contains(n))
    }

    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    pub fn grade(&self, subject: &str) -> Option<Grade> {
        clean(subject).and_then(|s| self.grades.get(s).copied())
    }

    pub fn grades(&self) -> impl Iterator<Item = (&str, Grade)> {
        self.grades.iter().map(|(s, g)| (s.as_str(), *g))
    }

    pub fn favorite_subjects(&self) -> impl Iterator<Item = &str> {
        self.favorite_subjects.iter().map(String::as_str)
    }

    pub fn is_favorite(&self, subject: &str) -> bool {
        clean(subject).is_some_and(|s| self.favorite_subjects.contains(s))
    }

    pub fn hobbies(&self) -> impl Iterator<Item = &str> {
        self.hobbies.iter().map(String::as_str)
    }

    pub fn interests(&self) -> impl Iterator<Item = &str> {
        self.interests.iter().map(String::as_str)
    }

    pub fn personality(&self) -> Option<&PersonalityResult> {
        self.personality.as_ref()
    }

    pub fn personality_type(&self) -> Option<PersonalityType> {
        self.personality.map(|p| p.personality_type)
    }

    pub fn axis_scores(&self) -> Option<AxisScores> {
        self.personality.map(|p| p.scores)
    }

    /// True when nothing has been entered yet.
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
            && self.hobbies.is_empty()
            && self.interests.is_empty()
            && self.personality.is_none()
    }

    // ── Subjects ─────────────────────────────────────────────────────

    /// Add a subject with the default grade. No-op if already present.
    pub fn add_subject(&mut self, name: &str) -> bool {
        self.add_subject_with_grade(name, Grade::default())
    }

    /// Add a subject with an explicit initial grade. An existing subject
    /// keeps its current grade.
    pub fn add_subject_with_grade(&mut self, name: &str, grade: Grade) -> bool {
        let Some(name) = clean(name) else {
            return false;
        };
        if !self.subjects.insert(name.to_string()) {
            return false;
        }
        self.grades.entry(name.to_string()).or_insert(grade);
        true
    }

    /// Remove a subject together with its grade and favourite flag.
    pub fn remove_subject(&mut self, name: &str) -> bool {
        let Some(name) = clean(name) else {
            return false;
        };
        if !self.subjects.shift_remove(name) {
            return false;
        }
        self.grades.shift_remove(name);
        self.favorite_subjects.shift_remove(name);
        true
    }

    /// Change the grade of an existing subject. Unknown subjects are ignored.
    pub fn set_grade(&mut self, subject: &str, grade: Grade) -> bool {
        let Some(subject) = clean(subject) else {
            return false;
        };
        match self.grades.get_mut(subject) {
            Some(current) if *current != grade => {
                *current = grade;
                true
            }
            _ => false,
        }
    }

    /// Flip the favourite flag of an existing subject. Unknown subjects are ignored.
    pub fn toggle_favorite(&mut self, subject: &str) -> bool {
        let Some(subject) = clean(subject) else {
            return false;
        };
        if !self.subjects.contains(subject) {
            return false;
        }
        if !self.favorite_subjects.shift_remove(subject) {
            self.favorite_subjects.insert(subject.to_string());
        }
        true
    }

    // ── Hobbies and interests ────────────────────────────────────────

    pub fn add_hobby(&mut self, hobby: &str) -> bool {
        insert_clean(&mut self.hobbies, hobby)
    }

    pub fn remove_hobby(&mut self, hobby: &str) -> bool {
        remove_clean(&mut self.hobbies, hobby)
    }

    pub fn add_interest(&mut self, interest: &str) -> bool {
        insert_clean(&mut self.interests, interest)
    }

    pub fn remove_interest(&mut self, interest: &str) -> bool {
        remove_clean(&mut self.interests, interest)
    }

    // ── Personality ──────────────────────────────────────────────────

    /// Merge the scorer's output into the profile.
    pub fn set_personality(&mut self, result: PersonalityResult) {
        self.personality = Some(result);
    }

    pub fn clear_personality(&mut self) {
        self.personality = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn invariants_hold(profile: &Profile) -> bool {
        let favorites_are_subjects = profile
            .favorite_subjects()
            .all(|f| profile.has_subject(f));
        let every_subject_graded = profile.subjects().all(|s| profile.grade(s).is_some());
        let no_orphan_grades = profile.grades().all(|(s, _)| profile.has_subject(s));
        favorites_are_subjects && every_subject_graded && no_orphan_grades
    }

    #[test]
    fn add_subject_assigns_default_grade() {
        let mut profile = Profile::new();
        assert!(profile.add_subject("Physics"));
        assert_eq!(profile.grade("Physics"), Some(Grade::B));
    }

    #[test]
    fn add_subject_is_idempotent() {
        let mut once = Profile::new();
        once.add_subject("Art");

        let mut twice = Profile::new();
        assert!(twice.add_subject("Art"));
        assert!(!twice.add_subject("Art"));

        assert_eq!(once, twice);
    }

    #[test]
    fn re_adding_keeps_existing_grade() {
        let mut profile = Profile::new();
        profile.add_subject("Music");
        profile.set_grade("Music", Grade::APlus);
        profile.add_subject_with_grade("Music", Grade::F);
        assert_eq!(profile.grade("Music"), Some(Grade::APlus));
    }

    #[test]
    fn free_text_is_trimmed_and_blank_rejected() {
        let mut profile = Profile::new();
        assert!(profile.add_subject("  Robotics "));
        assert!(profile.has_subject("Robotics"));
        assert!(!profile.add_subject("Robotics"));
        assert!(!profile.add_subject("   "));
        assert!(!profile.add_hobby(""));
        assert!(profile.add_hobby(" chess"));
        assert!(!profile.add_hobby("chess "));
        assert_eq!(profile.hobbies().collect::<Vec<_>>(), vec!["chess"]);
    }

    #[test]
    fn duplicates_are_exact_match_after_trim() {
        let mut profile = Profile::new();
        assert!(profile.add_interest("AI"));
        assert!(profile.add_interest("ai"));
        assert_eq!(profile.interests().count(), 2);
    }

    #[test]
    fn remove_subject_cascades() {
        let mut profile = Profile::new();
        profile.add_subject("Biology");
        profile.toggle_favorite("Biology");
        assert!(profile.is_favorite("Biology"));

        assert!(profile.remove_subject("Biology"));
        assert!(!profile.has_subject("Biology"));
        assert_eq!(profile.grade("Biology"), None);
        assert!(!profile.is_favorite("Biology"));
        assert!(invariants_hold(&profile));
    }

    #[test]
    fn toggle_favorite_ignores_unknown_subject() {
        let mut profile = Profile::new();
        assert!(!profile.toggle_favorite("History"));
        assert_eq!(profile.favorite_subjects().count(), 0);
    }

    #[test]
    fn toggle_favorite_flips() {
        let mut profile = Profile::new();
        profile.add_subject("History");
        assert!(profile.toggle_favorite("History"));
        assert!(profile.is_favorite("History"));
        assert!(profile.toggle_favorite("History"));
        assert!(!profile.is_favorite("History"));
    }

    #[test]
    fn set_grade_ignores_unknown_subject() {
        let mut profile = Profile::new();
        assert!(!profile.set_grade("Chemistry", Grade::A));
        assert_eq!(profile.grades().count(), 0);
    }

    #[test]
    fn subjects_keep_insertion_order() {
        let mut profile = Profile::new();
        for s in ["Physics", "Art", "English"] {
            profile.add_subject(s);
        }
        profile.remove_subject("Art");
        profile.add_subject("Art");
        assert_eq!(
            profile.subjects().collect::<Vec<_>>(),
            vec!["Physics", "English", "Art"]
        );
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize),
        Remove(usize),
        Toggle(usize),
        Grade(usize, usize),
    }

    const NAMES: &[&str] = &["Math", "Art", " Math ", "Music", "", "Physics"];

    fn arb_op() -> impl Strategy<Value = Op> {
        let idx = 0..NAMES.len();
        prop_oneof![
            idx.clone().prop_map(Op::Add),
            idx.clone().prop_map(Op::Remove),
            idx.clone().prop_map(Op::Toggle),
            (idx, 0..Grade::ALL.len()).prop_map(|(i, g)| Op::Grade(i, g)),
        ]
    }

    proptest! {
        #[test]
        fn invariants_survive_any_sequence(ops in prop::collection::vec(arb_op(), 0..40)) {
            let mut profile = Profile::new();
            for op in ops {
                match op {
                    Op::Add(i) => { profile.add_subject(NAMES[i]); }
                    Op::Remove(i) => { profile.remove_subject(NAMES[i]); }
                    Op::Toggle(i) => { profile.toggle_favorite(NAMES[i]); }
                    Op::Grade(i, g) => { profile.set_grade(NAMES[i], Grade::ALL[g]); }
                }
                prop_assert!(invariants_hold(&profile));
                prop_assert_eq!(profile.grades().count(), profile.subject_count());
            }
        }
    }
}
