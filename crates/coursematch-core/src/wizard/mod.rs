//! Wizard controller.
//!
//! Explicit state machine over the three wizard steps:
//!
//! ```text
//! AcademicInfo --submit_academic--> PersonalityTest --(classification ok)--> Results
//!      ^                                  |                                     |
//!      +--------------- back -------------+                                     |
//!      +------------------------------------ restart ---------------------------+
//! ```
//!
//! The personality step advances one question per answer. The last answer
//! runs the trait scorer, merges its result into the profile and issues a
//! classification request identified by a [`RequestToken`]. Only the active
//! token's response is applied; anything else is discarded, which is how a
//! request abandoned by navigating back is cancelled.
//!
//! Going back to the academic step discards the personality answers and the
//! profile's personality result, so re-entering always starts from an empty
//! answer sheet at question 0.

mod driver;

pub use driver::{resolve, resolve_shared, SharedWizard};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

use crate::error::{GatewayError, ValidationError, WizardError};
use crate::events::Event;
use crate::gateway::{ClassifyRequest, Recommendation};
use crate::personality::{self, default_questions, Answer, AnswerChoice, PersonalityResult, Question};
use crate::profile::Profile;

/// The visible wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    AcademicInfo,
    PersonalityTest,
    Results,
}

impl WizardStep {
    /// 1-based position shown in the progress indicator.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::AcademicInfo => 1,
            WizardStep::PersonalityTest => 2,
            WizardStep::Results => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::AcademicInfo => "Academic Info",
            WizardStep::PersonalityTest => "Personality",
            WizardStep::Results => "Results",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifies one classification submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A classification request the caller must send and then hand back to
/// [`Wizard::complete_classification`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingClassification {
    pub token: RequestToken,
    pub request: ClassifyRequest,
}

/// Result of answering a personality question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Moved to the question at `index`.
    NextQuestion { index: usize },
    /// Sheet complete: scored, merged into the profile, request issued.
    Submitted {
        personality: PersonalityResult,
        pending: PendingClassification,
    },
}

/// Serializable view of the whole wizard for status output.
#[derive(Debug, Clone, Serialize)]
pub struct WizardSnapshot {
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    pub step: WizardStep,
    pub step_number: u8,
    pub question_index: usize,
    pub total_questions: usize,
    pub answered_questions: usize,
    pub progress_pct: f64,
    pub current_question: Option<Question>,
    pub loading: bool,
    pub error: Option<String>,
    pub show_debug: bool,
    pub profile: Profile,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wizard {
    session_id: String,
    started_at: DateTime<Utc>,
    step: WizardStep,
    profile: Profile,
    #[serde(skip, default = "default_questions")]
    questions: Vec<Question>,
    answers: IndexMap<String, AnswerChoice>,
    question_index: usize,
    error: Option<String>,
    /// Never persisted: a request cannot outlive the process that sent it.
    #[serde(skip)]
    in_flight: Option<RequestToken>,
    /// Survives restart so a stale response can never match a new request.
    next_token: u64,
    recommendations: Vec<Recommendation>,
    show_debug: bool,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    /// Start a session on the academic step with an empty profile.
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            step: WizardStep::AcademicInfo,
            profile: Profile::new(),
            questions: default_questions(),
            answers: IndexMap::new(),
            question_index: 0,
            error: None,
            in_flight: None,
            next_token: 1,
            recommendations: Vec::new(),
            show_debug: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    /// The question awaiting an answer, only while on the personality step.
    pub fn current_question(&self) -> Option<&Question> {
        if self.step != WizardStep::PersonalityTest {
            return None;
        }
        self.questions.get(self.question_index)
    }

    pub fn answer_for(&self, question_id: &str) -> Option<AnswerChoice> {
        self.answers.get(question_id).copied()
    }

    pub fn answered_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| self.answers.contains_key(&q.id))
            .count()
    }

    /// Percent through the question list, counting the current question.
    pub fn progress_pct(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        (self.question_index + 1) as f64 / self.questions.len() as f64 * 100.0
    }

    /// Last classification failure, shown on the personality step.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while a classification request is awaiting its response.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn active_token(&self) -> Option<RequestToken> {
        self.in_flight
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    pub fn show_debug(&self) -> bool {
        self.show_debug
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            session_id: self.session_id.clone(),
            started_at: self.started_at,
            step: self.step,
            step_number: self.step.number(),
            question_index: self.question_index,
            total_questions: self.questions.len(),
            answered_questions: self.answered_count(),
            progress_pct: self.progress_pct(),
            current_question: self.current_question().cloned(),
            loading: self.is_loading(),
            error: self.error.clone(),
            show_debug: self.show_debug,
            profile: self.profile.clone(),
            recommendations: self.recommendations.clone(),
        }
    }

    // ── Academic step ────────────────────────────────────────────────

    /// Mutable access to the profile; only while on the academic step.
    pub fn edit_profile(&mut self) -> Result<&mut Profile, WizardError> {
        self.expect_step(WizardStep::AcademicInfo)?;
        Ok(&mut self.profile)
    }

    /// Leave the academic step. Rejected while no subject has been added.
    pub fn submit_academic(&mut self) -> Result<Event, WizardError> {
        self.expect_step(WizardStep::AcademicInfo)?;
        if self.profile.subject_count() == 0 {
            debug!("academic step rejected: no subjects");
            return Err(ValidationError::NoSubjects.into());
        }
        self.question_index = 0;
        self.error = None;
        Ok(self.transition(WizardStep::PersonalityTest))
    }

    // ── Personality step ─────────────────────────────────────────────

    /// Record an answer to the current question, overwriting any earlier
    /// answer. Answering the last question submits the profile.
    pub fn answer(&mut self, choice: AnswerChoice) -> Result<AnswerOutcome, WizardError> {
        self.expect_step(WizardStep::PersonalityTest)?;
        self.ensure_idle()?;

        let Some(question) = self.questions.get(self.question_index) else {
            return Err(self.incomplete().into());
        };
        let question_id = question.id.clone();
        debug!(question_id = %question_id, index = self.question_index, choice = choice.raw(), "answer recorded");
        self.answers.insert(question_id, choice);

        if self.question_index + 1 < self.questions.len() {
            self.question_index += 1;
            return Ok(AnswerOutcome::NextQuestion {
                index: self.question_index,
            });
        }

        if let Some(missing) = self.first_unanswered() {
            self.question_index = missing;
            return Ok(AnswerOutcome::NextQuestion { index: missing });
        }

        let personality = self.score_answers();
        let pending = self.begin_classification();
        Ok(AnswerOutcome::Submitted { personality, pending })
    }

    /// Step back one question, keeping the answers given so far.
    pub fn previous_question(&mut self) -> Result<Event, WizardError> {
        self.expect_step(WizardStep::PersonalityTest)?;
        self.ensure_idle()?;
        if self.question_index == 0 {
            return Err(WizardError::AtFirstQuestion);
        }
        self.question_index -= 1;
        Ok(Event::QuestionRevisited {
            index: self.question_index,
            at: Utc::now(),
        })
    }

    /// Re-issue the classification for a complete answer sheet, typically
    /// after a failure.
    pub fn retry(&mut self) -> Result<PendingClassification, WizardError> {
        self.expect_step(WizardStep::PersonalityTest)?;
        self.ensure_idle()?;
        if self.first_unanswered().is_some() {
            return Err(self.incomplete().into());
        }
        self.score_answers();
        Ok(self.begin_classification())
    }

    /// Return to the academic step. Allowed while a request is in flight;
    /// its response will be discarded.
    pub fn back(&mut self) -> Result<Event, WizardError> {
        self.expect_step(WizardStep::PersonalityTest)?;
        if let Some(token) = self.in_flight.take() {
            debug!(token = token.value(), "abandoning in-flight classification");
        }
        self.error = None;
        self.show_debug = false;
        self.answers.clear();
        self.question_index = 0;
        self.profile.clear_personality();
        Ok(self.transition(WizardStep::AcademicInfo))
    }

    /// Apply the response for `token`. Responses for any request other than
    /// the one currently awaited are discarded without touching state.
    pub fn complete_classification(
        &mut self,
        token: RequestToken,
        result: Result<Vec<Recommendation>, GatewayError>,
    ) -> Event {
        let at = Utc::now();
        if self.in_flight != Some(token) || self.step != WizardStep::PersonalityTest {
            warn!(token = token.value(), step = %self.step, "discarding stale classification response");
            return Event::ClassificationDiscarded {
                token: token.value(),
                at,
            };
        }
        self.in_flight = None;

        match result {
            Ok(recommendations) => {
                let recommendation_count = recommendations.len();
                info!(token = token.value(), recommendation_count, "classification applied");
                self.recommendations = recommendations;
                self.error = None;
                self.step = WizardStep::Results;
                Event::ClassificationSucceeded {
                    token: token.value(),
                    recommendation_count,
                    at,
                }
            }
            Err(e) => {
                let message = e.to_string();
                warn!(token = token.value(), error = %message, "classification failed");
                self.error = Some(message.clone());
                Event::ClassificationFailed {
                    token: token.value(),
                    message,
                    at,
                }
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Flip the debug panel; returns the new setting.
    pub fn toggle_debug(&mut self) -> bool {
        self.show_debug = !self.show_debug;
        self.show_debug
    }

    // ── Results step ─────────────────────────────────────────────────

    /// Full reset back to an empty academic step.
    pub fn restart(&mut self) -> Result<Event, WizardError> {
        self.expect_step(WizardStep::Results)?;
        let next_token = self.next_token;
        *self = Self::new();
        self.next_token = next_token;
        debug!(session_id = %self.session_id, "wizard restarted");
        Ok(Event::WizardRestarted { at: Utc::now() })
    }

    // ── Internals ────────────────────────────────────────────────────

    fn expect_step(&self, expected: WizardStep) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    fn ensure_idle(&self) -> Result<(), WizardError> {
        match self.in_flight {
            Some(_) => Err(WizardError::ClassificationInFlight),
            None => Ok(()),
        }
    }

    fn transition(&mut self, to: WizardStep) -> Event {
        let from = self.step;
        self.step = to;
        debug!(%from, %to, "wizard step changed");
        Event::StepChanged {
            from,
            to,
            at: Utc::now(),
        }
    }

    fn first_unanswered(&self) -> Option<usize> {
        self.questions
            .iter()
            .position(|q| !self.answers.contains_key(&q.id))
    }

    fn incomplete(&self) -> ValidationError {
        ValidationError::IncompleteAnswers {
            answered: self.answered_count(),
            total: self.questions.len(),
        }
    }

    /// Run the trait scorer over the answer sheet and merge the result.
    fn score_answers(&mut self) -> PersonalityResult {
        let sheet: Vec<Answer> = self
            .questions
            .iter()
            .filter_map(|q| self.answers.get(&q.id).map(|c| Answer::new(q.id.clone(), *c)))
            .collect();
        let result = personality::score(&sheet, &self.questions);
        debug!(personality_type = %result.personality_type, "personality scored");
        self.profile.set_personality(result);
        result
    }

    fn begin_classification(&mut self) -> PendingClassification {
        let token = RequestToken(self.next_token);
        self.next_token += 1;
        self.in_flight = Some(token);
        self.error = None;
        info!(token = token.value(), "classification requested");
        PendingClassification {
            token,
            request: ClassifyRequest::from_profile(&self.profile),
        }
    }
}
