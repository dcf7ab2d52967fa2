//! # Coursematch Core Library
//!
//! This library provides the core logic for Coursematch, a guided wizard
//! that collects a student's academic profile, scores a short personality
//! questionnaire and asks a remote classification service for course
//! recommendations. Every operation is available through the standalone
//! `coursematch` CLI, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Profile**: subjects with grades, favorites, hobbies and interests
//! - **Personality**: the fixed question bank and the trait scorer that
//!   reduces answers to a four-letter type
//! - **Wizard**: a three-step state machine that owns the profile and
//!   single-flight classification requests
//! - **Gateway**: the HTTP boundary to the classification service
//! - **Storage**: SQLite persistence and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Wizard`]: Step state machine
//! - [`HttpGateway`]: Classification service client
//! - [`Database`]: Session and history persistence
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod gateway;
pub mod personality;
pub mod profile;
pub mod storage;
pub mod wizard;

pub use error::{ConfigError, CoreError, DatabaseError, GatewayError, ValidationError, WizardError};
pub use events::Event;
pub use gateway::{Classifier, ClassifyRequest, HealthStatus, HttpGateway, Recommendation};
pub use personality::{AnswerChoice, PersonalityResult, PersonalityType, Question};
pub use profile::{Grade, Profile, COMMON_SUBJECTS};
pub use storage::{ClassificationRecord, Config, Database};
pub use wizard::{AnswerOutcome, PendingClassification, RequestToken, Wizard, WizardSnapshot, WizardStep};
