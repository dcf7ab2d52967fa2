//! Async glue between the wizard and a [`Classifier`].

use std::sync::Arc;
use tokio::sync::Mutex;

use super::{PendingClassification, Wizard};
use crate::events::Event;
use crate::gateway::Classifier;

/// A wizard shared between the task awaiting the service and whatever
/// keeps handling user input meanwhile.
pub type SharedWizard = Arc<Mutex<Wizard>>;

/// Send a pending request and apply its outcome.
pub async fn resolve<C: Classifier>(
    wizard: &mut Wizard,
    classifier: &C,
    pending: PendingClassification,
) -> Event {
    let result = classifier.classify(&pending.request).await;
    wizard.complete_classification(pending.token, result)
}

/// Like [`resolve`], but the lock is only held to apply the outcome, so the
/// user can navigate (for example back to the academic step) while the
/// request is in flight. A response for an abandoned request is discarded.
pub async fn resolve_shared<C: Classifier>(
    wizard: &SharedWizard,
    classifier: &C,
    pending: PendingClassification,
) -> Event {
    let result = classifier.classify(&pending.request).await;
    wizard.lock().await.complete_classification(pending.token, result)
}
