//! Wizard persistence between invocations and the blocking classification call.

use coursematch_core::gateway::HttpGateway;
use coursematch_core::wizard::resolve;
use coursematch_core::{Config, Database, Event, GatewayError, PendingClassification, Wizard};
use serde::Serialize;
use std::error::Error;

use super::render;

const SESSION_KEY: &str = "wizard_session";

pub type CliResult<T = ()> = Result<T, Box<dyn Error>>;

fn load_wizard(db: &Database) -> Wizard {
    match db.kv_get(SESSION_KEY) {
        Ok(Some(json)) => match serde_json::from_str::<Wizard>(&json) {
            Ok(wizard) => return wizard,
            Err(e) => tracing::warn!(error = %e, "stored wizard session unreadable, starting over"),
        },
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "failed to read wizard session"),
    }
    Wizard::new()
}

fn save_wizard(db: &Database, wizard: &Wizard) -> CliResult {
    let json = serde_json::to_string(wizard)?;
    db.kv_set(SESSION_KEY, &json)?;
    Ok(())
}

/// Load the session, run `f` against it and save it again, even when `f`
/// fails after changing state (a failed classification keeps its error).
pub fn with_wizard<T>(f: impl FnOnce(&Database, &mut Wizard) -> CliResult<T>) -> CliResult<T> {
    let db = Database::open()?;
    let mut wizard = load_wizard(&db);
    let result = f(&db, &mut wizard);
    save_wizard(&db, &wizard)?;
    result
}

/// Read-only access to the stored session.
pub fn read_wizard() -> CliResult<Wizard> {
    let db = Database::open()?;
    Ok(load_wizard(&db))
}

pub fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread().enable_all().build()
}

pub fn gateway(config: &Config) -> CliResult<HttpGateway> {
    Ok(HttpGateway::from_config(&config.resolved_gateway())?)
}

fn prepare() -> Result<(Config, HttpGateway, tokio::runtime::Runtime), GatewayError> {
    let config = Config::load().map_err(|e| GatewayError::Setup(e.to_string()))?;
    let gateway = HttpGateway::from_config(&config.resolved_gateway())?;
    let runtime = runtime().map_err(|e| GatewayError::Setup(e.to_string()))?;
    Ok((config, gateway, runtime))
}

/// Send a pending classification and apply the outcome. Success is recorded
/// in the history and the results are printed; failure becomes the
/// command's error. Every path completes the pending request.
pub fn classify(db: &Database, wizard: &mut Wizard, pending: PendingClassification) -> CliResult {
    println!("Analyzing your profile...");

    let (event, force_debug) = match prepare() {
        Ok((config, gateway, runtime)) => (
            runtime.block_on(resolve(wizard, &gateway, pending)),
            config.display.show_debug,
        ),
        Err(e) => (wizard.complete_classification(pending.token, Err(e)), false),
    };

    match event {
        Event::ClassificationSucceeded { .. } => {
            let id = db.record_classification(wizard.profile(), wizard.recommendations())?;
            tracing::debug!(id, "classification stored in history");
            render::results(wizard, force_debug);
            Ok(())
        }
        Event::ClassificationFailed { message, .. } => {
            Err(format!("{message}\nRun `coursematch personality retry` to try again.").into())
        }
        other => {
            tracing::warn!(event = ?other, "classification response not applied");
            Ok(())
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
