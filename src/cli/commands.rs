//! CLI command implementations
//!
//! One-shot commands open the configured store, run a single operation and
//! print one JSON line. `serve` owns the store for the life of the process.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::config::Config;
use crate::http_server::HttpServer;
use crate::observability::Logger;
use crate::package::{PackageForm, PackageStore, PackageSubmission};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};

/// Parse arguments and run the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = Config::load(&cli.config)?;
    run_command(&cli.command, &config)
}

/// Run a command, writing its JSON response (or error) to stdout.
pub fn run_command(command: &Command, config: &Config) -> CliResult<()> {
    let result = match command {
        Command::Serve => return serve(config),
        Command::List => Ok(list(config.storage.open_store().as_ref())),
        Command::Create => {
            read_request().and_then(|body| create(config.storage.open_store().as_ref(), &body))
        }
        Command::Show { id } => show(config.storage.open_store().as_ref(), id),
        Command::Delete { id } => delete(config.storage.open_store().as_ref(), id),
    };

    match result {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(&e)?;
            Err(e)
        }
    }
}

/// Start the HTTP server on a fresh tokio runtime.
pub fn serve(config: &Config) -> CliResult<()> {
    let store: Arc<dyn PackageStore> = config.storage.open_store();
    let server = HttpServer::new(config.server.clone(), store);

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to start runtime: {}", e)))?;

    runtime.block_on(server.start()).map_err(|e| {
        let reason = e.to_string();
        Logger::fatal("HTTP_SERVER_FAILED", &[("reason", reason.as_str())]);
        CliError::serve_failed(reason)
    })
}

pub fn list(store: &dyn PackageStore) -> Value {
    json!(store.list())
}

/// Validate a raw JSON submission and store it.
pub fn create(store: &dyn PackageStore, body: &Value) -> CliResult<Value> {
    let object = body
        .as_object()
        .ok_or_else(|| CliError::io_error("Submission must be a JSON object"))?;

    let form = PackageForm::from_json(object);
    let submission =
        PackageSubmission::try_from(&form).map_err(|errors| CliError::validation_failed(&errors))?;

    Ok(json!(store.create(submission)))
}

pub fn show(store: &dyn PackageStore, id: &str) -> CliResult<Value> {
    store
        .get_by_id(id)
        .map(|package| json!(package))
        .ok_or_else(|| CliError::not_found(id))
}

pub fn delete(store: &dyn PackageStore, id: &str) -> CliResult<Value> {
    if store.delete(id) {
        Ok(json!({ "id": id, "deleted": true }))
    } else {
        Err(CliError::not_found(id))
    }
}
