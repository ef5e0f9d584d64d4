//! `loanpkg execute` - run one contract against a scope file.
//!
//! # Exit Codes
//!
//! - 0: Success; the update (or the next scope with `--apply`) is printed
//! - 1: The contract rejected the request (invalid input or state)
//! - 2: Error (unreadable files, unknown contract, malformed values)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use loanpkg_core::{ContractError, ContractRegistry, EngineConfig, LoanScope};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Exit codes for the execute command.
pub mod exit_codes {
    /// Success exit code.
    pub const SUCCESS: u8 = 0;
    /// The contract rejected the request.
    pub const REJECTED: u8 = 1;
    /// General error exit code.
    pub const ERROR: u8 = 2;
}

/// Arguments for `loanpkg execute`.
#[derive(Debug, Args)]
pub struct ExecuteArgs {
    /// Contract name, as listed by `loanpkg contracts`.
    #[arg(long)]
    pub contract: String,

    /// JSON file holding the prior scope. An empty scope when omitted.
    #[arg(long)]
    pub scope: Option<PathBuf>,

    /// JSON file holding the contract input.
    #[arg(long)]
    pub input: PathBuf,

    /// Print the scope after applying the update instead of the update.
    #[arg(long)]
    pub apply: bool,

    /// Evaluation time (RFC 3339). Defaults to the current time.
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,

    /// Report errors as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Error response for JSON output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    violation_count: Option<usize>,
}

/// Runs the execute command, returning an appropriate exit code.
pub fn run_execute(args: &ExecuteArgs, config: &EngineConfig) -> u8 {
    match execute(args, config) {
        Ok(Ok(output)) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
            );
            exit_codes::SUCCESS
        },
        Ok(Err(err)) => handle_contract_error(args.json, &err),
        Err(err) => output_error(
            args.json,
            "error",
            &format!("{err:#}"),
            None,
            exit_codes::ERROR,
        ),
    }
}

/// Loads the scope and input and runs the contract.
///
/// The outer result carries harness failures, the inner one the contract's
/// own verdict.
fn execute(
    args: &ExecuteArgs,
    config: &EngineConfig,
) -> Result<Result<serde_json::Value, ContractError>> {
    let scope: LoanScope = match &args.scope {
        Some(path) => read_json(path, "scope")?,
        None => LoanScope::default(),
    };
    let input: serde_json::Value = read_json(&args.input, "input")?;
    let env = config.env_at(args.now.unwrap_or_else(Utc::now));
    tracing::debug!(contract = %args.contract, now = %env.now, "loaded scope and input");

    let registry = ContractRegistry::with_defaults();
    let update = match registry.execute(&args.contract, &scope, input, env) {
        Ok(update) => update,
        Err(err) => return Ok(Err(err)),
    };

    let output = if args.apply {
        serde_json::to_value(scope.apply(update))
    } else {
        serde_json::to_value(update)
    }
    .context("failed to encode contract output")?;
    Ok(Ok(output))
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {what} in {}", path.display()))
}

fn handle_contract_error(json_output: bool, error: &ContractError) -> u8 {
    match error {
        ContractError::Violation {
            violation_count, ..
        } => output_error(
            json_output,
            "invalid_input",
            &error.to_string(),
            Some(*violation_count),
            exit_codes::REJECTED,
        ),
        ContractError::IllegalState { .. } => output_error(
            json_output,
            "illegal_state",
            &error.to_string(),
            None,
            exit_codes::REJECTED,
        ),
        ContractError::UnknownContract { .. } => output_error(
            json_output,
            "unknown_contract",
            &error.to_string(),
            None,
            exit_codes::ERROR,
        ),
        _ => output_error(
            json_output,
            "unexpected_state",
            &error.to_string(),
            None,
            exit_codes::ERROR,
        ),
    }
}

/// Output an error in the appropriate format.
fn output_error(
    json_output: bool,
    code: &str,
    message: &str,
    violation_count: Option<usize>,
    exit_code: u8,
) -> u8 {
    if json_output {
        let error = ErrorResponse {
            code: code.to_string(),
            message: message.to_string(),
            violation_count,
        };
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&error).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        eprintln!("Error: {message}");
    }
    exit_code
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;
    use tempfile::NamedTempFile;

    use super::*;

    fn json_file(value: &serde_json::Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(value.to_string().as_bytes()).unwrap();
        file
    }

    fn args(contract: &str, scope: Option<&NamedTempFile>, input: &NamedTempFile) -> ExecuteArgs {
        ExecuteArgs {
            contract: contract.to_string(),
            scope: scope.map(|file| file.path().to_path_buf()),
            input: input.path().to_path_buf(),
            apply: false,
            now: Some("2024-06-01T12:00:00Z".parse().unwrap()),
            json: true,
        }
    }

    fn document(n: u32) -> serde_json::Value {
        json!({
            "id": { "value": format!("00000000-0000-4000-8000-{n:012}") },
            "fileName": format!("doc-{n}.pdf"),
            "uri": format!("gs://loan-docs/doc-{n}"),
            "contentType": "application/pdf",
            "documentType": "APPRAISAL",
            "checksum": { "checksum": format!("checksum-{n}"), "algorithm": "SHA-512" }
        })
    }

    #[test]
    fn test_execute_prints_update() {
        let input = json_file(&json!([document(1)]));
        let output = execute(&args("append-loan-documents", None, &input), &EngineConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(output["record"], "documents");
        assert_eq!(output["value"][0]["uri"], "gs://loan-docs/doc-1");
    }

    #[test]
    fn test_execute_apply_prints_next_scope() {
        let scope = json_file(&json!({ "documents": [document(1)] }));
        let input = json_file(&json!([document(2)]));
        let mut args = args("append-loan-documents", Some(&scope), &input);
        args.apply = true;

        let output = execute(&args, &EngineConfig::default()).unwrap().unwrap();
        let documents = output["documents"].as_array().unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[1]["uri"], "gs://loan-docs/doc-2");
    }

    #[test]
    fn test_rejection_maps_to_rejected_exit_code() {
        let input = json_file(&json!([]));
        let args = args("append-loan-documents", None, &input);
        let err = execute(&args, &EngineConfig::default()).unwrap().unwrap_err();
        assert_eq!(err.violation_count(), Some(1));
        assert_eq!(run_execute(&args, &EngineConfig::default()), exit_codes::REJECTED);
    }

    #[test]
    fn test_unknown_contract_and_missing_file_are_errors() {
        let input = json_file(&json!({}));
        let unknown = args("delete-loan", None, &input);
        assert_eq!(run_execute(&unknown, &EngineConfig::default()), exit_codes::ERROR);

        let mut missing = args("append-loan-documents", None, &input);
        missing.scope = Some(PathBuf::from("/nonexistent/scope.json"));
        let err = execute(&missing, &EngineConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read scope"));
    }
}
