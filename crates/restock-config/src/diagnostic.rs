// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostic error type and rendering for configuration failures.
//!
//! Figment deserialization errors and post-deserialization validation
//! failures are both surfaced as [`ConfigError`] values and rendered via
//! miette so the operator sees every problem in one pass.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error suitable for diagnostic rendering.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// Figment could not deserialize the merged configuration (unknown key,
    /// wrong type, malformed TOML).
    #[error("{message}")]
    #[diagnostic(
        code(restock::config::parse),
        help("check restock.toml and RESTOCK_* environment variables")
    )]
    Parse {
        /// Figment's description of the failure, including the key path.
        message: String,
    },

    /// A semantic validation failure on an otherwise well-formed value.
    #[error("validation error: {message}")]
    #[diagnostic(code(restock::config::validation))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },
}

/// Convert a figment error into one [`ConfigError`] per underlying problem.
///
/// Figment batches multiple deserialization failures into a single error
/// value; unpacking them keeps the collect-all-errors contract that
/// validation already follows.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    err.into_iter()
        .map(|e| ConfigError::Parse {
            message: e.to_string(),
        })
        .collect()
}

/// Render configuration errors to stderr, one diagnostic per error.
pub fn render_errors(errors: &[ConfigError]) {
    for err in errors {
        eprintln!("error[{}]: {err}", code_of(err));
        if let Some(help) = err.help() {
            eprintln!("  help: {help}");
        }
    }
    eprintln!(
        "restock: {} configuration error{} found",
        errors.len(),
        if errors.len() == 1 { "" } else { "s" }
    );
}

fn code_of(err: &ConfigError) -> String {
    err.code()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "restock::config".to_string())
}
