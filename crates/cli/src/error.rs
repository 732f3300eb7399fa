//! CLI error type and process exit codes.
//!
//! - 0:  success
//! - 2:  argument parse error (reported by clap)
//! - 10: picker error (bad atlas, bad dimensions, unknown vision mode)
//! - 11: I/O error (atlas or PNG write, file read)
//! - 12: input error (bad color, bad palette, bad JSON params)
//! - 13: serialization error

use lab_picker_core::PickerError;
use std::fmt;

/// A failed command. Each variant has its own exit code.
#[derive(Debug)]
pub enum CliError {
    Picker(PickerError),
    Io(String),
    Input(String),
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Picker(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Picker(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<PickerError> for CliError {
    fn from(e: PickerError) -> Self {
        match e {
            PickerError::Io(msg) => CliError::Io(msg),
            PickerError::InvalidColor(msg) | PickerError::InvalidPalette(msg) => {
                CliError::Input(msg)
            }
            other => CliError::Picker(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
