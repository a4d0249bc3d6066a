//! Exit codes for the mt-core CLI.
//!
//! Exit codes communicate the run outcome without requiring output
//! parsing and are a stable contract for scripts wrapping the binary.

use mt_common::{Error, ErrorCategory};

/// Exit codes for mt-core runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Evaluation completed and the report was written.
    Success = 0,

    /// Invalid arguments or configuration.
    UsageError = 2,

    /// A corpus could not be loaded.
    InputError = 3,

    /// The model could not serve the request (untrained, or the test
    /// corpus carries a label never seen in training).
    ModelError = 4,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Success
    }

    /// Map a pipeline error to the exit code its category dictates.
    pub fn from_error(error: &Error) -> ExitCode {
        match error.category() {
            ErrorCategory::Input | ErrorCategory::Io => ExitCode::InputError,
            ErrorCategory::Model => ExitCode::ModelError,
        }
    }

    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Success => "OK",
            ExitCode::UsageError => "ERR_USAGE",
            ExitCode::InputError => "ERR_INPUT",
            ExitCode::ModelError => "ERR_MODEL",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
