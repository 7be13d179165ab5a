use std::process::ExitCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ExitStatus {
    Success,
    Error,
}

/// How a command finished, plus an optional line for the user.
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub struct Exit {
    status: ExitStatus,
    message: Option<String>,
}

impl Exit {
    pub fn success() -> Self {
        Self {
            status: ExitStatus::Success,
            message: None,
        }
    }

    pub fn error() -> Self {
        Self {
            status: ExitStatus::Error,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Print the message, if any, and convert to a process exit code.
    ///
    /// Messages go to stderr so stdout stays machine-readable. `--quiet` hides
    /// success messages only.
    pub fn report(self, quiet: bool) -> ExitCode {
        match (self.status, self.message) {
            (ExitStatus::Success, Some(message)) if !quiet => eprintln!("{message}"),
            (ExitStatus::Error, Some(message)) => eprintln!("{message}"),
            _ => {}
        }

        match self.status {
            ExitStatus::Success => ExitCode::SUCCESS,
            ExitStatus::Error => ExitCode::FAILURE,
        }
    }
}
