use std::process::ExitCode;

use super::commands::CommandResult;

/// How a fluentc run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Nothing to report.
    Success,
    /// `check` found errors or warnings.
    Failure,
    /// Bad config, unreadable input, strict parse failure or a message that
    /// cannot be resolved.
    Error,
}

impl ExitStatus {
    pub fn from_result(result: &CommandResult) -> Self {
        if result.exit_on_errors && result.error_count + result.warning_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::{CommandSummary, InitSummary};

    #[test]
    fn exit_code_values() {
        assert_eq!(ExitCode::from(ExitStatus::Success), ExitCode::from(0));
        assert_eq!(ExitCode::from(ExitStatus::Failure), ExitCode::from(1));
        assert_eq!(ExitCode::from(ExitStatus::Error), ExitCode::from(2));
    }

    #[test]
    fn warnings_fail_a_check() {
        let mut result =
            CommandResult::output(CommandSummary::Init(InitSummary { created: true }));
        assert_eq!(ExitStatus::from_result(&result), ExitStatus::Success);

        result.warning_count = 1;
        assert_eq!(ExitStatus::from_result(&result), ExitStatus::Success);

        result.exit_on_errors = true;
        assert_eq!(ExitStatus::from_result(&result), ExitStatus::Failure);
    }
}
