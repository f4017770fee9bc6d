use launchkit_utils::error::{
    ArchiveError, ConfigError, GatewayError, LaunchKitError, ValidationError, WorkflowError,
};
use launchkit_utils::types::Stage;
use std::time::Duration;

use crate::ExitCode;
use crate::cli::run::report_error;

fn code_for(err: LaunchKitError) -> ExitCode {
    report_error(&anyhow::Error::from(err), "test")
}

#[test]
fn test_library_errors_keep_their_exit_codes() {
    assert_eq!(
        code_for(ValidationError::MissingEmailPick.into()),
        ExitCode::VALIDATION
    );
    assert_eq!(
        code_for(
            ConfigError::InvalidValue {
                key: "brief".into(),
                value: "bad".into()
            }
            .into()
        ),
        ExitCode::CLI_ARGS
    );
    assert_eq!(
        code_for(
            WorkflowError::StageFailed {
                stage: Stage::PlanRunning,
                source: GatewayError::Timeout {
                    duration: Duration::from_secs(600)
                },
            }
            .into()
        ),
        ExitCode::STAGE_TIMEOUT
    );
    assert_eq!(
        code_for(
            ArchiveError::Locked {
                path: "kits/alice.lock".into(),
                reason: "held".into()
            }
            .into()
        ),
        ExitCode::LOCK_HELD
    );
}

#[test]
fn test_context_does_not_hide_library_error() {
    let err = anyhow::Error::from(LaunchKitError::from(ValidationError::MissingEmailPick))
        .context("while refining");
    assert_eq!(report_error(&err, "run"), ExitCode::VALIDATION);
}

#[test]
fn test_other_errors_are_internal() {
    let err = anyhow::anyhow!("disk on fire");
    assert_eq!(report_error(&err, "preview"), ExitCode::INTERNAL);
}
