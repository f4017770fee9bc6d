use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::types::Stage;

/// Library-level error type with context and user-friendly reporting.
///
/// `LaunchKitError` aggregates the error enums of every launchkit component.
/// Use [`to_exit_code()`](Self::to_exit_code) to map it to a CLI exit code and
/// [`display_for_user()`](Self::display_for_user) to render it with context
/// and suggestions.
///
/// | Exit Code | Error Type |
/// |-----------|------------|
/// | 2 | Configuration errors |
/// | 3 | Validation errors (bad brief, bad index, incomplete picks) |
/// | 4 | Event not allowed in the current stage |
/// | 10 | Remote stage timed out |
/// | 70 | Remote stage or preview failure |
/// | 74 | Archive failure |
/// | 1 | Other errors |
///
/// Library code returns `LaunchKitError` and does NOT call `std::process::exit()`.
#[derive(Error, Debug)]
pub enum LaunchKitError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Remote stage error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Preview error: {0}")]
    Preview(#[from] PreviewError),

    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for providing user-friendly error reporting with context and suggestions
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get contextual information about the error
    fn context(&self) -> Option<String>;

    /// Get suggested actions to resolve the error
    fn suggestions(&self) -> Vec<String>;

    /// Get the error category for grouping similar errors
    fn category(&self) -> ErrorCategory;
}

/// Categories of errors for grouping and handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    Workflow,
    RemoteStage,
    Preview,
    Storage,
    Concurrency,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Validation => write!(f, "Validation"),
            Self::Workflow => write!(f, "Workflow"),
            Self::RemoteStage => write!(f, "Remote Stage"),
            Self::Preview => write!(f, "Preview"),
            Self::Storage => write!(f, "Storage"),
            Self::Concurrency => write!(f, "Concurrency"),
        }
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration file: {0}")]
    InvalidFile(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found at {path}")]
    NotFound { path: String },

    #[error("Configuration discovery failed: {reason}")]
    DiscoveryFailed { reason: String },
}

impl UserFriendlyError for ConfigError {
    fn user_message(&self) -> String {
        match self {
            Self::InvalidFile(reason) => {
                format!("Configuration file has invalid format: {reason}")
            }
            Self::MissingRequired(key) => {
                format!("Required configuration '{key}' is missing")
            }
            Self::InvalidValue { key, value } => {
                format!("Configuration '{key}' has invalid value: {value}")
            }
            Self::NotFound { path } => format!("Configuration file not found: {path}"),
            Self::DiscoveryFailed { reason } => {
                format!("Failed to discover configuration: {reason}")
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::InvalidFile(_) => Some(
                "Configuration files must be valid TOML with [gateway], [preview], [archive] and [logging] sections."
                    .to_string(),
            ),
            Self::InvalidValue { key, .. } => Some(format!(
                "The '{key}' configuration option has specific format requirements."
            )),
            Self::NotFound { .. } => Some(
                "An explicitly requested configuration file must exist.".to_string(),
            ),
            Self::MissingRequired(_) | Self::DiscoveryFailed { .. } => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidFile(_) => vec![
                "Check the TOML syntax of .launchkit/config.toml".to_string(),
                "Run 'launchkit config' to see the effective configuration".to_string(),
            ],
            Self::InvalidValue { key, .. } if key.ends_with("base_url") => vec![
                "Use an absolute http:// or https:// URL".to_string(),
            ],
            Self::InvalidValue { key, .. } if key.ends_with("timeout_secs") => vec![
                "Use a timeout between 5 and 3600 seconds".to_string(),
            ],
            Self::InvalidValue { .. } | Self::MissingRequired(_) => vec![
                "Fix the value in .launchkit/config.toml or override it on the command line"
                    .to_string(),
            ],
            Self::NotFound { path } => vec![format!("Create {path} or drop the --config flag")],
            Self::DiscoveryFailed { .. } => vec![
                "Pass --config with an explicit path".to_string(),
            ],
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Configuration
    }
}

/// Input rejected before any state change or remote call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Brief field '{field}' must not be blank")]
    MissingBriefField { field: &'static str },

    #[error("{what} index {index} is out of range (have {len})")]
    IndexOutOfRange {
        what: String,
        index: usize,
        len: usize,
    },

    #[error("No pick for platform(s): {}", .missing.join(", "))]
    IncompletePicks { missing: Vec<String> },

    #[error("No email template pick")]
    MissingEmailPick,

    #[error("Pick refers to platform '{platform}' which is not in the draft")]
    UnknownPlatform { platform: String },
}

impl UserFriendlyError for ValidationError {
    fn user_message(&self) -> String {
        match self {
            Self::MissingBriefField { field } => {
                format!("The brief is missing '{field}'")
            }
            Self::IndexOutOfRange { what, index, len } => {
                format!("There is no {what} #{index}; choose one of 0..{len}")
            }
            Self::IncompletePicks { missing } => format!(
                "Choose a caption and an image for every platform (missing: {})",
                missing.join(", ")
            ),
            Self::MissingEmailPick => "Choose one email template".to_string(),
            Self::UnknownPlatform { platform } => {
                format!("The selected draft has no '{platform}' post")
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::MissingBriefField { .. } => Some(
                "productName, productDescription and usp are required to start a run.".to_string(),
            ),
            Self::IncompletePicks { .. } | Self::MissingEmailPick => Some(
                "Refinement narrows every candidate list to exactly one entry.".to_string(),
            ),
            _ => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingBriefField { field } => vec![format!("Add a value for '{field}'")],
            Self::IndexOutOfRange { .. } => {
                vec!["Pick an index from the listed candidates".to_string()]
            }
            Self::IncompletePicks { missing } => missing
                .iter()
                .map(|p| format!("Add --pick {p}=CAPTION:IMAGE"))
                .collect(),
            Self::MissingEmailPick => vec!["Add --email N".to_string()],
            Self::UnknownPlatform { .. } => {
                vec!["Only pick platforms listed in the selected draft".to_string()]
            }
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Validation
    }
}

/// Remote stage failures.
///
/// `EmptyResult` means the service answered with a well-formed but empty
/// payload. Everything else means the call failed or the payload was
/// malformed. All variants are retryable by the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Semantically empty response (e.g. no personas)
    #[error("Empty result: {0}")]
    EmptyResult(String),

    /// Connectivity failure, non-success status or malformed body
    #[error("Transport error: {0}")]
    Transport(String),

    /// 401 or 403 from the stage service
    #[error("Stage service authentication error: {0}")]
    ProviderAuth(String),

    /// 429 from the stage service
    #[error("Stage service quota exceeded: {0}")]
    ProviderQuota(String),

    /// 5xx after retries were exhausted
    #[error("Stage service outage: {0}")]
    ProviderOutage(String),

    #[error("Timeout after {duration:?}")]
    Timeout { duration: Duration },

    #[error("Misconfiguration: {0}")]
    Misconfiguration(String),

    /// A follow-up stage was called without a correlation token
    #[error("No correlation token for {stage}")]
    MissingToken { stage: Stage },
}

impl UserFriendlyError for GatewayError {
    fn user_message(&self) -> String {
        match self {
            Self::EmptyResult(msg) => format!("The stage service returned nothing usable: {msg}"),
            Self::Transport(msg) => format!("Could not talk to the stage service: {msg}"),
            Self::ProviderAuth(msg) => format!("The stage service rejected the request: {msg}"),
            Self::ProviderQuota(msg) => format!("The stage service is rate limiting: {msg}"),
            Self::ProviderOutage(msg) => format!("The stage service is unavailable: {msg}"),
            Self::Timeout { duration } => {
                format!("The stage service did not answer within {duration:?}")
            }
            Self::Misconfiguration(msg) => format!("Stage service configuration error: {msg}"),
            Self::MissingToken { stage } => {
                format!("Cannot run {stage} before market analysis has completed")
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::EmptyResult(_) => Some(
                "The service responded successfully but generated no candidates.".to_string(),
            ),
            Self::Transport(_) => Some(
                "The service could not be reached or sent a response in an unexpected shape."
                    .to_string(),
            ),
            Self::ProviderOutage(_) => {
                Some("Outages are usually temporary service disruptions.".to_string())
            }
            _ => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyResult(_) => vec![
                "Retry the stage; generation is not deterministic".to_string(),
                "Add more detail to the brief".to_string(),
            ],
            Self::Transport(_) | Self::ProviderOutage(_) => vec![
                "Check that the stage service is running at gateway.base_url".to_string(),
                "Retry with --verbose to see each HTTP attempt".to_string(),
            ],
            Self::ProviderAuth(_) => {
                vec!["Check the stage service credentials".to_string()]
            }
            Self::ProviderQuota(_) => vec!["Wait a few minutes and try again".to_string()],
            Self::Timeout { .. } => {
                vec!["Increase gateway.timeout_secs in configuration".to_string()]
            }
            Self::Misconfiguration(_) => {
                vec!["Check the [gateway] section of .launchkit/config.toml".to_string()]
            }
            Self::MissingToken { .. } => vec!["Start a new run".to_string()],
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Misconfiguration(_) => ErrorCategory::Configuration,
            Self::MissingToken { .. } => ErrorCategory::Workflow,
            _ => ErrorCategory::RemoteStage,
        }
    }
}

/// Failures of a single image preview request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreviewError {
    #[error("Image description is blank")]
    BlankDescription,

    #[error("Preview service returned an empty image")]
    EmptyImage,

    #[error("Preview transport error: {0}")]
    Transport(String),

    #[error("Preview timed out after {duration:?}")]
    Timeout { duration: Duration },

    #[error("Preview request was cancelled")]
    Cancelled,
}

impl UserFriendlyError for PreviewError {
    fn user_message(&self) -> String {
        format!("Image preview failed: {self}")
    }

    fn context(&self) -> Option<String> {
        Some("Preview failures only affect the one platform being previewed.".to_string())
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::BlankDescription => vec!["Pick an image description first".to_string()],
            Self::Cancelled => Vec::new(),
            _ => vec!["Refresh the preview".to_string()],
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Preview
    }
}

/// Kit archive failures.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Invalid user id '{0}'")]
    InvalidUserId(String),

    #[error("Kit collection at {path} is corrupt: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("Archive IO error at {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Archive at {path} is locked: {reason}")]
    Locked { path: String, reason: String },

    #[error("No kit with id '{id}'")]
    KitNotFound { id: String },
}

impl UserFriendlyError for ArchiveError {
    fn user_message(&self) -> String {
        match self {
            Self::InvalidUserId(id) => format!("'{id}' is not a usable user id"),
            Self::Corrupt { path, .. } => format!("Saved kits at {path} could not be read"),
            Self::Io { path, reason } => format!("Could not access {path}: {reason}"),
            Self::Locked { path, .. } => format!("Another process is writing {path}"),
            Self::KitNotFound { id } => format!("No saved kit '{id}'"),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Corrupt { reason, .. } => Some(reason.clone()),
            Self::InvalidUserId(_) => {
                Some("User ids must contain at least one letter or digit.".to_string())
            }
            _ => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidUserId(_) => vec!["Pass a different --user".to_string()],
            Self::Corrupt { path, .. } => {
                vec![format!("Move {path} aside; a new collection will be created")]
            }
            Self::Io { .. } => vec!["Check archive.state_dir permissions".to_string()],
            Self::Locked { .. } => vec!["Wait for the other process and retry".to_string()],
            Self::KitNotFound { .. } => vec!["Run 'launchkit kits list' to see ids".to_string()],
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Locked { .. } => ErrorCategory::Concurrency,
            Self::InvalidUserId(_) => ErrorCategory::Validation,
            _ => ErrorCategory::Storage,
        }
    }
}

/// Errors from the workflow state machine and its runtime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A remote stage is already running ({stage})")]
    Busy { stage: Stage },

    #[error("Event '{event}' is not allowed in stage {stage}")]
    IllegalTransition { stage: Stage, event: &'static str },

    #[error("Discarded stale '{event}' from run {generation} (current run {current})")]
    StaleResponse {
        event: &'static str,
        generation: u64,
        current: u64,
    },

    #[error("{stage} failed: {source}")]
    StageFailed {
        stage: Stage,
        #[source]
        source: GatewayError,
    },

    #[error("Runtime stopped before {stage} completed")]
    Disconnected { stage: Stage },
}

impl UserFriendlyError for WorkflowError {
    fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.user_message(),
            Self::Busy { stage } => format!("Please wait: {}", stage.description()),
            Self::IllegalTransition { stage, event } => {
                format!("Cannot {event} while in stage '{}'", stage.title())
            }
            Self::StaleResponse { .. } => {
                "A response from an earlier run arrived and was ignored".to_string()
            }
            Self::StageFailed { stage, source } => {
                format!("{} failed: {}", stage.title(), source.user_message())
            }
            Self::Disconnected { stage } => {
                format!("The run stopped while {} was in flight", stage.title())
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Validation(err) => err.context(),
            Self::StageFailed { source, .. } => source.context(),
            Self::IllegalTransition { .. } => Some(
                "Each stage only accepts the events that move it to the next stage.".to_string(),
            ),
            _ => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Validation(err) => err.suggestions(),
            Self::StageFailed { source, .. } => source.suggestions(),
            Self::IllegalTransition { .. } => {
                vec!["Reset the run to start over".to_string()]
            }
            _ => Vec::new(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
            Self::StageFailed { source, .. } => source.category(),
            Self::Busy { .. } | Self::StaleResponse { .. } => ErrorCategory::Concurrency,
            Self::IllegalTransition { .. } | Self::Disconnected { .. } => ErrorCategory::Workflow,
        }
    }
}

impl UserFriendlyError for LaunchKitError {
    fn user_message(&self) -> String {
        match self {
            Self::Config(err) => err.user_message(),
            Self::Workflow(err) => err.user_message(),
            Self::Validation(err) => err.user_message(),
            Self::Gateway(err) => err.user_message(),
            Self::Preview(err) => err.user_message(),
            Self::Archive(err) => err.user_message(),
            Self::Io(err) => format!("File system error: {err}"),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Config(err) => err.context(),
            Self::Workflow(err) => err.context(),
            Self::Validation(err) => err.context(),
            Self::Gateway(err) => err.context(),
            Self::Preview(err) => err.context(),
            Self::Archive(err) => err.context(),
            Self::Io(_) => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Config(err) => err.suggestions(),
            Self::Workflow(err) => err.suggestions(),
            Self::Validation(err) => err.suggestions(),
            Self::Gateway(err) => err.suggestions(),
            Self::Preview(err) => err.suggestions(),
            Self::Archive(err) => err.suggestions(),
            Self::Io(_) => vec!["Check file permissions and available disk space".to_string()],
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(err) => err.category(),
            Self::Workflow(err) => err.category(),
            Self::Validation(err) => err.category(),
            Self::Gateway(err) => err.category(),
            Self::Preview(err) => err.category(),
            Self::Archive(err) => err.category(),
            Self::Io(_) => ErrorCategory::Storage,
        }
    }
}

impl LaunchKitError {
    /// Render the error with context and suggestions for terminal output.
    ///
    /// ```text
    /// Error: <message>
    ///
    /// Context: <context>
    ///
    /// Suggestions:
    ///   • <suggestion>
    /// ```
    #[must_use]
    pub fn display_for_user(&self) -> String {
        let mut output = format!("Error: {}\n", self.user_message());

        if let Some(ctx) = self.context() {
            output.push_str(&format!("\nContext: {ctx}\n"));
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in suggestions {
                output.push_str(&format!("  • {suggestion}\n"));
            }
        }

        output
    }

    /// Map this error to the CLI exit code.
    #[must_use]
    pub fn to_exit_code(&self) -> crate::exit_codes::ExitCode {
        use crate::exit_codes::ExitCode;

        match self {
            Self::Config(_) => ExitCode::CLI_ARGS,
            Self::Validation(_) => ExitCode::VALIDATION,
            Self::Workflow(err) => match err {
                WorkflowError::Validation(_) => ExitCode::VALIDATION,
                WorkflowError::Busy { .. } | WorkflowError::IllegalTransition { .. } => {
                    ExitCode::ILLEGAL_STATE
                }
                WorkflowError::StageFailed { source, .. } => gateway_exit_code(source),
                WorkflowError::StaleResponse { .. } | WorkflowError::Disconnected { .. } => {
                    ExitCode::INTERNAL
                }
            },
            Self::Gateway(err) => gateway_exit_code(err),
            Self::Preview(PreviewError::BlankDescription) => ExitCode::VALIDATION,
            Self::Preview(_) => ExitCode::STAGE_FAILURE,
            Self::Archive(ArchiveError::InvalidUserId(_)) => ExitCode::VALIDATION,
            Self::Archive(ArchiveError::Locked { .. }) => ExitCode::LOCK_HELD,
            Self::Archive(_) => ExitCode::ARCHIVE_FAILURE,
            Self::Io(_) => ExitCode::INTERNAL,
        }
    }
}

fn gateway_exit_code(err: &GatewayError) -> crate::exit_codes::ExitCode {
    use crate::exit_codes::ExitCode;

    match err {
        GatewayError::Timeout { .. } => ExitCode::STAGE_TIMEOUT,
        GatewayError::Misconfiguration(_) => ExitCode::CLI_ARGS,
        _ => ExitCode::STAGE_FAILURE,
    }
}
