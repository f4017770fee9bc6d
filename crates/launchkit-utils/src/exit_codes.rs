//! Exit code constants for the launchkit CLI.
//!
//! | Code | Constant | Description |
//! |------|----------|-------------|
//! | 0 | `SUCCESS` | Operation completed successfully |
//! | 1 | `INTERNAL` | General/internal failure |
//! | 2 | `CLI_ARGS` | Invalid CLI arguments or configuration |
//! | 3 | `VALIDATION` | Brief, index or pick validation failed |
//! | 4 | `ILLEGAL_STATE` | Event not allowed in the current stage |
//! | 9 | `LOCK_HELD` | Another process holds the archive lock |
//! | 10 | `STAGE_TIMEOUT` | Remote stage timed out |
//! | 70 | `STAGE_FAILURE` | Remote stage or preview failed |
//! | 74 | `ARCHIVE_FAILURE` | Kit archive could not be read or written |

/// Process exit code.
///
/// The numeric values are part of the CLI contract.
///
/// ```rust
/// use launchkit_utils::exit_codes::ExitCode;
///
/// assert_eq!(ExitCode::STAGE_FAILURE.as_i32(), 70);
/// assert_eq!(ExitCode::from_i32(0), ExitCode::SUCCESS);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Success - operation completed successfully
    pub const SUCCESS: ExitCode = ExitCode(0);

    /// Internal error - general failure
    pub const INTERNAL: ExitCode = ExitCode(1);

    /// CLI arguments error - invalid arguments or configuration
    pub const CLI_ARGS: ExitCode = ExitCode(2);

    /// Validation error - the brief, an index or a pick set was rejected
    pub const VALIDATION: ExitCode = ExitCode(3);

    /// Illegal state - the event is not accepted by the current stage
    pub const ILLEGAL_STATE: ExitCode = ExitCode(4);

    /// Lock held - another process is writing the same kit collection
    pub const LOCK_HELD: ExitCode = ExitCode(9);

    /// Stage timeout - the remote stage did not answer in time
    pub const STAGE_TIMEOUT: ExitCode = ExitCode(10);

    /// Stage failure - the remote stage or preview service failed
    pub const STAGE_FAILURE: ExitCode = ExitCode(70);

    /// Archive failure - the kit archive could not be read or written
    pub const ARCHIVE_FAILURE: ExitCode = ExitCode(74);

    /// Get the numeric exit code value for `std::process::exit()`.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Create an ExitCode from a raw i32 value.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        ExitCode(code)
    }
}

impl From<i32> for ExitCode {
    fn from(code: i32) -> Self {
        ExitCode(code)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}
