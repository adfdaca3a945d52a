//! Exit codes for the CLI
//!
//! | Code | Constant | Meaning |
//! |------|----------|---------|
//! | 0 | `SUCCESS` | Every file was processed (changed or skipped) |
//! | 1 | `FILES_FAILED` | At least one file was not found or could not be written |
//! | 2 | `ERROR` | Configuration or runtime error, nothing was processed |
//! | 3 | `INVALID_ARGS` | Unknown migration |
//!
//! Argument parsing errors detected by clap itself keep clap's own code (2).

use crate::error::CodemodError;

/// Run completed and every file was processed.
pub const SUCCESS: i32 = 0;

/// Run completed but some files were NotFound or Failed.
pub const FILES_FAILED: i32 = 1;

/// Configuration or runtime error.
pub const ERROR: i32 = 2;

/// Invalid arguments, e.g. an unknown migration name.
pub const INVALID_ARGS: i32 = 3;

/// Exit code for an error returned by a command handler
pub fn for_error(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<CodemodError>() {
        Some(CodemodError::UnknownMigration { .. }) => INVALID_ARGS,
        _ => ERROR,
    }
}
