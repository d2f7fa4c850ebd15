//! CLI Exit Code Registry
//!
//! Single source of truth for revdiff exit codes. Exit codes are part of the
//! shell contract — scripts rely on them.
//!
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! | 0    | Success                                  |
//! | 1    | General error (unspecified)              |
//! | 2    | Usage error (clap also exits with 2)     |
//! | 3    | Input workbook could not be decoded      |
//! | 4    | Annotated workbook could not be encoded  |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, conflicting flags.
pub const EXIT_USAGE: u8 = 2;

/// Input bytes are not a valid workbook, or a sheet cannot be read.
pub const EXIT_DECODE: u8 = 3;

/// Annotated workbook could not be serialized or written.
pub const EXIT_ENCODE: u8 = 4;
