//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                          |
//! |------|--------------------------------------------------|
//! | 0    | Success                                          |
//! | 1    | General error (a command addressed a bad cell)   |
//! | 2    | Usage error (bad arguments, unparsable command)  |
//! | 3    | Import failure (unreadable or invalid document)  |
//! | 4    | Export failure (document could not be written)   |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - an editor command was rejected (e.g. out-of-range cell).
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unknown script command.
pub const EXIT_USAGE: u8 = 2;

/// The input document could not be read or failed validation.
pub const EXIT_IMPORT: u8 = 3;

/// The output document could not be written.
pub const EXIT_EXPORT: u8 = 4;
