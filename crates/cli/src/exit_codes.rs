//! CLI Exit Code Registry
//!
//! Single source of truth for exit codes. They are part of the shell
//! contract; the external scheduler keys off them.
//!
//! | Code | Meaning                                             |
//! |------|-----------------------------------------------------|
//! | 0    | Run completed (per-candidate errors do not change this) |
//! | 1    | General error (unspecified)                         |
//! | 2    | CLI usage error (clap)                              |
//! | 10   | Connection configuration absent                     |
//! | 11   | Store unreachable while listing candidates          |

/// Run completed. The summary may still show per-candidate errors;
/// those are data problems, not run failures.
pub const EXIT_SUCCESS: u8 = 0;

/// SUPABASE_URL / SUPABASE_ANON_KEY missing or empty. Nothing was read
/// or written.
pub const EXIT_CONFIG_MISSING: u8 = 10;

/// The candidate listing failed: the source of truth is unreachable.
/// No candidate was processed.
pub const EXIT_STORE_UNAVAILABLE: u8 = 11;
