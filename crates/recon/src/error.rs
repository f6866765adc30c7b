use std::fmt;

use crate::store::StoreError;

/// A failure that aborts the whole run. Per-candidate failures never reach
/// this type; they are folded into the run report instead.
#[derive(Debug)]
pub enum ReconError {
    /// Listing the candidates failed; nothing was processed.
    Listing(StoreError),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Listing(e) => write!(f, "candidate listing failed: {e}"),
        }
    }
}

impl std::error::Error for ReconError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Listing(e) => Some(e),
        }
    }
}
