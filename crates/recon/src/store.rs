use std::fmt;

use crate::model::{Patch, PlanRecord, SiteRecord};

/// Which plan rows a run scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// `cms_code` is set. Full repair pass: link and descriptive fields.
    CodePresent,
    /// `cms_code` is set and `cms_id` is null. Link repair only.
    MissingLink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// Credentials rejected by the store.
    Auth,
    /// Network failure, timeout, or the store itself erroring.
    Transport,
    /// The store rejected the request as malformed.
    Rejected,
}

/// A failed store operation. Fatal when raised by `select` (the candidate
/// list is the source of truth); per-candidate otherwise.
#[derive(Debug, Clone)]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub message: String,
}

impl StoreError {
    pub fn auth(message: impl Into<String>) -> Self {
        Self { kind: StoreErrorKind::Auth, message: message.into() }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self { kind: StoreErrorKind::Transport, message: message.into() }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self { kind: StoreErrorKind::Rejected, message: message.into() }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            StoreErrorKind::Auth => write!(f, "store auth failed: {}", self.message),
            StoreErrorKind::Transport => write!(f, "store unavailable: {}", self.message),
            StoreErrorKind::Rejected => write!(f, "store rejected request: {}", self.message),
        }
    }
}

impl std::error::Error for StoreError {}

/// Record access the engine needs. The production implementation speaks
/// PostgREST; tests use an in-memory table.
///
/// `select` must return candidates in a stable order, and `find_by_key` is
/// an exact, case-sensitive key query whose return order pins the
/// ambiguity tie-break.
pub trait RecordStore {
    fn select(&self, predicate: &Predicate) -> Result<Vec<PlanRecord>, StoreError>;
    fn find_by_key(&self, code: &str) -> Result<Vec<SiteRecord>, StoreError>;
    fn update(&self, id: i64, patch: &Patch) -> Result<(), StoreError>;
}
