//! `sitelink-recon`: plan-to-site linkage repair engine.
//!
//! Pure engine crate: reaches storage only through the [`store::RecordStore`]
//! trait, returns a per-run report. No HTTP or CLI dependencies.

pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod patch;
pub mod report;
pub mod store;

pub use engine::run;
pub use error::ReconError;
pub use model::{Patch, PlanRecord, SiteField, SiteRecord};
pub use report::{CandidateEvent, Outcome, RunReport};
pub use store::{Predicate, RecordStore, StoreError, StoreErrorKind};
