use serde::Serialize;

use crate::model::PlanRecord;

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub engine_version: String,
    pub run_at: String,
}

/// What happened to one candidate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum Outcome {
    /// One write was issued, touching exactly these columns.
    Updated { fields: Vec<String> },
    /// Nothing to fill; no write issued.
    Skipped,
    /// The code matched no site.
    Unmatched,
    /// Several sites share the code; the first in store order was used.
    /// Warning only; an Updated/Skipped/Error outcome follows for the
    /// same candidate.
    Ambiguous { candidates: usize, chosen_site: i64 },
    /// Lookup or write failed for this candidate; the run continued.
    Error { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateEvent {
    pub plan_id: i64,
    pub cms_code: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Result of one reconciliation pass. Counters plus the per-candidate
/// event log; silent skips are counted but not logged. Printing or
/// persisting this is the caller's job.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub meta: RunMeta,
    pub scanned: usize,
    pub updated: usize,
    pub skipped: usize,
    pub unmatched: usize,
    pub errors: usize,
    pub events: Vec<CandidateEvent>,
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            meta: RunMeta {
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                run_at: chrono::Utc::now().to_rfc3339(),
            },
            scanned: 0,
            updated: 0,
            skipped: 0,
            unmatched: 0,
            errors: 0,
            events: Vec::new(),
        }
    }

    /// Count an outcome and append its event. Skips stay out of the event
    /// log; ambiguity is a warning and touches no counter.
    pub fn record(&mut self, plan: &PlanRecord, outcome: Outcome) {
        match &outcome {
            Outcome::Updated { .. } => self.updated += 1,
            Outcome::Skipped => {
                self.skipped += 1;
                return;
            }
            Outcome::Unmatched => self.unmatched += 1,
            Outcome::Ambiguous { .. } => {}
            Outcome::Error { .. } => self.errors += 1,
        }
        self.events.push(CandidateEvent {
            plan_id: plan.id,
            cms_code: plan.cms_code.clone().unwrap_or_default(),
            outcome,
        });
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}
