use crate::error::ReconError;
use crate::matcher::{self, MatchOutcome};
use crate::model::PlanRecord;
use crate::patch;
use crate::report::{Outcome, RunReport};
use crate::store::{Predicate, RecordStore};

/// Run one reconciliation pass: list candidates, then for each one match
/// its code against the canonical sites and apply the minimal fill-only
/// patch. Candidates are processed sequentially and independently: one
/// candidate's failure never aborts the batch. Only the initial listing
/// is fatal.
///
/// The pass is idempotent: a second run over the resulting data issues
/// no writes.
pub fn run(store: &dyn RecordStore, predicate: &Predicate) -> Result<RunReport, ReconError> {
    let plans = store.select(predicate).map_err(ReconError::Listing)?;

    let mut report = RunReport::new();
    report.scanned = plans.len();

    for plan in &plans {
        process_candidate(store, plan, &mut report);
    }

    Ok(report)
}

fn process_candidate(store: &dyn RecordStore, plan: &PlanRecord, report: &mut RunReport) {
    let code = match plan.cms_code.as_deref() {
        Some(code) if !code.is_empty() => code,
        // Selected on a null check; an empty-string code has nothing to match.
        _ => {
            report.record(plan, Outcome::Skipped);
            return;
        }
    };

    if !patch::needs_repair(plan) {
        report.record(plan, Outcome::Skipped);
        return;
    }

    let sites = match store.find_by_key(code) {
        Ok(sites) => sites,
        Err(e) => {
            report.record(plan, Outcome::Error { message: e.to_string() });
            return;
        }
    };

    let site = match matcher::resolve(sites) {
        MatchOutcome::None => {
            report.record(plan, Outcome::Unmatched);
            return;
        }
        MatchOutcome::Unique(site) => site,
        MatchOutcome::Ambiguous { site, candidates } => {
            report.record(plan, Outcome::Ambiguous { candidates, chosen_site: site.id });
            site
        }
    };

    let patch = patch::build(plan, &site);
    if patch.is_empty() {
        report.record(plan, Outcome::Skipped);
        return;
    }

    match store.update(plan.id, &patch) {
        Ok(()) => {
            report.record(plan, Outcome::Updated { fields: patch.touched_columns() });
        }
        Err(e) => {
            report.record(plan, Outcome::Error { message: e.to_string() });
        }
    }
}
