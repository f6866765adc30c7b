use crate::model::SiteRecord;

/// Resolution of one exact-key lookup.
#[derive(Debug)]
pub enum MatchOutcome {
    /// No site shares the code.
    None,
    Unique(SiteRecord),
    /// Several sites share the code. `site` is the first one in the store's
    /// return order, which is what gets used.
    Ambiguous { site: SiteRecord, candidates: usize },
}

/// Resolve the store's result set for a code to a single site.
///
/// The many-match tie-break keeps the first row in store return order,
/// a pragmatic policy for dirty upstream data, not a business rule. No
/// fuzzy disambiguation is attempted.
pub fn resolve(mut sites: Vec<SiteRecord>) -> MatchOutcome {
    match sites.len() {
        0 => MatchOutcome::None,
        1 => MatchOutcome::Unique(sites.remove(0)),
        n => MatchOutcome::Ambiguous {
            site: sites.remove(0),
            candidates: n,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(id: i64, cms: &str) -> SiteRecord {
        SiteRecord {
            id,
            cms: cms.into(),
            site_name: Some(format!("Site {id}")),
            ..Default::default()
        }
    }

    #[test]
    fn no_sites_is_no_match() {
        assert!(matches!(resolve(vec![]), MatchOutcome::None));
    }

    #[test]
    fn single_site_is_unique() {
        match resolve(vec![site(5, "A1")]) {
            MatchOutcome::Unique(s) => assert_eq!(s.id, 5),
            other => panic!("expected Unique, got {other:?}"),
        }
    }

    #[test]
    fn many_sites_keep_first_in_store_order() {
        match resolve(vec![site(9, "B2"), site(3, "B2")]) {
            MatchOutcome::Ambiguous { site, candidates } => {
                // First in return order wins, not smallest id
                assert_eq!(site.id, 9);
                assert_eq!(candidates, 2);
            }
            other => panic!("expected Ambiguous, got {other:?}"),
        }
    }
}
