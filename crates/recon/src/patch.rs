use crate::model::{is_blank, Patch, PlanRecord, SiteField, SiteRecord};

/// True when a candidate still needs work: link missing, or any descriptive
/// field empty. Complete plans are skipped without a canonical lookup.
pub fn needs_repair(plan: &PlanRecord) -> bool {
    plan.cms_id.is_none()
        || SiteField::ALL
            .iter()
            .any(|field| is_blank(field.plan_value(plan)))
}

/// Build the fill-only-if-missing patch for a plan against its matched site.
///
/// A non-empty value on the plan is authoritative and is never touched,
/// even when it disagrees with the site. Empty site values are never
/// copied over.
pub fn build(plan: &PlanRecord, site: &SiteRecord) -> Patch {
    let mut patch = Patch::default();

    if plan.cms_id.is_none() {
        patch.cms_id = Some(site.id);
    }

    for field in SiteField::ALL {
        if !is_blank(field.plan_value(plan)) {
            continue;
        }
        match field.site_value(site) {
            Some(value) if !value.is_empty() => {
                patch.fields.insert(field, value.to_string());
            }
            _ => {}
        }
    }

    patch
}
